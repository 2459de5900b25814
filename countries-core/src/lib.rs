//! # Countries Core
//!
//! Core types, errors, and traits shared by the country info backend crates.
//!
//! - **Types**: the raw upstream shape, the normalized `CountryRecord`, and `FilterQuery`
//! - **Errors**: the `CountryError` taxonomy surfaced at the HTTP boundary
//! - **Keys**: deterministic cache key derivation
//! - **Traits**: the `CountryProvider` seam between the fetch layer and the upstream API
//!
//! ## Example
//!
//! ```rust
//! use countries_core::{CountryRecord, RawCountry};
//!
//! let raw: RawCountry = serde_json::from_str(r#"{"name":{"common":"France"}}"#).unwrap();
//! let record = CountryRecord::from(raw);
//! assert_eq!(record.population, 0);
//! assert_eq!(record.capital, "N/A");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod keys;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{CountryError, Lookup, Result};
pub use traits::CountryProvider;
pub use types::*;
