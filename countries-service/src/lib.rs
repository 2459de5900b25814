//! # Countries Service
//!
//! Memoizes upstream lookups in a shared [`TtlCache`] and runs local searches
//! over the full country set.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use countries_gateway::RestCountriesClient;
//! use countries_service::CountryService;
//!
//! let provider = Arc::new(RestCountriesClient::new()?);
//! let service = CountryService::with_ttl(provider, Duration::from_secs(1800));
//! let france = service.get_country_by_code("fr").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;
mod service;

pub use countries_cache::{CacheStats, TtlCache};
pub use memory::MemoryProvider;
pub use service::{CachedPayload, CountryService};
