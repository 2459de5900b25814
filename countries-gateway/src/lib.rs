//! # Countries Gateway
//!
//! Outbound client for the REST Countries API. Translates HTTP outcomes into
//! [`countries_core::CountryError`]: a 404 becomes `NotFound`, everything else
//! that fails becomes `FetchFailed`. Every request is bounded by a timeout.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;

pub use client::{GatewayConfig, RestCountriesClient};
