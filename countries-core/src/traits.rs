//! Common traits.
//!
//! The fetch layer depends on `CountryProvider` rather than on a concrete HTTP
//! client, so tests can substitute an in-memory provider.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::RawCountry;

/// Interface to the upstream country-data source.
///
/// Implementations translate transport outcomes into `CountryError`:
/// `NotFound` when the source says the code or region does not exist,
/// `FetchFailed` for everything else.
#[async_trait]
pub trait CountryProvider: Send + Sync {
    /// Fetches every country.
    async fn fetch_all(&self) -> Result<Vec<RawCountry>>;

    /// Fetches one country by its alpha-2 or alpha-3 code.
    async fn fetch_by_code(&self, code: &str) -> Result<RawCountry>;

    /// Fetches all countries in a region.
    async fn fetch_by_region(&self, region: &str) -> Result<Vec<RawCountry>>;
}
