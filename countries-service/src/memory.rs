//! In-memory country provider.
//!
//! Serves a fixed list of raw countries with the same outcome rules as the
//! HTTP gateway. Useful for tests and for running without network access.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use countries_core::error::{CountryError, Result};
use countries_core::traits::CountryProvider;
use countries_core::types::RawCountry;

/// Provider backed by a `Vec<RawCountry>`.
///
/// Every call is counted and logged as `all`, `code:<arg>` or `region:<arg>`
/// with the argument exactly as received.
#[derive(Default)]
pub struct MemoryProvider {
    countries: RwLock<Vec<RawCountry>>,
    failing: AtomicBool,
    calls: AtomicUsize,
    requests: Mutex<Vec<String>>,
}

impl MemoryProvider {
    /// Creates a provider serving `countries`.
    pub fn new(countries: Vec<RawCountry>) -> Self {
        Self {
            countries: RwLock::new(countries),
            ..Default::default()
        }
    }

    /// Replaces the served data set.
    pub fn set_countries(&self, countries: Vec<RawCountry>) {
        *self.countries.write() = countries;
    }

    /// When `true`, every call fails with `FetchFailed`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Calls received so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    fn record(&self, request: String, what: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CountryError::fetch_failed(what, "provider unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl CountryProvider for MemoryProvider {
    async fn fetch_all(&self) -> Result<Vec<RawCountry>> {
        self.record("all".into(), "countries")?;
        Ok(self.countries.read().clone())
    }

    async fn fetch_by_code(&self, code: &str) -> Result<RawCountry> {
        self.record(format!("code:{code}"), "country by code")?;
        let wanted = code.to_uppercase();
        self.countries
            .read()
            .iter()
            .find(|c| c.cca2.as_deref().map(str::to_uppercase).as_deref() == Some(wanted.as_str()))
            .cloned()
            .ok_or_else(|| CountryError::country_not_found(wanted))
    }

    async fn fetch_by_region(&self, region: &str) -> Result<Vec<RawCountry>> {
        self.record(format!("region:{region}"), "countries by region")?;
        let wanted = region.to_lowercase();
        let matching: Vec<RawCountry> = self
            .countries
            .read()
            .iter()
            .filter(|c| c.region.as_deref().map(str::to_lowercase).as_deref() == Some(wanted.as_str()))
            .cloned()
            .collect();

        if matching.is_empty() {
            return Err(CountryError::region_not_found(region));
        }
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(cca2: &str, region: &str) -> RawCountry {
        RawCountry {
            cca2: Some(cca2.into()),
            region: Some(region.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_lookup_rules() {
        let provider = MemoryProvider::new(vec![raw("FR", "Europe"), raw("JP", "Asia")]);

        assert_eq!(provider.fetch_all().await.unwrap().len(), 2);
        assert_eq!(provider.fetch_by_code("jp").await.unwrap().cca2.as_deref(), Some("JP"));
        assert!(provider.fetch_by_code("ZZ").await.unwrap_err().is_not_found());
        assert_eq!(provider.fetch_by_region("EUROPE").await.unwrap().len(), 1);
        assert!(provider.fetch_by_region("Oceania").await.unwrap_err().is_not_found());

        assert_eq!(provider.calls(), 5);
        assert_eq!(provider.requests()[1], "code:jp");
    }

    #[tokio::test]
    async fn test_failing() {
        let provider = MemoryProvider::new(vec![raw("FR", "Europe")]);
        provider.set_failing(true);
        assert!(matches!(
            provider.fetch_all().await,
            Err(CountryError::FetchFailed { .. })
        ));
        provider.set_failing(false);
        assert!(provider.fetch_all().await.is_ok());
    }
}
