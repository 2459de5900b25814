//! Cache-augmented fetch layer.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use countries_cache::{CacheStats, TtlCache};
use countries_core::error::{CountryError, Result};
use countries_core::keys::{country_key, region_key, search_key, ALL_COUNTRIES_KEY};
use countries_core::traits::CountryProvider;
use countries_core::types::{CountryRecord, FilterQuery, RawCountry};

/// Value stored in the shared cache.
#[derive(Clone, Debug, PartialEq)]
pub enum CachedPayload {
    /// A list result (all countries, a region, a search).
    Countries(Vec<CountryRecord>),
    /// A single by-code result.
    Country(CountryRecord),
}

fn normalize_all(raw: Vec<RawCountry>) -> Vec<CountryRecord> {
    raw.into_iter().map(CountryRecord::from).collect()
}

/// Memoizes provider calls and runs local searches.
///
/// Only successful results are cached. Errors pass through unchanged (search
/// wraps base-set failures in `FilterFailed`) and the next call retries.
pub struct CountryService {
    provider: Arc<dyn CountryProvider>,
    cache: Arc<TtlCache<CachedPayload>>,
}

impl CountryService {
    /// Creates a service over `provider` using a caller-owned cache.
    pub fn new(provider: Arc<dyn CountryProvider>, cache: Arc<TtlCache<CachedPayload>>) -> Self {
        Self { provider, cache }
    }

    /// Creates a service with a fresh cache whose entries live for `ttl`.
    pub fn with_ttl(provider: Arc<dyn CountryProvider>, ttl: Duration) -> Self {
        Self::new(provider, Arc::new(TtlCache::new(ttl)))
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<TtlCache<CachedPayload>> {
        &self.cache
    }

    fn cached_list(&self, key: &str) -> Option<Vec<CountryRecord>> {
        match self.cache.get(key) {
            Some(CachedPayload::Countries(countries)) => {
                debug!(key, "Cache hit");
                Some(countries)
            }
            _ => {
                debug!(key, "Cache miss");
                None
            }
        }
    }

    /// All countries. Cache key `allCountries`.
    #[instrument(skip(self))]
    pub async fn get_all_countries(&self) -> Result<Vec<CountryRecord>> {
        if let Some(countries) = self.cached_list(ALL_COUNTRIES_KEY) {
            return Ok(countries);
        }

        let countries = normalize_all(self.provider.fetch_all().await?);
        self.cache
            .set(ALL_COUNTRIES_KEY, CachedPayload::Countries(countries.clone()));
        Ok(countries)
    }

    /// One country by alpha code, case-insensitive and trimmed. Cache key
    /// `country:<CODE>`.
    #[instrument(skip(self))]
    pub async fn get_country_by_code(&self, code: &str) -> Result<CountryRecord> {
        let code = code.trim().to_uppercase();
        let key = country_key(&code);

        if let Some(CachedPayload::Country(country)) = self.cache.get(&key) {
            debug!(key = %key, "Cache hit");
            return Ok(country);
        }
        debug!(key = %key, "Cache miss");

        let country = CountryRecord::from(self.provider.fetch_by_code(&code).await?);
        self.cache.set(key, CachedPayload::Country(country.clone()));
        Ok(country)
    }

    /// Countries in a region. Cache key `region:<region lowercased>`; the
    /// provider receives `region` as given.
    #[instrument(skip(self))]
    pub async fn get_countries_by_region(&self, region: &str) -> Result<Vec<CountryRecord>> {
        let key = region_key(region);
        if let Some(countries) = self.cached_list(&key) {
            return Ok(countries);
        }

        let countries = normalize_all(self.provider.fetch_by_region(region).await?);
        self.cache.set(key, CachedPayload::Countries(countries.clone()));
        Ok(countries)
    }

    /// Filters the full country set. Cache key `search:<sorted fields>`.
    #[instrument(skip(self))]
    pub async fn search(&self, query: FilterQuery) -> Result<Vec<CountryRecord>> {
        let query = query.normalized();
        let key = search_key(&query);
        if let Some(countries) = self.cached_list(&key) {
            return Ok(countries);
        }

        let all = self.get_all_countries().await.map_err(|e| {
            warn!(error = %e, "Search could not load the country set");
            CountryError::FilterFailed(e.to_string())
        })?;

        let filtered = query.apply(&all);
        debug!(key = %key, matched = filtered.len(), total = all.len(), "Search complete");
        self.cache.set(key, CachedPayload::Countries(filtered.clone()));
        Ok(filtered)
    }

    /// Cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drops every cached entry.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
