//! REST Countries v3.1 client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use countries_core::constants::{
    COUNTRY_CODE_LEN, DEFAULT_UPSTREAM_TIMEOUT_SECONDS, DEFAULT_UPSTREAM_URL, UPSTREAM_FIELDS,
};
use countries_core::error::{CountryError, Result};
use countries_core::traits::CountryProvider;
use countries_core::types::RawCountry;

/// Gateway configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the API, e.g. "https://restcountries.com/v3.1"
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.into(),
            timeout_seconds: DEFAULT_UPSTREAM_TIMEOUT_SECONDS,
        }
    }
}

impl GatewayConfig {
    /// Creates a config pointing at `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// The by-code endpoint answers with either one object or a one-element array.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<RawCountry>),
    One(Box<RawCountry>),
}

/// Client for the upstream country API.
pub struct RestCountriesClient {
    base_url: Url,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl RestCountriesClient {
    /// Creates a client for the public API with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(GatewayConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: GatewayConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            CountryError::ConfigError(format!("invalid upstream URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CountryError::ConfigError(format!(
                "upstream URL '{}' cannot be used as a base",
                config.base_url
            )));
        }

        let timeout = Duration::from_secs(config.timeout_seconds);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CountryError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            timeout,
            http_client,
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked at construction: the base URL can carry path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn projected(mut url: Url) -> Url {
        url.query_pairs_mut().append_pair("fields", UPSTREAM_FIELDS);
        url
    }

    async fn get(&self, url: Url, what: &str) -> Result<Response> {
        debug!(%url, "GET");
        self.http_client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                warn!(what, timeout_secs = self.timeout.as_secs(), "Upstream timed out");
                CountryError::fetch_failed(
                    what,
                    format!("upstream timed out after {}s", self.timeout.as_secs()),
                )
            } else {
                CountryError::fetch_failed(what, e)
            }
        })
    }

    /// Maps a non-success status to an error. `not_found` is used for 404.
    fn check_status(
        response: &Response,
        what: &str,
        not_found: Option<CountryError>,
    ) -> Result<()> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(err) = not_found {
                return Err(err);
            }
        }
        if !status.is_success() {
            return Err(CountryError::fetch_failed(what, format!("HTTP {}", status)));
        }
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                CountryError::fetch_failed(what, "upstream timed out while reading body")
            } else {
                CountryError::fetch_failed(what, format!("invalid payload: {}", e))
            }
        })
    }
}

fn is_country_code(code: &str) -> bool {
    COUNTRY_CODE_LEN.contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphabetic())
}

#[async_trait]
impl CountryProvider for RestCountriesClient {
    #[instrument(skip(self))]
    async fn fetch_all(&self) -> Result<Vec<RawCountry>> {
        let what = "countries";
        let url = Self::projected(self.endpoint(&["all"]));

        let response = self.get(url, what).await?;
        Self::check_status(&response, what, None)?;
        let countries: Vec<RawCountry> = Self::decode(response, what).await?;

        debug!(count = countries.len(), "Fetched all countries");
        Ok(countries)
    }

    #[instrument(skip(self))]
    async fn fetch_by_code(&self, code: &str) -> Result<RawCountry> {
        let code = code.trim().to_uppercase();
        if !is_country_code(&code) {
            debug!(code = %code, "Rejected malformed country code");
            return Err(CountryError::country_not_found(code));
        }

        let what = "country by code";
        let url = self.endpoint(&["alpha", &code]);

        let response = self.get(url, what).await?;
        Self::check_status(&response, what, Some(CountryError::country_not_found(&code)))?;

        match Self::decode::<OneOrMany>(response, what).await? {
            OneOrMany::One(country) => Ok(*country),
            OneOrMany::Many(countries) => countries
                .into_iter()
                .next()
                .ok_or_else(|| CountryError::country_not_found(code)),
        }
    }

    #[instrument(skip(self))]
    async fn fetch_by_region(&self, region: &str) -> Result<Vec<RawCountry>> {
        let what = "countries by region";
        let normalized = region.trim().to_lowercase();
        let url = Self::projected(self.endpoint(&["region", &normalized]));

        let response = self.get(url, what).await?;
        Self::check_status(&response, what, Some(CountryError::region_not_found(region)))?;
        let countries: Vec<RawCountry> = Self::decode(response, what).await?;

        debug!(region = %normalized, count = countries.len(), "Fetched region");
        Ok(countries)
    }
}
