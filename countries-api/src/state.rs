//! App state: country service and config.

use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use countries_core::constants::{
    DEFAULT_CACHE_TTL_SECONDS, DEFAULT_UPSTREAM_TIMEOUT_SECONDS, DEFAULT_UPSTREAM_URL,
};
use countries_core::traits::CountryProvider;
use countries_core::Result;
use countries_gateway::{GatewayConfig, RestCountriesClient};
use countries_service::CountryService;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Upstream base URL
    pub upstream_url: String,
    /// Per-request upstream timeout in seconds
    pub upstream_timeout_seconds: u64,
    /// Cache entry lifetime in seconds
    pub cache_ttl_seconds: u64,
    /// Expired-entry sweep period in seconds; 0 disables the sweep
    pub cache_sweep_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.into(),
            upstream_timeout_seconds: DEFAULT_UPSTREAM_TIMEOUT_SECONDS,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            cache_sweep_seconds: 0,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => parse_or(name, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T: FromStr>(name: &str, raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(var = name, value = %raw, "Invalid value, using default");
        default
    })
}

/// Like [`parse_or`], but zero is rejected too.
fn parse_positive_or(name: &str, raw: &str, default: u64) -> u64 {
    match parse_or(name, raw, default) {
        0 => {
            warn!(var = name, "Zero is not allowed, using default");
            default
        }
        value => value,
    }
}

fn env_positive_or(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => parse_positive_or(name, &raw, default),
        Err(_) => default,
    }
}

impl ApiConfig {
    /// Reads configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            upstream_url: std::env::var("COUNTRIES_API_URL").unwrap_or(defaults.upstream_url),
            upstream_timeout_seconds: env_positive_or(
                "UPSTREAM_TIMEOUT_SECONDS",
                defaults.upstream_timeout_seconds,
            ),
            cache_ttl_seconds: env_or("CACHE_TTL_SECONDS", defaults.cache_ttl_seconds),
            cache_sweep_seconds: env_or("CACHE_SWEEP_SECONDS", defaults.cache_sweep_seconds),
        }
    }

    /// Gateway settings derived from this config.
    pub fn gateway(&self) -> GatewayConfig {
        GatewayConfig::new(&self.upstream_url).with_timeout(self.upstream_timeout_seconds)
    }
}

/// Shared state handed to every handler.
pub struct AppState {
    /// Active configuration
    pub config: ApiConfig,
    /// Cache-augmented country service
    pub service: CountryService,
    /// Server start time
    pub started_at: Instant,
}

impl AppState {
    /// Builds state backed by the REST Countries gateway.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = RestCountriesClient::with_config(config.gateway())?;
        info!(upstream = %client.base_url(), "Using upstream country API");
        Ok(Self::with_provider(config, Arc::new(client)))
    }

    /// Builds state over any provider.
    pub fn with_provider(config: ApiConfig, provider: Arc<dyn CountryProvider>) -> Self {
        let service =
            CountryService::with_ttl(provider, Duration::from_secs(config.cache_ttl_seconds));
        Self {
            config,
            service,
            started_at: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.cache_ttl_seconds, 1800);
        assert_eq!(config.upstream_url, "https://restcountries.com/v3.1");
        assert_eq!(config.cache_sweep_seconds, 0);
    }

    #[test]
    fn test_gateway_config() {
        let config = ApiConfig {
            upstream_url: "http://localhost:9999/v3.1".into(),
            upstream_timeout_seconds: 3,
            ..Default::default()
        };
        let gateway = config.gateway();
        assert_eq!(gateway.base_url, "http://localhost:9999/v3.1");
        assert_eq!(gateway.timeout_seconds, 3);
    }

    #[test]
    fn test_invalid_upstream_rejected() {
        let config = ApiConfig {
            upstream_url: "::not a url::".into(),
            ..Default::default()
        };
        assert!(AppState::new(config).is_err());
    }

    #[test]
    fn test_env_or_falls_back() {
        assert_eq!(env_or("COUNTRIES_TEST_UNSET_VARIABLE", 42u64), 42);
        assert_eq!(parse_or("CACHE_TTL_SECONDS", "soon", 1800u64), 1800);
        assert_eq!(parse_or("CACHE_TTL_SECONDS", " 60 ", 1800u64), 60);
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        assert_eq!(parse_positive_or("UPSTREAM_TIMEOUT_SECONDS", "0", 10), 10);
        assert_eq!(parse_positive_or("UPSTREAM_TIMEOUT_SECONDS", "abc", 10), 10);
        assert_eq!(parse_positive_or("UPSTREAM_TIMEOUT_SECONDS", "3", 10), 3);
        assert_eq!(env_positive_or("COUNTRIES_TEST_UNSET_VARIABLE", 10), 10);
    }
}
