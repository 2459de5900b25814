//! Constants shared across the workspace.

/// Placeholder used for absent textual fields in a normalized record.
pub const NOT_AVAILABLE: &str = "N/A";

/// Default upstream base URL.
pub const DEFAULT_UPSTREAM_URL: &str = "https://restcountries.com/v3.1";

/// Default cache TTL (30 minutes).
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 60 * 30;

/// Default timeout for a single upstream request.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 10;

/// Fields requested from the upstream list endpoints.
///
/// The `/all` endpoint rejects requests without a field projection.
pub const UPSTREAM_FIELDS: &str = "name,population,flags,region,currencies,cca2,capital,timezones";

/// Accepted length range for alpha country codes (ISO 3166-1 alpha-2 / alpha-3).
pub const COUNTRY_CODE_LEN: std::ops::RangeInclusive<usize> = 2..=3;
