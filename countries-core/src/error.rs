//! Error types for the country info backend.
//!
//! Callers branch on the variant, never on the rendered message.

use std::fmt;

use thiserror::Error;

/// Result type alias using `CountryError`.
pub type Result<T> = std::result::Result<T, CountryError>;

/// What a failed lookup was looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// A single country by alpha code.
    Country,
    /// A region of countries.
    Region,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Country => f.write_str("Country"),
            Lookup::Region => f.write_str("Region"),
        }
    }
}

/// Main error type for all country operations.
#[derive(Debug, Error)]
pub enum CountryError {
    /// The upstream reports that the requested code or region does not exist.
    #[error("{kind} not found: {key}")]
    NotFound {
        /// Kind of resource that was looked up.
        kind: Lookup,
        /// The code or region as requested.
        key: String,
    },

    /// Transport failure, timeout, upstream server error, or undecodable payload.
    #[error("Failed to fetch {target}: {reason}")]
    FetchFailed {
        /// Human-readable description of what was being fetched.
        target: String,
        /// Underlying cause.
        reason: String,
    },

    /// The base country set could not be obtained while running a search.
    #[error("Failed to search countries: {0}")]
    FilterFailed(String),

    /// Invalid construction-time configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CountryError {
    /// Country-not-found for the given code.
    pub fn country_not_found(code: impl Into<String>) -> Self {
        CountryError::NotFound {
            kind: Lookup::Country,
            key: code.into(),
        }
    }

    /// Region-not-found for the given region.
    pub fn region_not_found(region: impl Into<String>) -> Self {
        CountryError::NotFound {
            kind: Lookup::Region,
            key: region.into(),
        }
    }

    /// Fetch failure with context.
    pub fn fetch_failed(target: impl Into<String>, reason: impl ToString) -> Self {
        CountryError::FetchFailed {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CountryError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CountryError::country_not_found("ZZ");
        assert_eq!(err.to_string(), "Country not found: ZZ");

        let err = CountryError::region_not_found("atlantis");
        assert_eq!(err.to_string(), "Region not found: atlantis");

        let err = CountryError::fetch_failed("all countries", "HTTP 503");
        assert!(err.to_string().contains("all countries"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_error_classification() {
        assert!(CountryError::country_not_found("ZZ").is_not_found());
        assert!(CountryError::region_not_found("atlantis").is_not_found());
        assert!(!CountryError::fetch_failed("x", "y").is_not_found());
        assert!(!CountryError::FilterFailed("y".into()).is_not_found());
    }
}
