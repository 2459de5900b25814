//! Cache key derivation.
//!
//! Keys are plain strings namespaced by operation. Two requests that must share
//! a cache entry always derive the same key.

use url::form_urlencoded;

use crate::types::FilterQuery;

/// Key for the full country list.
pub const ALL_COUNTRIES_KEY: &str = "allCountries";

const COUNTRY_PREFIX: &str = "country:";
const REGION_PREFIX: &str = "region:";
const SEARCH_PREFIX: &str = "search:";

/// `country:<CODE>`, with the code uppercased.
pub fn country_key(code: &str) -> String {
    format!("{COUNTRY_PREFIX}{}", code.to_uppercase())
}

/// `region:<region>`, with the region lowercased.
pub fn region_key(region: &str) -> String {
    format!("{REGION_PREFIX}{}", region.to_lowercase())
}

/// `search:<form-encoded fields>`, fields sorted by name, absent fields omitted.
///
/// `{name: "fr", capital: "Paris"}` → `search:capital=Paris&name=fr`.
pub fn search_key(query: &FilterQuery) -> String {
    let mut encoded = form_urlencoded::Serializer::new(String::new());
    for (field, value) in query.fields() {
        encoded.append_pair(field, value);
    }
    format!("{SEARCH_PREFIX}{}", encoded.finish())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("fr", "country:FR" ; "lowercase")]
    #[test_case("FR", "country:FR" ; "uppercase")]
    #[test_case("deu", "country:DEU" ; "alpha3")]
    fn test_country_key(code: &str, expected: &str) {
        assert_eq!(country_key(code), expected);
    }

    #[test_case("Europe", "region:europe")]
    #[test_case("ASIA", "region:asia")]
    fn test_region_key(region: &str, expected: &str) {
        assert_eq!(region_key(region), expected);
    }

    #[test]
    fn test_search_key_sorted_and_sparse() {
        let q = FilterQuery {
            name: Some("fr".into()),
            capital: Some("Paris".into()),
            ..Default::default()
        };
        assert_eq!(search_key(&q), "search:capital=Paris&name=fr");
    }

    #[test]
    fn test_search_key_empty_query() {
        assert_eq!(search_key(&FilterQuery::default()), "search:");
    }

    #[test]
    fn test_search_key_ignores_empty_values() {
        let q = FilterQuery {
            region: Some("Europe".into()),
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(search_key(&q), "search:region=Europe");
    }

    #[test]
    fn test_search_key_escapes_values() {
        let q = FilterQuery {
            timezone: Some("UTC+01:00".into()),
            name: Some("a&b=c".into()),
            ..Default::default()
        };
        assert_eq!(search_key(&q), "search:name=a%26b%3Dc&timezone=UTC%2B01%3A00");
    }

    #[test]
    fn test_search_key_distinguishes_fields() {
        let by_name = FilterQuery {
            name: Some("x".into()),
            ..Default::default()
        };
        let by_capital = FilterQuery {
            capital: Some("x".into()),
            ..Default::default()
        };
        assert_ne!(search_key(&by_name), search_key(&by_capital));
    }
}
