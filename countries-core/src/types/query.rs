//! Search filters over country records.

use serde::{Deserialize, Serialize};

use crate::types::country::CountryRecord;

/// Multi-field filter. Absent fields match everything.
///
/// `name` and `capital` are case-insensitive substring matches, `region` is a
/// case-insensitive exact match, `timezone` is an exact membership test.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterQuery {
    /// Substring of the common name.
    pub name: Option<String>,
    /// Substring of the capital.
    pub capital: Option<String>,
    /// Region name.
    pub region: Option<String>,
    /// Exact UTC offset, e.g. "UTC+01:00".
    pub timezone: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl FilterQuery {
    /// Drops empty-string fields so they behave as absent.
    pub fn normalized(self) -> Self {
        Self {
            name: non_empty(self.name),
            capital: non_empty(self.capital),
            region: non_empty(self.region),
            timezone: non_empty(self.timezone),
        }
    }

    /// Returns true if no field constrains the result.
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Present, non-empty fields as `(field, value)` pairs sorted by field name.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields: Vec<(&'static str, &str)> = [
            ("capital", self.capital.as_deref()),
            ("name", self.name.as_deref()),
            ("region", self.region.as_deref()),
            ("timezone", self.timezone.as_deref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.filter(|v| !v.is_empty()).map(|v| (k, v)))
        .collect();
        fields.sort_by_key(|(k, _)| *k);
        fields
    }

    /// Evaluates the conjunction of all present predicates against `country`.
    pub fn matches(&self, country: &CountryRecord) -> bool {
        self.matches_name(country)
            && self.matches_capital(country)
            && self.matches_region(country)
            && self.matches_timezone(country)
    }

    /// Stable filter: keeps source order.
    pub fn apply(&self, countries: &[CountryRecord]) -> Vec<CountryRecord> {
        countries
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect()
    }

    fn matches_name(&self, country: &CountryRecord) -> bool {
        match self.name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => country.name.to_lowercase().contains(&name.to_lowercase()),
            None => true,
        }
    }

    fn matches_capital(&self, country: &CountryRecord) -> bool {
        match self.capital.as_deref().filter(|c| !c.is_empty()) {
            Some(capital) => {
                country.has_capital()
                    && country.capital.to_lowercase().contains(&capital.to_lowercase())
            }
            None => true,
        }
    }

    fn matches_region(&self, country: &CountryRecord) -> bool {
        match self.region.as_deref().filter(|r| !r.is_empty()) {
            Some(region) => country.region.to_lowercase() == region.to_lowercase(),
            None => true,
        }
    }

    fn matches_timezone(&self, country: &CountryRecord) -> bool {
        match self.timezone.as_deref().filter(|t| !t.is_empty()) {
            Some(tz) => country.timezones.iter().any(|t| t == tz),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;

    fn country(name: &str, region: &str, capital: &str, tz: &[&str]) -> CountryRecord {
        CountryRecord {
            name: name.into(),
            population: 0,
            flag: String::new(),
            region: region.into(),
            currency: BTreeMap::new(),
            code: name.chars().take(2).collect::<String>().to_uppercase(),
            capital: capital.into(),
            timezones: tz.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn sample() -> Vec<CountryRecord> {
        vec![
            country("France", "Europe", "Paris", &["UTC-10:00", "UTC+01:00"]),
            country("Germany", "Europe", "Berlin", &["UTC+01:00"]),
            country("Japan", "Asia", "Tokyo", &["UTC+09:00"]),
            country("Antarctica", "Antarctic", "N/A", &["UTC+03:00"]),
        ]
    }

    fn names(countries: &[CountryRecord]) -> Vec<&str> {
        countries.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_matches_all() {
        let q = FilterQuery::default();
        assert!(q.is_empty());
        assert_eq!(q.apply(&sample()).len(), 4);
    }

    #[test_case(FilterQuery { name: Some("AN".into()), ..Default::default() }, &["France", "Germany", "Japan", "Antarctica"] ; "name substring case insensitive")]
    #[test_case(FilterQuery { capital: Some("par".into()), ..Default::default() }, &["France"] ; "capital substring")]
    #[test_case(FilterQuery { capital: Some("n/a".into()), ..Default::default() }, &[] ; "default capital never matches")]
    #[test_case(FilterQuery { region: Some("europe".into()), ..Default::default() }, &["France", "Germany"] ; "region exact case insensitive")]
    #[test_case(FilterQuery { region: Some("Eur".into()), ..Default::default() }, &[] ; "region is not a substring match")]
    #[test_case(FilterQuery { timezone: Some("UTC+09:00".into()), ..Default::default() }, &["Japan"] ; "timezone membership")]
    #[test_case(FilterQuery { timezone: Some("utc+09:00".into()), ..Default::default() }, &[] ; "timezone is case sensitive")]
    fn test_single_predicate(query: FilterQuery, expected: &[&str]) {
        assert_eq!(names(&query.apply(&sample())), expected);
    }

    #[test]
    fn test_conjunction_excludes_partial_matches() {
        let mut countries = sample();
        countries.push(country("Portugal", "Europe", "Lisbon", &["UTC-01:00", "UTC"]));
        countries.push(country("Nigeria", "Africa", "Abuja", &["UTC+01:00"]));

        let q = FilterQuery {
            region: Some("Europe".into()),
            timezone: Some("UTC+01:00".into()),
            ..Default::default()
        };
        assert_eq!(names(&q.apply(&countries)), vec!["France", "Germany"]);
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let q = FilterQuery {
            name: Some(String::new()),
            capital: Some(String::new()),
            region: Some(String::new()),
            timezone: Some(String::new()),
        };
        assert!(q.is_empty());
        assert_eq!(q.apply(&sample()).len(), 4);
        assert_eq!(q.normalized(), FilterQuery::default());
    }

    #[test]
    fn test_fields_sorted_by_name() {
        let q = FilterQuery {
            timezone: Some("UTC".into()),
            name: Some("fr".into()),
            capital: Some("Paris".into()),
            region: None,
        };
        assert_eq!(
            q.fields(),
            vec![("capital", "Paris"), ("name", "fr"), ("timezone", "UTC")]
        );
    }

    fn arb_country() -> impl Strategy<Value = CountryRecord> {
        (
            "[a-cA-C]{0,4}",
            prop_oneof![Just("Europe"), Just("Asia"), Just("N/A")],
            prop_oneof![Just("Paris"), Just("Tokyo"), Just("N/A")],
            proptest::collection::vec(prop_oneof![Just("UTC"), Just("UTC+01:00")], 0..3),
        )
            .prop_map(|(name, region, capital, tz)| country(&name, region, capital, &tz))
    }

    fn arb_query() -> impl Strategy<Value = FilterQuery> {
        (
            proptest::option::of("[a-cA-C]{0,2}"),
            proptest::option::of(prop_oneof![Just("par".to_string()), Just("o".to_string())]),
            proptest::option::of(prop_oneof![Just("europe".to_string()), Just("ASIA".to_string())]),
            proptest::option::of(prop_oneof![Just("UTC".to_string()), Just("UTC+01:00".to_string())]),
        )
            .prop_map(|(name, capital, region, timezone)| FilterQuery {
                name,
                capital,
                region,
                timezone,
            })
    }

    proptest! {
        #[test]
        fn prop_apply_is_stable_subsequence(
            countries in proptest::collection::vec(arb_country(), 0..12),
            query in arb_query(),
        ) {
            let result = query.apply(&countries);
            prop_assert!(result.iter().all(|c| query.matches(c)));

            let expected: Vec<_> = countries.iter().filter(|c| query.matches(c)).cloned().collect();
            prop_assert_eq!(result, expected);
        }
    }
}
