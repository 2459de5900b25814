//! Raw upstream resource shape.
//!
//! Mirrors the subset of the REST Countries v3.1 payload that the backend
//! reads. Every field is optional and tolerates `null`, including entries of
//! the `currencies` map and elements of `capital` and `timezones`. Unknown
//! fields are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A country exactly as the upstream returns it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCountry {
    /// Naming block; only `common` is used.
    pub name: Option<RawName>,
    /// Population count.
    pub population: Option<u64>,
    /// Flag image URLs.
    pub flags: Option<RawFlags>,
    /// Region, e.g. "Europe".
    pub region: Option<String>,
    /// Currency code → currency details.
    pub currencies: Option<BTreeMap<String, Option<RawCurrency>>>,
    /// ISO 3166-1 alpha-2 code.
    pub cca2: Option<String>,
    /// Capital cities; the first non-null entry is used.
    pub capital: Option<Vec<Option<String>>>,
    /// UTC offsets such as "UTC+01:00".
    pub timezones: Option<Vec<Option<String>>>,
}

/// `name` block of a raw country.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawName {
    /// Common English name.
    pub common: Option<String>,
    /// Official English name.
    pub official: Option<String>,
}

/// `flags` block of a raw country.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFlags {
    /// SVG flag URL.
    pub svg: Option<String>,
    /// PNG flag URL.
    pub png: Option<String>,
}

/// A single entry of the raw `currencies` map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCurrency {
    /// Currency name, e.g. "Euro".
    pub name: Option<String>,
    /// Currency symbol, e.g. "€".
    pub symbol: Option<String>,
}
