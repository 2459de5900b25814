//! Normalized country record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::NOT_AVAILABLE;
use crate::types::raw::{RawCountry, RawCurrency};

/// Fixed-shape projection of an upstream country.
///
/// Every field has a deterministic value; absent or `null` upstream fields are
/// replaced by defaults during conversion from [`RawCountry`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Common name, `""` if missing.
    pub name: String,
    /// Population, `0` if missing.
    pub population: u64,
    /// Flag image URL, `""` if missing.
    pub flag: String,
    /// Region, `"N/A"` if missing.
    pub region: String,
    /// Currency code → details, empty if missing.
    pub currency: BTreeMap<String, Currency>,
    /// Alpha-2 code, `"N/A"` if missing.
    pub code: String,
    /// First listed capital, `"N/A"` if missing.
    pub capital: String,
    /// UTC offsets in upstream order.
    pub timezones: Vec<String>,
}

/// Currency details.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Symbol, e.g. "€".
    pub symbol: String,
    /// Name, e.g. "Euro".
    pub name: String,
}

impl CountryRecord {
    /// Returns true if the record has a known capital.
    pub fn has_capital(&self) -> bool {
        self.capital != NOT_AVAILABLE
    }
}

impl From<RawCurrency> for Currency {
    fn from(raw: RawCurrency) -> Self {
        Self {
            symbol: raw.symbol.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
        }
    }
}

impl From<RawCountry> for CountryRecord {
    fn from(raw: RawCountry) -> Self {
        let flag = raw
            .flags
            .and_then(|f| f.svg.or(f.png))
            .unwrap_or_default();

        Self {
            name: raw.name.and_then(|n| n.common).unwrap_or_default(),
            population: raw.population.unwrap_or(0),
            flag,
            region: raw.region.unwrap_or_else(|| NOT_AVAILABLE.into()),
            currency: raw
                .currencies
                .unwrap_or_default()
                .into_iter()
                .filter_map(|(code, c)| Some((code, Currency::from(c?))))
                .collect(),
            code: raw.cca2.unwrap_or_else(|| NOT_AVAILABLE.into()),
            capital: raw
                .capital
                .and_then(|c| c.into_iter().flatten().next())
                .unwrap_or_else(|| NOT_AVAILABLE.into()),
            timezones: raw
                .timezones
                .unwrap_or_default()
                .into_iter()
                .flatten()
                .collect(),
        }
    }
}
