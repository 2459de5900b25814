//! Domain types.

mod country;
mod query;
mod raw;

pub use country::{CountryRecord, Currency};
pub use query::FilterQuery;
pub use raw::{RawCountry, RawCurrency, RawFlags, RawName};
