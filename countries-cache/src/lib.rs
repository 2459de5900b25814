//! TTL cache for upstream country data.
//!
//! Generic in-memory key-value store with a single per-store expiration.

mod cache;

pub use cache::{CacheConfig, CacheStats, TtlCache};
