//! In-memory TTL cache.
//!
//! Entries expire lazily: an expired entry stays in the map until it is
//! overwritten or swept by [`TtlCache::cleanup_expired`], but reads treat it as
//! absent. There is no size bound; memory is reclaimed only through expiry.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Cache entry with TTL.
#[derive(Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    /// Live while `now - inserted_at < ttl`.
    fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) >= self.ttl
    }

    fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL applied to every entry, in seconds
    pub ttl_seconds: u64,
    /// Initial map capacity (not a bound)
    pub initial_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 60 * 30,
            initial_capacity: 64,
        }
    }
}

/// Thread-safe key-value store with a fixed TTL.
///
/// `set` replaces the value and its timestamp under one write lock, so readers
/// never see a value paired with another write's timestamp.
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Creates a cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::with_capacity(config.initial_capacity)),
            ttl: Duration::from_secs(config.ttl_seconds),
        }
    }

    /// Returns the value for `key` if present and not expired.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let entries = self.entries.read();
        entries.get(key).and_then(|e| {
            if e.is_expired_at(now) {
                trace!(key, "Expired entry");
                None
            } else {
                Some(e.value.clone())
            }
        })
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_at(key.into(), value, Instant::now());
    }

    fn set_at(&self, key: String, value: V, now: Instant) {
        let entry = CacheEntry {
            value,
            inserted_at: now,
            ttl: self.ttl,
        };
        self.entries.write().insert(key, entry);
    }

    /// Removes a cached entry.
    pub fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired());
        before - entries.len()
    }

    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired()).count();
        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len().saturating_sub(expired),
            ttl_seconds: self.ttl.as_secs(),
        }
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::with_config(CacheConfig::default())
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub valid_entries: usize,
    pub ttl_seconds: u64,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_cache_set_get() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("allCountries", vec![1, 2, 3]);
        assert_eq!(cache.get("allCountries"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_cache_miss() {
        let cache: TtlCache<u32> = TtlCache::default();
        assert!(cache.get("country:ZZ").is_none());
    }

    #[test]
    fn test_keys_are_exact() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("country:FR", 1);
        assert!(cache.get("country:fr").is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("k", "old");
        cache.set("k", "new");
        assert_eq!(cache.get("k"), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_ttl_boundary() {
        let ttl = Duration::from_secs(1800);
        let epsilon = Duration::from_millis(1);
        let cache = TtlCache::new(ttl);
        let t = Instant::now();
        cache.set_at("k".into(), 7, t);

        assert_eq!(cache.get_at("k", t), Some(7));
        assert_eq!(cache.get_at("k", t + ttl - epsilon), Some(7));
        assert_eq!(cache.get_at("k", t + ttl), None);
        assert_eq!(cache.get_at("k", t + ttl + epsilon), None);
    }

    #[test]
    fn test_overwrite_resets_timestamp() {
        let ttl = Duration::from_secs(10);
        let cache = TtlCache::new(ttl);
        let t = Instant::now();
        cache.set_at("k".into(), 1, t);
        cache.set_at("k".into(), 2, t + Duration::from_secs(8));

        assert_eq!(cache.get_at("k", t + Duration::from_secs(12)), Some(2));
    }

    #[test]
    fn test_cache_ttl_expiration() {
        let cache = TtlCache::new(Duration::from_millis(1));
        cache.set("k", 1);
        std::thread::sleep(Duration::from_millis(10));
        assert!(cache.get("k").is_none());
        // Lazy expiry: still stored until swept.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_remove_and_clear() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("a", 1);
        cache.set("b", 2);
        cache.remove("a");
        assert!(cache.get("a").is_none());
        assert_eq!(cache.get("b"), Some(2));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_cleanup_expired() {
        let cache = TtlCache::new(Duration::from_millis(1));
        cache.set("a", 1);
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(cache.cleanup_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_stats() {
        let cache = TtlCache::with_config(CacheConfig {
            ttl_seconds: 1800,
            initial_capacity: 4,
        });
        cache.set("a", 1);
        cache.set("b", 2);
        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.valid_entries, 2);
        assert_eq!(stats.expired_entries, 0);
        assert_eq!(stats.ttl_seconds, 1800);
    }

    #[test]
    fn test_concurrent_writers_same_key() {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(60)));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        cache.set("shared", (i, i * 10));
                        if let Some((a, b)) = cache.get("shared") {
                            assert_eq!(b, a * 10);
                        }
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(cache.len(), 1);
        let (a, b) = cache.get("shared").unwrap();
        assert_eq!(b, a * 10);
    }
}
