//! DTOs for API responses.

use serde::Serialize;

use countries_service::CacheStats;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Entries currently held by the cache (expired ones included)
    pub cache_entries: usize,
    /// Server time, RFC 3339
    pub timestamp: String,
}

/// Cache statistics response.
#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    /// Entries stored, expired ones included
    pub total_entries: usize,
    /// Entries past their TTL, not yet swept
    pub expired_entries: usize,
    /// Entries that would be served
    pub valid_entries: usize,
    /// TTL applied to every entry
    pub ttl_seconds: u64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            total_entries: stats.total_entries,
            expired_entries: stats.expired_entries,
            valid_entries: stats.valid_entries,
            ttl_seconds: stats.ttl_seconds,
        }
    }
}
