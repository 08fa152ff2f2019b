//! Cache backend trait.
//!
//! Abstracts over the external key/value store so the adapter can run
//! against Redis in production and an in-memory map in tests.

use std::time::Duration;

use async_trait::async_trait;
use solvetrack_core::CacheError;

/// Pluggable key/value backend with TTL support.
///
/// Implementations must be thread-safe. Values are opaque serialized
/// snapshots; backends never interpret them.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Connectivity probe. Called once at startup by the adapter.
    async fn probe(&self) -> Result<(), CacheError>;

    /// Get the value stored under `key`, or `None` on a miss or after TTL
    /// expiry.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key` with the given TTL, replacing any
    /// previous value wholesale.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Delete `key`, returning the number of keys removed (0 or 1).
    async fn delete(&self, key: &str) -> Result<u64, CacheError>;

    /// Number of keys currently held by the backend.
    async fn key_count(&self) -> Result<u64, CacheError>;
}
