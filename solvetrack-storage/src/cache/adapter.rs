//! Fail-open snapshot cache adapter.
//!
//! Wraps a [`CacheBackend`] and exposes get/put/invalidate keyed by user
//! identity. Every backend failure is recovered locally: reads degrade to
//! a miss, writes report `false`, invalidations report zero keys deleted.
//! Logging is a side effect at the failure site, never control flow.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use solvetrack_core::{CacheError, UserSnapshot};

use super::traits::CacheBackend;

/// Derive the cache key for a user. Pure and deterministic: one entry per
/// user, no collisions across distinct user identities.
pub fn snapshot_key(user_id: &str) -> String {
    format!("solved_problems:{}", user_id)
}

fn encode_snapshot(snapshot: &UserSnapshot) -> Result<String, CacheError> {
    serde_json::to_string(snapshot).map_err(|e| CacheError::Serialization {
        reason: e.to_string(),
    })
}

fn decode_snapshot(raw: &str) -> Result<UserSnapshot, CacheError> {
    serde_json::from_str(raw).map_err(|e| CacheError::Serialization {
        reason: e.to_string(),
    })
}

/// Adapter diagnostics for the cache status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CacheDiagnostics {
    pub available: bool,
    /// Total keys in the backend; `None` when unavailable or on error.
    pub key_count: Option<u64>,
    pub ttl_seconds: u64,
}

/// Fail-open cache of per-user [`UserSnapshot`]s.
///
/// Availability is decided once, at startup: either the adapter is handed
/// a probed backend, or it is constructed disabled and every operation is
/// a no-op for the process lifetime. There is no re-probing or
/// reconnection.
pub struct SnapshotCache {
    backend: Option<Arc<dyn CacheBackend>>,
    ttl: Duration,
}

impl SnapshotCache {
    /// Probe the backend once and build the adapter.
    ///
    /// A failed probe puts the adapter permanently into degraded mode;
    /// record-store reads and writes proceed uncached.
    pub async fn connect(backend: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        match backend.probe().await {
            Ok(()) => {
                tracing::info!("Cache backend connected");
                Self {
                    backend: Some(backend),
                    ttl,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cache backend unreachable, running without cache");
                Self { backend: None, ttl }
            }
        }
    }

    /// Build a permanently degraded adapter (no backend at all).
    pub fn disabled(ttl: Duration) -> Self {
        Self { backend: None, ttl }
    }

    /// Whether the backend passed the startup probe.
    pub fn available(&self) -> bool {
        self.backend.is_some()
    }

    /// Configured TTL for cached snapshots.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up the cached snapshot for a user.
    ///
    /// Returns `None` on a miss, on a deserialization failure, or on any
    /// backend error. Never fails the read path.
    pub async fn get(&self, user_id: &str) -> Option<UserSnapshot> {
        let backend = self.backend.as_ref()?;

        let raw = match backend.get(&snapshot_key(user_id)).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        match decode_snapshot(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Cached snapshot undecodable, treating as miss");
                None
            }
        }
    }

    /// Store a snapshot for a user with the configured TTL.
    ///
    /// Best-effort: returns `false` without raising on any failure.
    pub async fn put(&self, user_id: &str, snapshot: &UserSnapshot) -> bool {
        let Some(backend) = self.backend.as_ref() else {
            return false;
        };

        let raw = match encode_snapshot(snapshot) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Snapshot serialization failed, not caching");
                return false;
            }
        };

        match backend.set(&snapshot_key(user_id), &raw, self.ttl).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Cache write failed");
                false
            }
        }
    }

    /// Delete the cached snapshot for a user.
    ///
    /// Returns the number of keys deleted; errors are logged and count as
    /// zero.
    pub async fn invalidate(&self, user_id: &str) -> u64 {
        let Some(backend) = self.backend.as_ref() else {
            return 0;
        };

        match backend.delete(&snapshot_key(user_id)).await {
            Ok(deleted) => deleted,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Cache invalidation failed");
                0
            }
        }
    }

    /// Adapter diagnostics: availability, key count, TTL.
    pub async fn diagnostics(&self) -> CacheDiagnostics {
        let key_count = match self.backend.as_ref() {
            Some(backend) => match backend.key_count().await {
                Ok(count) => Some(count),
                Err(e) => {
                    tracing::warn!(error = %e, "Cache key count failed");
                    None
                }
            },
            None => None,
        };

        CacheDiagnostics {
            available: self.available(),
            key_count,
            ttl_seconds: self.ttl.as_secs(),
        }
    }
}
