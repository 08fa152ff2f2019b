//! In-memory cache backend with TTL expiry.
//!
//! Used by tests and by deployments that want per-process caching without
//! an external server. Expired entries are dropped lazily on access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use solvetrack_core::CacheError;

use super::traits::CacheBackend;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// Process-local cache backend backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn probe(&self) -> Result<(), CacheError> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let expired = {
            let entries = self.entries.read().expect("cache lock poisoned");
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.value.clone()))
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            self.entries
                .write()
                .expect("cache lock poisoned")
                .remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries
            .write()
            .expect("cache lock poisoned")
            .insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<u64, CacheError> {
        let removed = self
            .entries
            .write()
            .expect("cache lock poisoned")
            .remove(key);
        Ok(removed.map_or(0, |_| 1))
    }

    async fn key_count(&self) -> Result<u64, CacheError> {
        let now = Instant::now();
        let entries = self.entries.read().expect("cache lock poisoned");
        Ok(entries.values().filter(|e| e.expires_at > now).count() as u64)
    }
}
