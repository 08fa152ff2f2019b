//! Redis-backed cache implementation.
//!
//! Uses a multiplexed async connection. The connection is established once
//! at startup, bounded by a connect timeout; there is no reconnection
//! logic. If the backend drops away later, individual commands fail and
//! the adapter treats those failures as misses.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use solvetrack_core::CacheError;

use super::traits::CacheBackend;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Redis connection configuration, loaded from environment variables with
/// development defaults.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis server hostname.
    pub host: String,
    /// Redis server port.
    pub port: u16,
    /// Logical database index.
    pub db: u32,
    /// TTL for cached snapshots, in seconds.
    pub ttl_secs: u64,
    /// Connect timeout for the startup probe.
    pub connect_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            db: 0,
            ttl_secs: 3600, // 1 hour
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisConfig {
    /// Create a RedisConfig from environment variables.
    ///
    /// Environment variables:
    /// - `REDIS_HOST`: Redis hostname (default: "localhost")
    /// - `REDIS_PORT`: Redis port (default: 6379)
    /// - `REDIS_DB`: logical database index (default: 0)
    /// - `CACHE_TTL`: snapshot TTL in seconds (default: 3600)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("REDIS_HOST").unwrap_or(defaults.host);
        let port = std::env::var("REDIS_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        let db = std::env::var("REDIS_DB")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.db);
        let ttl_secs = std::env::var("CACHE_TTL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.ttl_secs);

        Self {
            host,
            port,
            db,
            ttl_secs,
            connect_timeout: defaults.connect_timeout,
        }
    }

    /// Connection URL for the redis client.
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }

    /// Snapshot TTL as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

// ============================================================================
// BACKEND
// ============================================================================

/// Cache backend speaking to a Redis server.
#[derive(Clone)]
pub struct RedisBackend {
    conn: MultiplexedConnection,
}

impl RedisBackend {
    /// Connect to the configured Redis server.
    ///
    /// Establishing the multiplexed connection doubles as the reachability
    /// check; the caller decides what to do when this fails.
    pub async fn connect(config: &RedisConfig) -> Result<Self, CacheError> {
        let client = redis::Client::open(config.url()).map_err(backend_err)?;

        let conn = tokio::time::timeout(
            config.connect_timeout,
            client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| CacheError::Backend {
            reason: format!("connect to {} timed out", config.url()),
        })?
        .map_err(backend_err)?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn probe(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(backend_err)?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await.map_err(backend_err)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        // SETEX takes whole seconds; round sub-second TTLs up to one.
        let secs = ttl.as_secs().max(1);
        let _: () = conn.set_ex(key, value, secs).await.map_err(backend_err)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<u64, CacheError> {
        let mut conn = self.conn.clone();
        let deleted: u64 = conn.del(key).await.map_err(backend_err)?;
        Ok(deleted)
    }

    async fn key_count(&self) -> Result<u64, CacheError> {
        let mut conn = self.conn.clone();
        let count: u64 = redis::cmd("DBSIZE")
            .query_async(&mut conn)
            .await
            .map_err(backend_err)?;
        Ok(count)
    }
}

fn backend_err(e: redis::RedisError) -> CacheError {
    CacheError::Backend {
        reason: e.to_string(),
    }
}
