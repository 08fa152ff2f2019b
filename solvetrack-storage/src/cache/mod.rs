//! Fail-open cache layer for per-user snapshots.
//!
//! The adapter wraps an external key/value backend with TTL support. A
//! single connectivity probe runs at startup; if it fails, the adapter
//! stays in degraded mode for the process lifetime and every operation
//! becomes a no-op. Runtime backend errors are logged and swallowed, never
//! propagated: cache unavailability must never block reads or writes of
//! the record store.
//!
//! Entry lifecycle for one user: `ABSENT -> (put on recomputation) ->
//! PRESENT -> (invalidate on write, or TTL expiry) -> ABSENT`. Entries are
//! replaced wholesale, never edited in place.

pub mod adapter;
pub mod memory;
pub mod redis_backend;
pub mod traits;

pub use adapter::{snapshot_key, CacheDiagnostics, SnapshotCache};
pub use memory::MemoryBackend;
pub use redis_backend::{RedisBackend, RedisConfig};
pub use traits::CacheBackend;
