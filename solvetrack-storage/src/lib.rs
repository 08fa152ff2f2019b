//! SolveTrack Storage - Record Store and Cache Adapter
//!
//! Two narrow interfaces over external state:
//!
//! - [`RecordStore`]: the canonical, append-only sequence of solved-problem
//!   records, persisted through a pluggable [`RecordPersister`].
//! - [`SnapshotCache`]: a fail-open adapter over an external key/value cache
//!   with TTL support, keyed by user identity.
//!
//! The cache is strictly an accelerator: every cached value is a derived
//! snapshot that can be rebuilt from the record store.

pub mod cache;
pub mod persist;
pub mod store;

pub use cache::{
    snapshot_key, CacheBackend, CacheDiagnostics, MemoryBackend, RedisBackend, RedisConfig,
    SnapshotCache,
};
pub use persist::{JsonFilePersister, NullPersister, RecordPersister};
pub use store::RecordStore;
