//! Query Service - cache-aside orchestration.
//!
//! The only component with a genuine design contract: reads populate the
//! cache, writes invalidate it, and every path works unchanged when the
//! cache backend is gone.
//!
//! - Writes go to the record store, then invalidate the affected user's
//!   cache entry. This is the single write path and the sole trigger for
//!   invalidation.
//! - Reads ask the cache first; a hit is returned as-is, a miss is
//!   recomputed from the store, cached best-effort, and returned.
//!
//! Two simultaneous reads on a miss may both recompute and both `put`;
//! last write wins on the cache key. Both recomputations read the same
//! store state, so this race is harmless and deliberately unlocked.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use solvetrack_core::{NewSolve, SolvedRecord, TrackerResult, UserSnapshot, UserStats};
use solvetrack_storage::{RecordStore, SnapshotCache};

// ============================================================================
// SNAPSHOT ORIGIN
// ============================================================================

/// Where a returned snapshot came from.
///
/// Serialized as `"cache"` / `"api"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum SnapshotSource {
    #[serde(rename = "cache")]
    Cache,
    #[serde(rename = "api")]
    Recomputed,
}

// ============================================================================
// QUERY SERVICE
// ============================================================================

/// Orchestrates reads and writes across the record store and the cache
/// adapter.
pub struct QueryService {
    store: Arc<RecordStore>,
    cache: Arc<SnapshotCache>,
}

impl QueryService {
    pub fn new(store: Arc<RecordStore>, cache: Arc<SnapshotCache>) -> Self {
        Self { store, cache }
    }

    /// The cache adapter, for diagnostics and explicit cache management.
    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Record a solved problem.
    ///
    /// Appends to the store, then unconditionally invalidates the user's
    /// cache entry (a no-op when the adapter is degraded). Returns the
    /// stored record.
    pub async fn record_solution(&self, input: NewSolve) -> TrackerResult<SolvedRecord> {
        let record = self.store.append(input).await?;
        self.cache.invalidate(&record.user_id).await;
        Ok(record)
    }

    /// Get a user's snapshot, cache-aside.
    ///
    /// A cache hit is returned untouched. On a miss the snapshot is
    /// recomputed from the store (newest first, stable on ties), cached
    /// best-effort, and returned tagged [`SnapshotSource::Recomputed`].
    /// An unknown user yields a valid empty snapshot, which is cached like
    /// any other.
    pub async fn get_user_problems(&self, user_id: &str) -> (UserSnapshot, SnapshotSource) {
        if let Some(snapshot) = self.cache.get(user_id).await {
            tracing::debug!(user_id, "Snapshot served from cache");
            return (snapshot, SnapshotSource::Cache);
        }

        let records = self.store.for_user(user_id).await;
        let snapshot = UserSnapshot::compute(records, Utc::now());
        self.cache.put(user_id, &snapshot).await;
        tracing::debug!(user_id, total = snapshot.total_solved, "Snapshot recomputed");
        (snapshot, SnapshotSource::Recomputed)
    }

    /// Every record in insertion order. Bypasses the cache entirely.
    pub async fn get_all_problems(&self) -> Vec<SolvedRecord> {
        self.store.all().await
    }

    /// Per-user statistics, recomputed from the store on every call.
    pub async fn get_user_stats(&self, user_id: &str) -> UserStats {
        let records = self.store.for_user(user_id).await;
        UserStats::compute(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use solvetrack_storage::{MemoryBackend, NullPersister};

    async fn service_with_cache() -> QueryService {
        let store = Arc::new(RecordStore::open(Arc::new(NullPersister)).await.unwrap());
        let cache = Arc::new(
            SnapshotCache::connect(Arc::new(MemoryBackend::new()), Duration::from_secs(60)).await,
        );
        QueryService::new(store, cache)
    }

    async fn service_without_cache() -> QueryService {
        let store = Arc::new(RecordStore::open(Arc::new(NullPersister)).await.unwrap());
        let cache = Arc::new(SnapshotCache::disabled(Duration::from_secs(60)));
        QueryService::new(store, cache)
    }

    #[tokio::test]
    async fn test_ids_strictly_increase() {
        let service = service_with_cache().await;

        let mut last = 0;
        for i in 0..5 {
            let record = service
                .record_solution(NewSolve::new("alice", format!("Problem {}", i)))
                .await
                .unwrap();
            assert!(record.id > last);
            last = record.id;
        }
    }

    #[tokio::test]
    async fn test_second_read_hits_cache() {
        let service = service_with_cache().await;
        service
            .record_solution(NewSolve::new("alice", "Two Sum"))
            .await
            .unwrap();

        let (first, source) = service.get_user_problems("alice").await;
        assert_eq!(source, SnapshotSource::Recomputed);

        let (second, source) = service.get_user_problems("alice").await;
        assert_eq!(source, SnapshotSource::Cache);
        assert_eq!(second.total_solved, first.total_solved);
        assert_eq!(second.problems, first.problems);
    }

    #[tokio::test]
    async fn test_write_invalidates_and_read_sees_new_record() {
        let service = service_with_cache().await;
        service
            .record_solution(NewSolve::new("alice", "Two Sum"))
            .await
            .unwrap();

        // Warm the cache.
        let (_, source) = service.get_user_problems("alice").await;
        assert_eq!(source, SnapshotSource::Recomputed);

        let new = service
            .record_solution(NewSolve::new("alice", "Three Sum"))
            .await
            .unwrap();

        let (snapshot, source) = service.get_user_problems("alice").await;
        assert_eq!(source, SnapshotSource::Recomputed);
        assert_eq!(snapshot.total_solved, 2);
        assert!(snapshot.problems.iter().any(|r| r.id == new.id));
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let service = service_with_cache().await;
        service
            .record_solution(NewSolve::new("alice", "A"))
            .await
            .unwrap();
        service
            .record_solution(NewSolve::new("bob", "B"))
            .await
            .unwrap();

        // Warm both caches.
        service.get_user_problems("alice").await;
        service.get_user_problems("bob").await;

        // A write for alice must not disturb bob's entry.
        service
            .record_solution(NewSolve::new("alice", "C"))
            .await
            .unwrap();

        let (_, bob_source) = service.get_user_problems("bob").await;
        assert_eq!(bob_source, SnapshotSource::Cache);

        let (alice, alice_source) = service.get_user_problems("alice").await;
        assert_eq!(alice_source, SnapshotSource::Recomputed);
        assert_eq!(alice.total_solved, 2);
    }

    #[tokio::test]
    async fn test_fail_open_without_cache() {
        let service = service_without_cache().await;

        service
            .record_solution(NewSolve::new("alice", "Two Sum"))
            .await
            .unwrap();

        // Every read recomputes; nothing errors.
        for _ in 0..3 {
            let (snapshot, source) = service.get_user_problems("alice").await;
            assert_eq!(source, SnapshotSource::Recomputed);
            assert_eq!(snapshot.total_solved, 1);
        }
    }

    #[tokio::test]
    async fn test_unknown_user_gets_empty_snapshot() {
        let service = service_with_cache().await;

        let (snapshot, source) = service.get_user_problems("nonexistent").await;
        assert_eq!(source, SnapshotSource::Recomputed);
        assert_eq!(snapshot.total_solved, 0);
        assert!(snapshot.problems.is_empty());

        // Absence is a valid, cacheable snapshot.
        let (_, source) = service.get_user_problems("nonexistent").await;
        assert_eq!(source, SnapshotSource::Cache);
    }

    #[tokio::test]
    async fn test_stats_are_never_cached() {
        let service = service_with_cache().await;
        service
            .record_solution(
                NewSolve::new("alice", "Two Sum")
                    .with_difficulty("Easy")
                    .with_platform("LeetCode"),
            )
            .await
            .unwrap();

        let stats = service.get_user_stats("alice").await;
        assert_eq!(stats.total_solved, 1);
        assert_eq!(stats.difficulty_breakdown.get("Easy"), Some(&1));

        service
            .record_solution(NewSolve::new("alice", "Unlabeled"))
            .await
            .unwrap();

        let stats = service.get_user_stats("alice").await;
        assert_eq!(stats.total_solved, 2);
        assert_eq!(stats.difficulty_breakdown.get("Unknown"), Some(&1));
        assert_eq!(stats.platform_breakdown.get("Unknown"), Some(&1));
    }

    #[tokio::test]
    async fn test_all_problems_bypasses_cache() {
        let service = service_with_cache().await;
        service
            .record_solution(NewSolve::new("alice", "A"))
            .await
            .unwrap();
        service
            .record_solution(NewSolve::new("bob", "B"))
            .await
            .unwrap();

        let all = service.get_all_problems().await;
        assert_eq!(all.len(), 2);
        // Insertion order, oldest first.
        assert_eq!(all[0].id, 1);
        assert_eq!(all[1].id, 2);
    }

    #[test]
    fn test_source_wire_format() {
        assert_eq!(
            serde_json::to_string(&SnapshotSource::Cache).unwrap(),
            "\"cache\""
        );
        assert_eq!(
            serde_json::to_string(&SnapshotSource::Recomputed).unwrap(),
            "\"api\""
        );
    }
}
