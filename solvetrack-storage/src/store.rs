//! Append-only record store with durable-before-return appends.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use solvetrack_core::{NewSolve, RecordId, SolvedRecord, TrackerResult};

use crate::persist::RecordPersister;

struct StoreInner {
    records: Vec<SolvedRecord>,
    next_id: RecordId,
}

/// The canonical ordered sequence of solved-problem records.
///
/// Append-only: no update or delete operations exist. Id assignment and the
/// persist step run under a single mutex, so no two records can receive the
/// same id and every successful `append` is durable before it returns.
pub struct RecordStore {
    inner: Mutex<StoreInner>,
    persister: Arc<dyn RecordPersister>,
}

impl RecordStore {
    /// Open the store, loading any previously persisted records.
    pub async fn open(persister: Arc<dyn RecordPersister>) -> TrackerResult<Self> {
        let records = persister.load().await?;
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        if !records.is_empty() {
            tracing::info!(count = records.len(), "Loaded persisted records");
        }
        Ok(Self {
            inner: Mutex::new(StoreInner { records, next_id }),
            persister,
        })
    }

    /// Append a new record and return it.
    ///
    /// Validates the input first; a validation failure leaves the store and
    /// the id counter untouched. On a persistence failure the in-memory
    /// append is rolled back, so memory and file never diverge.
    pub async fn append(&self, input: NewSolve) -> TrackerResult<SolvedRecord> {
        input.validate()?;

        let mut inner = self.inner.lock().await;
        let record = input.into_record(inner.next_id, Utc::now());
        inner.records.push(record.clone());

        if let Err(e) = self.persister.persist(&inner.records).await {
            inner.records.pop();
            return Err(e.into());
        }

        inner.next_id += 1;
        tracing::debug!(id = record.id, user_id = %record.user_id, "Recorded solved problem");
        Ok(record)
    }

    /// Every record in insertion order, oldest first.
    pub async fn all(&self) -> Vec<SolvedRecord> {
        self.inner.lock().await.records.clone()
    }

    /// Records for one user, insertion order preserved. Callers re-sort as
    /// needed.
    pub async fn for_user(&self, user_id: &str) -> Vec<SolvedRecord> {
        self.inner
            .lock()
            .await
            .records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Total number of records in the store.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{JsonFilePersister, NullPersister};
    use solvetrack_core::{StoreError, TrackerError};

    async fn empty_store() -> RecordStore {
        RecordStore::open(Arc::new(NullPersister)).await.unwrap()
    }

    #[tokio::test]
    async fn test_append_assigns_sequential_ids() {
        let store = empty_store().await;

        let first = store.append(NewSolve::new("alice", "Two Sum")).await.unwrap();
        let second = store.append(NewSolve::new("bob", "Three Sum")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_validation_failure_leaves_counter_unchanged() {
        let store = empty_store().await;

        let err = store.append(NewSolve::new("alice", "")).await.unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
        assert!(store.is_empty().await);

        // Next valid append still gets id 1.
        let record = store.append(NewSolve::new("alice", "Two Sum")).await.unwrap();
        assert_eq!(record.id, 1);
    }

    #[tokio::test]
    async fn test_for_user_filters_and_preserves_order() {
        let store = empty_store().await;
        store.append(NewSolve::new("alice", "A")).await.unwrap();
        store.append(NewSolve::new("bob", "B")).await.unwrap();
        store.append(NewSolve::new("alice", "C")).await.unwrap();

        let alice = store.for_user("alice").await;
        let titles: Vec<&str> = alice.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);

        assert!(store.for_user("nobody").await.is_empty());
        assert_eq!(store.all().await.len(), 3);
    }

    #[tokio::test]
    async fn test_append_is_durable_before_return() {
        let dir = tempfile::tempdir().unwrap();
        let persister = Arc::new(JsonFilePersister::new(dir.path().join("records.json")));
        let store = RecordStore::open(persister.clone()).await.unwrap();

        let record = store.append(NewSolve::new("alice", "Two Sum")).await.unwrap();

        let on_disk = persister.load().await.unwrap();
        assert_eq!(on_disk, vec![record]);
    }

    #[tokio::test]
    async fn test_reopen_resumes_id_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        {
            let store = RecordStore::open(Arc::new(JsonFilePersister::new(&path)))
                .await
                .unwrap();
            store.append(NewSolve::new("alice", "A")).await.unwrap();
            store.append(NewSolve::new("alice", "B")).await.unwrap();
        }

        let store = RecordStore::open(Arc::new(JsonFilePersister::new(&path)))
            .await
            .unwrap();
        let record = store.append(NewSolve::new("alice", "C")).await.unwrap();
        assert_eq!(record.id, 3);
    }

    #[tokio::test]
    async fn test_persist_failure_rolls_back_append() {
        struct FailingPersister;

        #[async_trait::async_trait]
        impl RecordPersister for FailingPersister {
            async fn load(&self) -> Result<Vec<SolvedRecord>, StoreError> {
                Ok(Vec::new())
            }

            async fn persist(&self, _records: &[SolvedRecord]) -> Result<(), StoreError> {
                Err(StoreError::PersistFailed {
                    reason: "disk full".to_string(),
                })
            }
        }

        let store = RecordStore::open(Arc::new(FailingPersister)).await.unwrap();
        let err = store.append(NewSolve::new("alice", "A")).await.unwrap_err();
        assert!(matches!(err, TrackerError::Store(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_get_unique_ids() {
        let store = Arc::new(empty_store().await);

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .append(NewSolve::new("alice", format!("Problem {}", i)))
                    .await
                    .unwrap()
                    .id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}
