//! Durable persistence for the record collection.
//!
//! The record store treats persistence as an external collaborator: the
//! whole collection is handed to a [`RecordPersister`] after every
//! successful append. The file format is a single JSON array, rewritten
//! wholesale. An append-only log or embedded database could be swapped in
//! behind the same trait without touching the store contract.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use solvetrack_core::{SolvedRecord, StoreError};

/// Persistence collaborator for the record store.
#[async_trait]
pub trait RecordPersister: Send + Sync {
    /// Load the full record collection from the backing medium.
    ///
    /// A missing backing file is not an error: the store starts empty.
    async fn load(&self) -> Result<Vec<SolvedRecord>, StoreError>;

    /// Persist the full record collection.
    ///
    /// Must complete before `append` returns to its caller.
    async fn persist(&self, records: &[SolvedRecord]) -> Result<(), StoreError>;
}

// ============================================================================
// JSON FILE PERSISTER
// ============================================================================

/// Persists the record collection as a pretty-printed JSON array in a
/// single file.
#[derive(Debug, Clone)]
pub struct JsonFilePersister {
    path: PathBuf,
}

impl JsonFilePersister {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordPersister for JsonFilePersister {
    async fn load(&self) -> Result<Vec<SolvedRecord>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::LoadFailed {
                    reason: format!("{}: {}", self.path.display(), e),
                })
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                // Corrupt data file: start empty rather than refuse to boot.
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Data file is not valid JSON, starting with an empty store"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn persist(&self, records: &[SolvedRecord]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|e| StoreError::PersistFailed {
            reason: format!("serialize: {}", e),
        })?;

        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| StoreError::PersistFailed {
                reason: format!("{}: {}", self.path.display(), e),
            })
    }
}

// ============================================================================
// NULL PERSISTER
// ============================================================================

/// No-op persister for tests and ephemeral deployments.
#[derive(Debug, Clone, Default)]
pub struct NullPersister;

#[async_trait]
impl RecordPersister for NullPersister {
    async fn load(&self) -> Result<Vec<SolvedRecord>, StoreError> {
        Ok(Vec::new())
    }

    async fn persist(&self, _records: &[SolvedRecord]) -> Result<(), StoreError> {
        Ok(())
    }
}
