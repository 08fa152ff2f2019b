//! Error types for SolveTrack operations

use thiserror::Error;

/// Validation errors.
///
/// Raised before any mutation takes place; a failed validation leaves the
/// store untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },
}

/// Record store errors.
///
/// The only error class that is fatal to a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Failed to persist record collection: {reason}")]
    PersistFailed { reason: String },

    #[error("Failed to load record collection: {reason}")]
    LoadFailed { reason: String },
}

/// Cache adapter errors.
///
/// Never surfaced to callers of the read or write paths; the adapter
/// recovers locally and degrades to a cache miss.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache backend error: {reason}")]
    Backend { reason: String },

    #[error("Cache serialization error: {reason}")]
    Serialization { reason: String },

    #[error("Cache backend unavailable")]
    Unavailable,
}

/// Top-level error type aggregating all error classes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Result type alias used throughout SolveTrack.
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_error_from_variants() {
        let validation = TrackerError::from(ValidationError::RequiredFieldMissing {
            field: "title".to_string(),
        });
        assert!(matches!(validation, TrackerError::Validation(_)));

        let store = TrackerError::from(StoreError::PersistFailed {
            reason: "disk full".to_string(),
        });
        assert!(matches!(store, TrackerError::Store(_)));

        let cache = TrackerError::from(CacheError::Unavailable);
        assert!(matches!(cache, TrackerError::Cache(_)));
    }

    #[test]
    fn test_validation_error_display_names_field() {
        let err = ValidationError::RequiredFieldMissing {
            field: "user_id".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("user_id"));
        assert!(msg.contains("Required field missing"));
    }

    #[test]
    fn test_cache_error_display() {
        let err = CacheError::Backend {
            reason: "connection refused".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("connection refused"));
    }
}
