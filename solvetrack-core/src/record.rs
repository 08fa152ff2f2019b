//! Solved-problem records and the write-path input type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::RecordId;

// ============================================================================
// SOLVED RECORD
// ============================================================================

/// A single solved problem, as stored in the record store.
///
/// Invariants:
/// - `id` is assigned once by the store, never reused, strictly increasing
///   in insertion order.
/// - `user_id` and `title` are always present and non-empty.
/// - `solved_at` is set at creation and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SolvedRecord {
    pub id: RecordId,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub notes: String,
    pub solved_at: DateTime<Utc>,
}

// ============================================================================
// WRITE-PATH INPUT
// ============================================================================

/// Input payload for recording a solved problem.
///
/// `user_id` and `title` are required; the remaining fields default to the
/// empty string when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewSolve {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub notes: String,
}

impl NewSolve {
    /// Create a new input with the two required fields set.
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the problem URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the difficulty label.
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    /// Set the platform label.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Set free-form notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Validate the required fields.
    ///
    /// Fails if `user_id` or `title` is missing or blank. Must be called
    /// before any mutation of the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: "user_id".to_string(),
            });
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: "title".to_string(),
            });
        }
        Ok(())
    }

    /// Materialize a record with the given id and timestamp.
    pub fn into_record(self, id: RecordId, solved_at: DateTime<Utc>) -> SolvedRecord {
        SolvedRecord {
            id,
            user_id: self.user_id,
            title: self.title,
            url: self.url,
            difficulty: self.difficulty,
            platform: self.platform,
            notes: self.notes,
            solved_at,
        }
    }
}
