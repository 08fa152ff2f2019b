//! SolveTrack Core - Domain Types
//!
//! Pure data structures and the error taxonomy for the solved-problems
//! tracker. All other crates depend on this. This crate contains only data
//! types and their derivations - no I/O.

use chrono::{DateTime, Utc};

pub mod error;
pub mod record;
pub mod snapshot;

pub use error::{CacheError, StoreError, TrackerError, TrackerResult, ValidationError};
pub use record::{NewSolve, SolvedRecord};
pub use snapshot::{UserSnapshot, UserStats};

/// Timestamp type using UTC timezone. Serialized as ISO-8601.
pub type Timestamp = DateTime<Utc>;

/// Record identifier: monotonically increasing, assigned once, never reused.
pub type RecordId = u64;
