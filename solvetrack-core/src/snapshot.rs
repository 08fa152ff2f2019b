//! Derived, cacheable views over the record store.
//!
//! A [`UserSnapshot`] is never authoritative: it is always reconstructible
//! from the canonical record sequence, which is what makes it safe to cache.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::SolvedRecord;

/// Label substituted for empty difficulty/platform values in statistics.
pub const UNKNOWN_LABEL: &str = "Unknown";

// ============================================================================
// USER SNAPSHOT
// ============================================================================

/// Materialized per-user view: every solved record, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserSnapshot {
    pub total_solved: u64,
    pub problems: Vec<SolvedRecord>,
    pub computed_at: DateTime<Utc>,
}

impl UserSnapshot {
    /// Build a snapshot from a user's records in insertion order.
    ///
    /// Sorts by `solved_at` descending. The sort is stable, so records with
    /// identical timestamps keep their original insertion order.
    pub fn compute(mut records: Vec<SolvedRecord>, computed_at: DateTime<Utc>) -> Self {
        records.sort_by(|a, b| b.solved_at.cmp(&a.solved_at));
        Self {
            total_solved: records.len() as u64,
            problems: records,
            computed_at,
        }
    }
}

// ============================================================================
// USER STATISTICS
// ============================================================================

/// Per-user statistics grouped by difficulty and platform.
///
/// Always recomputed from the record store, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserStats {
    pub total_solved: u64,
    pub difficulty_breakdown: BTreeMap<String, u64>,
    pub platform_breakdown: BTreeMap<String, u64>,
}

impl UserStats {
    /// Build statistics from a user's records.
    ///
    /// Empty difficulty/platform values are counted under
    /// [`UNKNOWN_LABEL`].
    pub fn compute(records: &[SolvedRecord]) -> Self {
        let mut difficulty_breakdown = BTreeMap::new();
        let mut platform_breakdown = BTreeMap::new();

        for record in records {
            *difficulty_breakdown
                .entry(label_or_unknown(&record.difficulty))
                .or_insert(0) += 1;
            *platform_breakdown
                .entry(label_or_unknown(&record.platform))
                .or_insert(0) += 1;
        }

        Self {
            total_solved: records.len() as u64,
            difficulty_breakdown,
            platform_breakdown,
        }
    }
}

fn label_or_unknown(value: &str) -> String {
    if value.trim().is_empty() {
        UNKNOWN_LABEL.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NewSolve;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn record_at(id: u64, title: &str, secs: i64) -> SolvedRecord {
        let solved_at = Utc.timestamp_opt(secs, 0).unwrap();
        NewSolve::new("alice", title).into_record(id, solved_at)
    }

    #[test]
    fn test_snapshot_sorts_newest_first() {
        let records = vec![
            record_at(1, "oldest", 100),
            record_at(2, "newest", 300),
            record_at(3, "middle", 200),
        ];

        let snapshot = UserSnapshot::compute(records, Utc::now());

        assert_eq!(snapshot.total_solved, 3);
        let titles: Vec<&str> = snapshot.problems.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_snapshot_ties_keep_insertion_order() {
        // Equal timestamps: stable sort keeps original insertion order.
        let records = vec![
            record_at(1, "first", 100),
            record_at(2, "second", 100),
            record_at(3, "third", 100),
        ];

        let snapshot = UserSnapshot::compute(records, Utc::now());

        let ids: Vec<u64> = snapshot.problems.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_snapshot_is_valid() {
        let snapshot = UserSnapshot::compute(Vec::new(), Utc::now());
        assert_eq!(snapshot.total_solved, 0);
        assert!(snapshot.problems.is_empty());
    }

    #[test]
    fn test_stats_substitute_unknown() {
        let mut with_labels = record_at(1, "a", 100);
        with_labels.difficulty = "Easy".to_string();
        with_labels.platform = "LeetCode".to_string();
        let without_labels = record_at(2, "b", 200);

        let stats = UserStats::compute(&[with_labels, without_labels]);

        assert_eq!(stats.total_solved, 2);
        assert_eq!(stats.difficulty_breakdown.get("Easy"), Some(&1));
        assert_eq!(stats.difficulty_breakdown.get(UNKNOWN_LABEL), Some(&1));
        assert_eq!(stats.platform_breakdown.get("LeetCode"), Some(&1));
        assert_eq!(stats.platform_breakdown.get(UNKNOWN_LABEL), Some(&1));
    }

    #[test]
    fn test_stats_empty_records() {
        let stats = UserStats::compute(&[]);
        assert_eq!(stats.total_solved, 0);
        assert!(stats.difficulty_breakdown.is_empty());
        assert!(stats.platform_breakdown.is_empty());
    }

    proptest! {
        #[test]
        fn prop_snapshot_ordering_and_total(timestamps in proptest::collection::vec(0i64..1_000_000, 0..50)) {
            let records: Vec<SolvedRecord> = timestamps
                .iter()
                .enumerate()
                .map(|(i, secs)| record_at(i as u64 + 1, "p", *secs))
                .collect();

            let snapshot = UserSnapshot::compute(records.clone(), Utc::now());

            prop_assert_eq!(snapshot.total_solved as usize, records.len());
            // Descending timestamps throughout.
            for pair in snapshot.problems.windows(2) {
                prop_assert!(pair[0].solved_at >= pair[1].solved_at);
                // Ties keep insertion order (ids are insertion-ordered).
                if pair[0].solved_at == pair[1].solved_at {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }

        #[test]
        fn prop_stats_counts_sum_to_total(labels in proptest::collection::vec("[a-c]{0,1}", 0..50)) {
            let records: Vec<SolvedRecord> = labels
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    let mut r = record_at(i as u64 + 1, "p", 100);
                    r.difficulty = label.clone();
                    r
                })
                .collect();

            let stats = UserStats::compute(&records);
            let sum: u64 = stats.difficulty_breakdown.values().sum();
            prop_assert_eq!(sum, stats.total_solved);
        }
    }
}
