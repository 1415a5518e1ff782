//! Pass statistics tracking.
//!
//! Tracks and aggregates counters while a reconciliation pass runs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;
use std::time::Instant;

use crate::report::OutcomeStatus;

/// Statistics for one reconciliation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PassStatistics {
    /// Total number of conversations in the pass.
    #[serde(default)]
    pub conversations_total: u32,
    /// Number of conversations processed so far.
    #[serde(default)]
    pub conversations_processed: u32,
    /// Outcomes broken down by terminal status.
    #[serde(default)]
    pub outcomes_by_status: HashMap<String, u32>,
    /// Number of conversations whose decision failed to apply.
    #[serde(default)]
    pub failures: u32,
    /// Pass duration in seconds.
    #[serde(default)]
    pub duration_seconds: u64,
}

impl PassStatistics {
    /// Create new empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate progress percentage.
    #[must_use]
    pub fn progress_percentage(&self) -> f64 {
        if self.conversations_total == 0 {
            0.0
        } else {
            (f64::from(self.conversations_processed) / f64::from(self.conversations_total)) * 100.0
        }
    }

    /// Get count for a specific terminal status.
    #[must_use]
    pub fn outcome_count(&self, status: OutcomeStatus) -> u32 {
        self.outcomes_by_status
            .get(&status.to_string())
            .copied()
            .unwrap_or(0)
    }
}

/// Thread-safe tracker for accumulating statistics during a pass.
pub struct StatisticsTracker {
    conversations_total: AtomicU32,
    conversations_processed: AtomicU32,
    failures: AtomicU32,
    outcomes_by_status: RwLock<HashMap<OutcomeStatus, u32>>,
    start_time: Instant,
}

impl StatisticsTracker {
    /// Create a new tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            conversations_total: AtomicU32::new(0),
            conversations_processed: AtomicU32::new(0),
            failures: AtomicU32::new(0),
            outcomes_by_status: RwLock::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Create tracker with the pass total already known.
    #[must_use]
    pub fn with_total(total: u32) -> Self {
        let tracker = Self::new();
        tracker.conversations_total.store(total, Ordering::SeqCst);
        tracker
    }

    /// Increment processed count.
    pub fn increment_processed(&self, count: u32) {
        self.conversations_processed
            .fetch_add(count, Ordering::SeqCst);
    }

    /// Record a conversation's terminal status.
    pub fn record_outcome(&self, status: OutcomeStatus) {
        if status == OutcomeStatus::Failed {
            self.failures.fetch_add(1, Ordering::SeqCst);
        }
        if let Ok(mut map) = self.outcomes_by_status.write() {
            *map.entry(status).or_insert(0) += 1;
        }
    }

    /// Get current processed count.
    pub fn processed_count(&self) -> u32 {
        self.conversations_processed.load(Ordering::SeqCst)
    }

    /// Get elapsed duration in seconds.
    pub fn elapsed_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Snapshot current statistics.
    pub fn snapshot(&self) -> PassStatistics {
        let outcomes_by_status = self
            .outcomes_by_status
            .read()
            .map(|map| map.iter().map(|(k, v)| (k.to_string(), *v)).collect())
            .unwrap_or_default();

        PassStatistics {
            conversations_total: self.conversations_total.load(Ordering::SeqCst),
            conversations_processed: self.conversations_processed.load(Ordering::SeqCst),
            outcomes_by_status,
            failures: self.failures.load(Ordering::SeqCst),
            duration_seconds: self.elapsed_seconds(),
        }
    }
}

impl Default for StatisticsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_statistics_default() {
        let stats = PassStatistics::default();
        assert_eq!(stats.conversations_total, 0);
        assert_eq!(stats.failures, 0);
        assert!(stats.outcomes_by_status.is_empty());
    }

    #[test]
    fn test_progress_percentage() {
        let mut stats = PassStatistics::new();
        stats.conversations_total = 100;
        stats.conversations_processed = 25;
        assert!((stats.progress_percentage() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_total_progress() {
        let stats = PassStatistics::default();
        assert!((stats.progress_percentage() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tracker_outcomes() {
        let tracker = StatisticsTracker::with_total(4);

        tracker.record_outcome(OutcomeStatus::Adopted);
        tracker.record_outcome(OutcomeStatus::Adopted);
        tracker.record_outcome(OutcomeStatus::Merged);
        tracker.record_outcome(OutcomeStatus::Failed);
        tracker.increment_processed(4);

        let stats = tracker.snapshot();
        assert_eq!(stats.conversations_total, 4);
        assert_eq!(stats.conversations_processed, 4);
        assert_eq!(stats.outcome_count(OutcomeStatus::Adopted), 2);
        assert_eq!(stats.outcome_count(OutcomeStatus::Merged), 1);
        assert_eq!(stats.outcome_count(OutcomeStatus::Unchanged), 0);
        assert_eq!(stats.failures, 1);
    }

    #[test]
    fn test_snapshot_serializes_status_keys() {
        let tracker = StatisticsTracker::new();
        tracker.record_outcome(OutcomeStatus::Unregistered);

        let stats = tracker.snapshot();
        assert_eq!(stats.outcomes_by_status.get("unregistered"), Some(&1));

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("unregistered"));
    }
}
