//! Per-pass outcome reporting.
//!
//! Each conversation leaves a pass in exactly one terminal state, and
//! failures are collected here instead of being thrown mid-batch.

use serde::{Deserialize, Serialize};
use std::fmt;

use linnet_core::{ConversationId, E164};

use crate::record::ConversationRecord;
use crate::statistics::PassStatistics;

/// Terminal state of one conversation within one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Identifiers were attached to the conversation's record.
    Adopted,
    /// Two records were merged into one.
    Merged,
    /// The record was marked unregistered.
    Unregistered,
    /// Nothing needed to change (or another writer already handled it).
    Unchanged,
    /// Nothing to reconcile (no phone number).
    Skipped,
    /// The decision could not be applied; retried on a later pass.
    Failed,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OutcomeStatus::Adopted => "adopted",
            OutcomeStatus::Merged => "merged",
            OutcomeStatus::Unregistered => "unregistered",
            OutcomeStatus::Unchanged => "unchanged",
            OutcomeStatus::Skipped => "skipped",
            OutcomeStatus::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

/// Result of reconciling a single conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationOutcome {
    /// The conversation.
    pub conversation_id: ConversationId,
    /// Its phone number at pass time, if any.
    pub e164: Option<E164>,
    /// Terminal state.
    pub status: OutcomeStatus,
    /// Error message (if failed).
    pub error: Option<String>,
}

impl ConversationOutcome {
    /// Create an outcome for a conversation.
    #[must_use]
    pub fn new(conversation: &ConversationRecord, status: OutcomeStatus) -> Self {
        Self {
            conversation_id: conversation.id,
            e164: conversation.e164.clone(),
            status,
            error: None,
        }
    }

    /// Create a failed outcome.
    #[must_use]
    pub fn failed(conversation: &ConversationRecord, error: String) -> Self {
        Self {
            conversation_id: conversation.id,
            e164: conversation.e164.clone(),
            status: OutcomeStatus::Failed,
            error: Some(error),
        }
    }
}

/// Everything one reconciliation pass produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassSummary {
    /// One outcome per input conversation.
    pub outcomes: Vec<ConversationOutcome>,
    /// Aggregated pass statistics.
    pub statistics: PassStatistics,
}

impl PassSummary {
    /// Number of conversations that ended the pass in `status`.
    #[must_use]
    pub fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Whether any conversation failed this pass.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.status == OutcomeStatus::Failed)
    }

    /// The failed outcomes, for logging or retry bookkeeping.
    pub fn failures(&self) -> impl Iterator<Item = &ConversationOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn conversation() -> ConversationRecord {
        ConversationRecord::new(ConversationId::new(), Utc::now())
            .with_e164(E164::parse("+15551234567").unwrap())
    }

    #[test]
    fn test_outcome_carries_conversation_identity() {
        let conv = conversation();
        let outcome = ConversationOutcome::new(&conv, OutcomeStatus::Adopted);
        assert_eq!(outcome.conversation_id, conv.id);
        assert_eq!(outcome.e164, conv.e164);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_failed_outcome_keeps_error_text() {
        let conv = conversation();
        let outcome = ConversationOutcome::failed(&conv, "row locked".to_string());
        assert_eq!(outcome.status, OutcomeStatus::Failed);
        assert_eq!(outcome.error.as_deref(), Some("row locked"));
    }

    #[test]
    fn test_summary_counts() {
        let conv = conversation();
        let summary = PassSummary {
            outcomes: vec![
                ConversationOutcome::new(&conv, OutcomeStatus::Adopted),
                ConversationOutcome::new(&conv, OutcomeStatus::Unchanged),
                ConversationOutcome::failed(&conv, "boom".to_string()),
            ],
            statistics: PassStatistics::default(),
        };

        assert_eq!(summary.count(OutcomeStatus::Adopted), 1);
        assert_eq!(summary.count(OutcomeStatus::Merged), 0);
        assert!(summary.has_failures());
        assert_eq!(summary.failures().count(), 1);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(OutcomeStatus::Adopted.to_string(), "adopted");
        assert_eq!(OutcomeStatus::Unregistered.to_string(), "unregistered");
    }
}
