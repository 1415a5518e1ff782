//! Reconciliation orchestrator.
//!
//! The engine's entry point. A pass batches the input conversations'
//! phone numbers into one directory lookup, derives a merge decision per
//! conversation against the store's current records, and applies the
//! decisions concurrently. The lookup is the single suspension point
//! before any decision: every decision in a pass acts on the same
//! directory snapshot, never on data mixed in from a previous pass.
//!
//! Per-conversation work is independent once the snapshot is known. One
//! conversation's failure never blocks or rolls back its siblings;
//! failures are collected into the [`PassSummary`]. Mutations are
//! idempotent, so a pass aborted mid-flight leaves nothing to repair:
//! the next pass re-derives the same decisions as no-ops.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use linnet_core::{Aci, E164};
use linnet_directory::{DirectoryClient, LookupResponse};

use crate::config::ReconcilerConfig;
use crate::decision::MergeDecision;
use crate::error::ReconcileResult;
use crate::record::ConversationRecord;
use crate::report::{ConversationOutcome, OutcomeStatus, PassSummary};
use crate::resolver::{resolve, RecipientCandidate};
use crate::statistics::StatisticsTracker;
use crate::store::{ConversationKey, ConversationStore, StoreResult};

/// Reconciliation engine over a directory client and a conversation
/// store.
pub struct Reconciler {
    directory: Arc<dyn DirectoryClient>,
    store: Arc<dyn ConversationStore>,
    config: ReconcilerConfig,
}

impl Reconciler {
    /// Create a new reconciler with default configuration.
    #[must_use]
    pub fn new(directory: Arc<dyn DirectoryClient>, store: Arc<dyn ConversationStore>) -> Self {
        Self::with_config(directory, store, ReconcilerConfig::default())
    }

    /// Create with custom configuration.
    #[must_use]
    pub fn with_config(
        directory: Arc<dyn DirectoryClient>,
        store: Arc<dyn ConversationStore>,
        config: ReconcilerConfig,
    ) -> Self {
        Self {
            directory,
            store,
            config,
        }
    }

    /// Get configuration.
    #[must_use]
    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Run one reconciliation pass over the given conversations.
    ///
    /// The caller chooses which conversations are due; conversations
    /// without a phone number are skipped. Only a failed batch lookup
    /// aborts the pass; every other failure is local to one
    /// conversation and lands in the summary.
    #[instrument(skip_all, fields(conversations = conversations.len()))]
    pub async fn reconcile(
        &self,
        conversations: &[ConversationRecord],
    ) -> ReconcileResult<PassSummary> {
        let tracker = StatisticsTracker::with_total(conversations.len() as u32);

        let numbers: Vec<E164> = conversations
            .iter()
            .filter_map(|c| c.e164.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let response = if numbers.is_empty() {
            LookupResponse::new()
        } else {
            self.directory.batch_lookup(&numbers).await?
        };
        debug!(
            numbers = numbers.len(),
            resolved = response.len(),
            "Directory snapshot acquired"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let outcomes = join_all(conversations.iter().map(|conversation| {
            let semaphore = Arc::clone(&semaphore);
            let response = &response;
            let tracker = &tracker;
            async move {
                let _permit = semaphore.acquire().await.ok();
                let outcome = self.reconcile_one(conversation, response).await;
                tracker.record_outcome(outcome.status);
                tracker.increment_processed(1);
                outcome
            }
        }))
        .await;

        let statistics = tracker.snapshot();
        let summary = PassSummary {
            outcomes,
            statistics,
        };
        info!(
            total = conversations.len(),
            adopted = summary.count(OutcomeStatus::Adopted),
            merged = summary.count(OutcomeStatus::Merged),
            unregistered = summary.count(OutcomeStatus::Unregistered),
            unchanged = summary.count(OutcomeStatus::Unchanged),
            skipped = summary.count(OutcomeStatus::Skipped),
            failed = summary.count(OutcomeStatus::Failed),
            "Reconciliation pass complete"
        );
        Ok(summary)
    }

    /// Run one pass over the conversations the store reports as due for
    /// a registration refresh.
    pub async fn reconcile_stale(&self, limit: usize) -> ReconcileResult<PassSummary> {
        let stale = self.store.list_stale(limit).await?;
        self.reconcile(&stale).await
    }

    /// Reconcile a single conversation against the pass snapshot.
    async fn reconcile_one(
        &self,
        conversation: &ConversationRecord,
        response: &LookupResponse,
    ) -> ConversationOutcome {
        let Some(e164) = conversation.e164.clone() else {
            debug!(conversation_id = %conversation.id, "No phone number, nothing to reconcile");
            return ConversationOutcome::new(conversation, OutcomeStatus::Skipped);
        };

        let entry = response.resolved(&e164);

        // Directory has no account for the number, but the record holds
        // an ACI from a previous pass: confirm the account is really
        // gone before demoting.
        if !entry.has_account() {
            if let Some(prior) = conversation.aci {
                return self.confirm_unregistered(conversation, prior).await;
            }
        }

        let candidate = RecipientCandidate {
            e164,
            aci: entry.aci,
            pni: entry.pni,
        };

        let existing = match self.gather_existing(&candidate).await {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    conversation_id = %conversation.id,
                    error = %err,
                    "Store lookup failed"
                );
                return ConversationOutcome::failed(conversation, err.to_string());
            }
        };

        let decision = resolve(&existing, &candidate);
        debug!(
            conversation_id = %conversation.id,
            decision = decision.kind(),
            matches = existing.len(),
            "Merge decision resolved"
        );
        self.apply(conversation, decision).await
    }

    /// Existence-check fallback for a record whose ACI the batch lookup
    /// did not confirm. Only an explicit "gone" demotes the record; a
    /// failed probe leaves it in its last-known state.
    async fn confirm_unregistered(
        &self,
        conversation: &ConversationRecord,
        prior: Aci,
    ) -> ConversationOutcome {
        match self.directory.check_existence(prior).await {
            Ok(true) => {
                debug!(
                    conversation_id = %conversation.id,
                    "Account still live despite lookup gap"
                );
                ConversationOutcome::new(conversation, OutcomeStatus::Unchanged)
            }
            Ok(false) => {
                let decision = MergeDecision::MarkUnregistered {
                    target: conversation.id,
                };
                self.apply(conversation, decision).await
            }
            Err(err) => {
                warn!(
                    conversation_id = %conversation.id,
                    error = %err,
                    "Existence check failed, leaving record untouched"
                );
                ConversationOutcome::new(conversation, OutcomeStatus::Unchanged)
            }
        }
    }

    /// Query the store for every record holding a candidate identifier,
    /// deduplicated by record id.
    async fn gather_existing(
        &self,
        candidate: &RecipientCandidate,
    ) -> StoreResult<Vec<ConversationRecord>> {
        let mut keys = Vec::with_capacity(3);
        if let Some(aci) = candidate.aci {
            keys.push(ConversationKey::Aci(aci));
        }
        if let Some(pni) = candidate.pni {
            keys.push(ConversationKey::Pni(pni));
        }
        keys.push(ConversationKey::E164(candidate.e164.clone()));

        let mut records: Vec<ConversationRecord> = Vec::new();
        for key in &keys {
            if let Some(record) = self.store.find_by_identifier(key).await? {
                if !records.iter().any(|r| r.id == record.id) {
                    records.push(record);
                }
            }
        }
        Ok(records)
    }

    /// Apply a decision through the store and translate the result into
    /// the conversation's terminal state for this pass.
    async fn apply(
        &self,
        conversation: &ConversationRecord,
        decision: MergeDecision,
    ) -> ConversationOutcome {
        let kind = decision.kind();
        let result = match &decision {
            MergeDecision::NoAction => {
                return ConversationOutcome::new(conversation, OutcomeStatus::Unchanged);
            }
            MergeDecision::AdoptIdentifiers { target, adds } => self
                .store
                .adopt_identifiers(*target, adds)
                .await
                .map(|()| OutcomeStatus::Adopted),
            MergeDecision::MergeInto {
                winner,
                loser,
                adds,
            } => self
                .store
                .merge(*winner, *loser, adds)
                .await
                .map(|()| OutcomeStatus::Merged),
            MergeDecision::MarkUnregistered { target } => self
                .store
                .mark_unregistered(*target)
                .await
                .map(|()| OutcomeStatus::Unregistered),
        };

        match result {
            Ok(status) => {
                info!(
                    conversation_id = %conversation.id,
                    decision = kind,
                    "Decision applied"
                );
                ConversationOutcome::new(conversation, status)
            }
            Err(err) if err.is_concurrent_write() => {
                debug!(
                    conversation_id = %conversation.id,
                    decision = kind,
                    "Another pass already handled this record"
                );
                ConversationOutcome::new(conversation, OutcomeStatus::Unchanged)
            }
            Err(err) => {
                warn!(
                    conversation_id = %conversation.id,
                    decision = kind,
                    error = %err,
                    "Decision failed to apply"
                );
                ConversationOutcome::failed(conversation, err.to_string())
            }
        }
    }
}
