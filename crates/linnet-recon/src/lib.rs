//! # Identity Reconciliation Engine
//!
//! Keeps local conversation records consistent with the remote phone
//! number directory. A phone number, an account identifier (ACI), and a
//! transitional phone-number identity (PNI) can each independently name
//! the same contact, and they can disagree over time. This crate resolves that
//! ambiguity, merges duplicate conversation records without losing
//! history, and refreshes registration status, all while the directory
//! keeps changing underneath it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Reconciler                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │   batch lookup          per-conversation        apply via    │
//! │  ┌────────────┐        ┌───────────────┐     ┌────────────┐  │
//! │  │ Directory  │───────►│ Merge         │────►│Conversation│  │
//! │  │ Client     │        │ Resolver      │     │ Store      │  │
//! │  └────────────┘        └───────────────┘     └────────────┘  │
//! │        │                                                     │
//! │        └── check_existence fallback for unconfirmed ACIs     │
//! │                                                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The directory client and the conversation store are contracts
//! ([`DirectoryClient`](linnet_directory::DirectoryClient),
//! [`ConversationStore`]) implemented outside this crate; the engine
//! owns no persistence and no transport.
//!
//! ## Usage
//!
//! ```ignore
//! use linnet_recon::{Reconciler, ReconcilerConfig};
//!
//! let reconciler = Reconciler::new(directory, store);
//!
//! // One pass over conversations the caller considers due.
//! let summary = reconciler.reconcile(&conversations).await?;
//! for failure in summary.failures() {
//!     tracing::warn!(?failure, "will retry next pass");
//! }
//! ```

pub mod config;
pub mod decision;
pub mod error;
pub mod reconciler;
pub mod record;
pub mod report;
pub mod resolver;
pub mod scheduler;
pub mod statistics;
pub mod store;

// Re-exports for convenience
pub use config::{ReconcilerConfig, RefreshConfig};
pub use decision::{IdentifierAdds, MergeDecision};
pub use error::{ReconcileError, ReconcileResult};
pub use reconciler::Reconciler;
pub use record::{ConversationRecord, RegistrationStatus};
pub use report::{ConversationOutcome, OutcomeStatus, PassSummary};
pub use resolver::{resolve, RecipientCandidate};
pub use scheduler::RefreshScheduler;
pub use statistics::{PassStatistics, StatisticsTracker};
pub use store::{ConversationKey, ConversationStore, StoreError, StoreResult};
