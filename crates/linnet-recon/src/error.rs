//! Reconciliation error types.

use thiserror::Error;

use linnet_directory::DirectoryError;

use crate::store::StoreError;

/// Errors that abort a whole reconciliation pass.
///
/// Per-conversation failures never appear here; they are collected into
/// the pass summary and retried on a later pass. The only whole-pass
/// failure mode is the directory batch lookup itself failing (and, for
/// the scheduler entry point, failing to list which conversations are
/// due).
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Directory batch lookup failed; no decision was made this pass.
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Store listing failed before any lookup was issued.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ReconcileError {
    /// Check if retrying the pass later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ReconcileError::Directory(err) => err.is_retryable(),
            ReconcileError::Store(_) => true,
        }
    }
}

/// Result type for reconciliation operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;
