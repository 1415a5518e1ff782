//! Conversation store contract.
//!
//! The store owns all conversation persistence, including the history
//! bundles the engine must never lose. It is the only mutable shared
//! resource in a reconciliation pass and provides at-least serializable
//! mutation per record: two passes, or a pass racing a locally-initiated
//! identifier update, never interleave writes to the same record. A
//! write that loses such a race surfaces as
//! [`StoreError::ConcurrentWrite`] and the engine drops the decision as
//! already handled.

use async_trait::async_trait;
use thiserror::Error;

use linnet_core::{Aci, ConversationId, E164, Pni};

use crate::decision::IdentifierAdds;
use crate::record::ConversationRecord;

/// Lookup key for [`ConversationStore::find_by_identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConversationKey {
    /// Find the record holding this ACI.
    Aci(Aci),
    /// Find the record holding this PNI.
    Pni(Pni),
    /// Find the record holding this phone number.
    E164(E164),
}

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A mutation could not be applied to a record.
    #[error("Store mutation failed for {conversation_id}: {message}")]
    MutationFailed {
        conversation_id: ConversationId,
        message: String,
    },

    /// The record changed underneath the mutation; another pass or a
    /// local update already handled it.
    #[error("Concurrent write detected for {conversation_id}")]
    ConcurrentWrite { conversation_id: ConversationId },

    /// The record does not exist (anymore).
    #[error("Conversation not found: {conversation_id}")]
    NotFound { conversation_id: ConversationId },

    /// Backend failure unrelated to a specific record.
    #[error("Store backend error: {message}")]
    Backend { message: String },
}

impl StoreError {
    /// Create a mutation-failed error.
    pub fn mutation_failed(conversation_id: ConversationId, message: impl Into<String>) -> Self {
        Self::MutationFailed {
            conversation_id,
            message: message.into(),
        }
    }

    /// Create a concurrent-write error.
    pub fn concurrent_write(conversation_id: ConversationId) -> Self {
        Self::ConcurrentWrite { conversation_id }
    }

    /// Create a not-found error.
    pub fn not_found(conversation_id: ConversationId) -> Self {
        Self::NotFound { conversation_id }
    }

    /// Create a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Check if this error means another writer already handled the record.
    pub fn is_concurrent_write(&self) -> bool {
        matches!(self, StoreError::ConcurrentWrite { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Mutation interface over conversation records.
///
/// The engine only reads snapshots and requests the four mutations
/// below; record creation (first contact) and deletion/tombstoning are
/// the store's own paths. All mutations are idempotent: re-applying an
/// already-applied decision must leave the store unchanged.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Look up the live record holding the given identifier, if any.
    async fn find_by_identifier(
        &self,
        key: &ConversationKey,
    ) -> StoreResult<Option<ConversationRecord>>;

    /// Attach identifiers to a record and restore it to registered.
    ///
    /// Adding an identifier the record already holds is a no-op; an
    /// advisory PNI in `adds` replaces any previous PNI.
    async fn adopt_identifiers(
        &self,
        target: ConversationId,
        adds: &IdentifierAdds,
    ) -> StoreResult<()>;

    /// Merge the loser record into the winner.
    ///
    /// Relocates the loser's entire history bundle onto the winner (no
    /// loss, no duplication), strips the loser's identifiers, attaches
    /// `adds` to the winner, and leaves the emptied loser for the store
    /// to tombstone or repurpose.
    async fn merge(
        &self,
        winner: ConversationId,
        loser: ConversationId,
        adds: &IdentifierAdds,
    ) -> StoreResult<()>;

    /// Mark a record unregistered, keeping its identifiers and history.
    async fn mark_unregistered(&self, target: ConversationId) -> StoreResult<()>;

    /// Records due for a registration refresh, oldest-confirmed first.
    ///
    /// Feeds the background scheduler; the freshness policy (how old is
    /// stale) is the store's.
    async fn list_stale(&self, limit: usize) -> StoreResult<Vec<ConversationRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let id = ConversationId::new();
        let err = StoreError::mutation_failed(id, "row locked");
        assert!(err.to_string().contains("row locked"));
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_is_concurrent_write() {
        let id = ConversationId::new();
        assert!(StoreError::concurrent_write(id).is_concurrent_write());
        assert!(!StoreError::not_found(id).is_concurrent_write());
        assert!(!StoreError::backend("down").is_concurrent_write());
    }

    #[test]
    fn test_key_equality() {
        let aci = Aci::new();
        assert_eq!(ConversationKey::Aci(aci), ConversationKey::Aci(aci));
        assert_ne!(
            ConversationKey::Aci(aci),
            ConversationKey::Pni(Pni::from_uuid(*aci.as_uuid()))
        );
    }
}
