//! Conversation record model.
//!
//! The engine-visible snapshot of one contact or group thread. The
//! opaque history bundle behind a record (messages, sessions, display
//! metadata) is owned exclusively by the conversation store and never
//! crosses this boundary; merges relocate it store-side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use linnet_core::{Aci, ConversationId, E164, Pni};

/// Whether a conversation's contact currently has a directory account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    /// The contact has a live directory account.
    Registered,
    /// The directory has no current account for the contact.
    Unregistered,
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationStatus::Registered => write!(f, "registered"),
            RegistrationStatus::Unregistered => write!(f, "unregistered"),
        }
    }
}

/// Snapshot of one conversation record.
///
/// A record in the store carries at least one of the three identifiers.
/// The engine reads snapshots and requests mutations through the store
/// interface; it never creates or deletes records outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// Record id.
    pub id: ConversationId,

    /// Durable account identifier, once discovered.
    pub aci: Option<Aci>,

    /// Advisory phone-number identity.
    pub pni: Option<Pni>,

    /// The record's phone number. At most one at a time.
    pub e164: Option<E164>,

    /// Registration status.
    pub registration: RegistrationStatus,

    /// Record creation time; merge tie-breaks prefer the oldest record.
    pub created_at: DateTime<Utc>,
}

impl ConversationRecord {
    /// Create an empty registered record snapshot. Identifiers are
    /// attached with the `with_*` builders; a record entering the store
    /// must carry at least one.
    #[must_use]
    pub fn new(id: ConversationId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            aci: None,
            pni: None,
            e164: None,
            registration: RegistrationStatus::Registered,
            created_at,
        }
    }

    /// Attach an ACI.
    #[must_use]
    pub fn with_aci(mut self, aci: Aci) -> Self {
        self.aci = Some(aci);
        self
    }

    /// Attach a PNI.
    #[must_use]
    pub fn with_pni(mut self, pni: Pni) -> Self {
        self.pni = Some(pni);
        self
    }

    /// Attach a phone number.
    #[must_use]
    pub fn with_e164(mut self, e164: E164) -> Self {
        self.e164 = Some(e164);
        self
    }

    /// Mark the snapshot unregistered.
    #[must_use]
    pub fn unregistered(mut self) -> Self {
        self.registration = RegistrationStatus::Unregistered;
        self
    }

    /// Whether any identifier is attached.
    #[must_use]
    pub fn has_identifier(&self) -> bool {
        self.aci.is_some() || self.pni.is_some() || self.e164.is_some()
    }

    /// Whether the record is live (not unregistered).
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.registration == RegistrationStatus::Registered
    }

    /// Whether the record holds this exact ACI.
    #[must_use]
    pub fn holds_aci(&self, aci: Aci) -> bool {
        self.aci == Some(aci)
    }

    /// Whether the record holds this exact PNI.
    #[must_use]
    pub fn holds_pni(&self, pni: Pni) -> bool {
        self.pni == Some(pni)
    }

    /// Whether the record holds this exact phone number.
    #[must_use]
    pub fn holds_e164(&self, e164: &E164) -> bool {
        self.e164.as_ref() == Some(e164)
    }
}
