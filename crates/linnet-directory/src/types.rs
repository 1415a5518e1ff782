//! Directory lookup value types.
//!
//! These values live for exactly one reconciliation pass: the engine
//! asks for a batch, consumes the answers, and discards them. Nothing
//! here has persistent identity.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use linnet_core::{Aci, E164, Pni};

/// The directory's answer for a single phone number.
///
/// An entry with no ACI means the directory has no current account for
/// that number; whatever PNI it reports is still advisory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Durable account identifier, if the number is registered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aci: Option<Aci>,

    /// Phone-number identity, if the directory issued one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pni: Option<Pni>,
}

impl DirectoryEntry {
    /// An entry carrying both identifiers.
    #[must_use]
    pub fn registered(aci: Aci, pni: Pni) -> Self {
        Self {
            aci: Some(aci),
            pni: Some(pni),
        }
    }

    /// The empty entry: directory has nothing for this number.
    #[must_use]
    pub fn unregistered() -> Self {
        Self::default()
    }

    /// Whether the directory currently maps this number to an account.
    #[must_use]
    pub fn has_account(&self) -> bool {
        self.aci.is_some()
    }
}

/// Batch lookup response mapping each queried number to its entry.
///
/// Ephemeral, per-pass. A provider that silently omits a key is
/// normalized by [`LookupResponse::resolved`] to the empty entry.
#[derive(Debug, Clone, Default)]
pub struct LookupResponse {
    entries: HashMap<E164, DirectoryEntry>,
}

impl LookupResponse {
    /// Create an empty response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a response from resolved entries.
    #[must_use]
    pub fn from_entries(entries: HashMap<E164, DirectoryEntry>) -> Self {
        Self { entries }
    }

    /// Record the entry for one number.
    pub fn insert(&mut self, number: E164, entry: DirectoryEntry) {
        self.entries.insert(number, entry);
    }

    /// The entry for a number, with omission normalized to "no account".
    #[must_use]
    pub fn resolved(&self, number: &E164) -> DirectoryEntry {
        self.entries.get(number).cloned().unwrap_or_default()
    }

    /// Number of entries the directory actually answered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory answered nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_has_account() {
        assert!(DirectoryEntry::registered(Aci::new(), Pni::new()).has_account());
        assert!(!DirectoryEntry::unregistered().has_account());

        let pni_only = DirectoryEntry {
            aci: None,
            pni: Some(Pni::new()),
        };
        assert!(!pni_only.has_account());
    }

    #[test]
    fn test_resolved_normalizes_omission() {
        let known = E164::parse("+15551234567").unwrap();
        let omitted = E164::parse("+15557654321").unwrap();

        let mut response = LookupResponse::new();
        response.insert(known.clone(), DirectoryEntry::registered(Aci::new(), Pni::new()));

        assert!(response.resolved(&known).has_account());
        assert_eq!(response.resolved(&omitted), DirectoryEntry::unregistered());
        assert_eq!(response.len(), 1);
    }
}
