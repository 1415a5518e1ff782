//! Merge decisions.
//!
//! The resolver's output vocabulary: a closed union consumed immediately
//! by the orchestrator and never persisted. Every branch of the ad-hoc
//! "merge or adopt or demote" question is a variant here, so handling is
//! exhaustively checked at compile time.

use linnet_core::{Aci, ConversationId, E164, Pni};

/// Identifiers a decision attaches to a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierAdds {
    /// Account identifier to attach (only ever fills a gap).
    pub aci: Option<Aci>,
    /// Phone-number identity to attach (replaces an advisory PNI).
    pub pni: Option<Pni>,
    /// Phone number to attach (only ever fills a gap).
    pub e164: Option<E164>,
}

impl IdentifierAdds {
    /// No identifiers to attach.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether applying this would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aci.is_none() && self.pni.is_none() && self.e164.is_none()
    }
}

/// What must happen to the records matching one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeDecision {
    /// Nothing to do; either nothing matched (first contact is the
    /// store's path) or the matching record is already up to date.
    NoAction,

    /// One record matched; attach the identifiers it is missing and
    /// restore it to registered.
    AdoptIdentifiers {
        target: ConversationId,
        adds: IdentifierAdds,
    },

    /// Two records turned out to be the same contact. The loser's
    /// history bundle is transferred to the winner and its identifiers
    /// are stripped; the emptied loser is left for the store.
    MergeInto {
        winner: ConversationId,
        loser: ConversationId,
        adds: IdentifierAdds,
    },

    /// The contact has no current directory account; demote the record.
    MarkUnregistered { target: ConversationId },
}

impl MergeDecision {
    /// Short label for logging and statistics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            MergeDecision::NoAction => "no_action",
            MergeDecision::AdoptIdentifiers { .. } => "adopt",
            MergeDecision::MergeInto { .. } => "merge",
            MergeDecision::MarkUnregistered { .. } => "mark_unregistered",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_is_empty() {
        assert!(IdentifierAdds::none().is_empty());

        let adds = IdentifierAdds {
            pni: Some(Pni::new()),
            ..IdentifierAdds::none()
        };
        assert!(!adds.is_empty());
    }

    #[test]
    fn test_decision_kind() {
        assert_eq!(MergeDecision::NoAction.kind(), "no_action");
        assert_eq!(
            MergeDecision::MarkUnregistered {
                target: ConversationId::new()
            }
            .kind(),
            "mark_unregistered"
        );
    }
}
