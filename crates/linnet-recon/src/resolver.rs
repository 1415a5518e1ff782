//! Merge resolver.
//!
//! Pure decision logic: given the records that currently hold any of a
//! candidate's identifiers, decide which record is canonical and what
//! must happen to the others. Total and side-effect-free; every call
//! returns exactly one [`MergeDecision`], with ambiguity resolved by a
//! fixed precedence order.

use linnet_core::{Aci, E164, Pni};

use crate::decision::{IdentifierAdds, MergeDecision};
use crate::record::ConversationRecord;

/// Candidate identifier tuple for one conversation in one pass, built
/// from the conversation's number and the directory's answer for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientCandidate {
    /// The conversation's phone number.
    pub e164: E164,
    /// Account identifier the directory reported, if any.
    pub aci: Option<Aci>,
    /// Phone-number identity the directory reported, if any.
    pub pni: Option<Pni>,
}

impl RecipientCandidate {
    /// Candidate for a number the directory did not resolve.
    #[must_use]
    pub fn unresolved(e164: E164) -> Self {
        Self {
            e164,
            aci: None,
            pni: None,
        }
    }
}

/// How strongly a record matches the candidate. ACI is the durable
/// identifier and outranks the number; the number outranks the advisory
/// PNI. A PNI-only match adopts but never wins a merge tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchStrength {
    Pni,
    E164,
    Aci,
}

struct Matched<'a> {
    record: &'a ConversationRecord,
    strength: MatchStrength,
}

/// Decide what must happen for `candidate` given the records currently
/// holding any of its identifiers.
///
/// `existing` is the deduplicated result of looking up each candidate
/// identifier in the store; records carrying none of the identifiers are
/// ignored. Decisions are idempotent at the store: re-deriving the same
/// decision on a later pass applies as a no-op.
#[must_use]
pub fn resolve(existing: &[ConversationRecord], candidate: &RecipientCandidate) -> MergeDecision {
    let mut matched = partition(existing, candidate);
    if matched.is_empty() {
        return MergeDecision::NoAction;
    }

    // Strongest first; equal strength prefers the oldest record, which
    // preserves the most historical continuity.
    matched.sort_by(|a, b| {
        b.strength
            .cmp(&a.strength)
            .then(a.record.created_at.cmp(&b.record.created_at))
            .then(a.record.id.cmp(&b.record.id))
    });

    let Some(aci) = candidate.aci else {
        return resolve_unresolved(&matched);
    };

    // A record owning a different live ACI is not this contact, no
    // matter which weaker identifier matched; re-pointing its number is
    // the store's first-contact path.
    matched.retain(|m| m.record.aci.is_none() || m.record.holds_aci(aci));
    let Some(winner) = matched.first() else {
        return MergeDecision::NoAction;
    };

    if let Some(loser) = matched.get(1) {
        return MergeDecision::MergeInto {
            winner: winner.record.id,
            loser: loser.record.id,
            adds: identifier_adds(winner.record, candidate),
        };
    }

    let adds = identifier_adds(winner.record, candidate);
    if adds.is_empty() && winner.record.is_live() {
        return MergeDecision::NoAction;
    }
    MergeDecision::AdoptIdentifiers {
        target: winner.record.id,
        adds,
    }
}

/// Candidate without an ACI: the directory has no current account for
/// the number. Weak identifiers never justify a merge, and a record
/// still holding an ACI is never demoted here; the orchestrator must
/// first confirm the account is really gone via the existence probe.
fn resolve_unresolved(matched: &[Matched<'_>]) -> MergeDecision {
    if matched.len() > 1 {
        return MergeDecision::NoAction;
    }
    let record = matched[0].record;
    if record.aci.is_some() || !record.is_live() {
        return MergeDecision::NoAction;
    }
    MergeDecision::MarkUnregistered { target: record.id }
}

fn partition<'a>(
    existing: &'a [ConversationRecord],
    candidate: &RecipientCandidate,
) -> Vec<Matched<'a>> {
    let mut matched: Vec<Matched<'a>> = Vec::with_capacity(existing.len());
    for record in existing {
        let strength = if candidate.aci.is_some_and(|aci| record.holds_aci(aci)) {
            MatchStrength::Aci
        } else if record.holds_e164(&candidate.e164) {
            MatchStrength::E164
        } else if candidate.pni.is_some_and(|pni| record.holds_pni(pni)) {
            MatchStrength::Pni
        } else {
            continue;
        };

        // A record may appear once per identifier lookup; keep its
        // strongest match.
        match matched.iter_mut().find(|m| m.record.id == record.id) {
            Some(seen) => seen.strength = seen.strength.max(strength),
            None => matched.push(Matched { record, strength }),
        }
    }
    matched
}

/// The identifiers `target` is missing relative to the candidate. An
/// ACI or E164 only ever fills a gap; the advisory PNI is replaced when
/// it differs.
fn identifier_adds(target: &ConversationRecord, candidate: &RecipientCandidate) -> IdentifierAdds {
    IdentifierAdds {
        aci: candidate.aci.filter(|_| target.aci.is_none()),
        pni: candidate.pni.filter(|pni| !target.holds_pni(*pni)),
        e164: target.e164.is_none().then(|| candidate.e164.clone()),
    }
}
