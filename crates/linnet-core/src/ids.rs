//! Strongly Typed Identifiers
//!
//! Identifier types for linnet conversations and accounts. Using the
//! newtype pattern, these types prevent accidental misuse of different
//! identifier spaces at compile time: an [`Aci`] names a durable
//! registered account, a [`Pni`] names a phone number's identity before
//! (or independent of) account discovery, and the two never convert into
//! each other.
//!
//! # Example
//!
//! ```
//! use linnet_core::{Aci, Pni};
//!
//! let aci: Aci = "7f7a3e01-5c4b-4a83-9f0e-2b6d2f28f9ab".parse().unwrap();
//! let pni: Pni = "PNI:b0f7c9f2-65a5-4f3c-8f0a-97c1a33d8be1".parse().unwrap();
//!
//! // Distinct identifier spaces: a PNI string never parses as an ACI.
//! assert!(pni.to_string().starts_with("PNI:"));
//! assert!(aci.to_string().parse::<Pni>().is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::IdentifierError;

/// String prefix distinguishing PNI tokens from ACI tokens on the wire.
const PNI_PREFIX: &str = "PNI:";

/// Macro to define a strongly-typed record id type.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random id using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an id from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| IdentifierError::InvalidRecordId {
                        id_type: stringify!($name),
                        value: s.to_string(),
                    })
            }
        }
    };
}

define_id! {
    /// Unique identifier for a conversation record.
    ConversationId
}

/// Account identifier: the durable, directory-issued identity of a
/// registered account.
///
/// Equality and hashing are defined on the underlying opaque token, not
/// on any string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aci(Uuid);

impl Aci {
    /// Creates a new random ACI. Production ACIs are issued by the
    /// directory; this is for stores and tests that mint records.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an ACI from an existing UUID token.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns a reference to the underlying token.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse an ACI from its canonical string form (a bare UUID).
    pub fn parse(raw: &str) -> crate::error::Result<Self> {
        // A PNI-prefixed token is a different identifier space, never an ACI.
        if raw.starts_with(PNI_PREFIX) {
            return Err(IdentifierError::invalid_aci(raw));
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| IdentifierError::invalid_aci(raw))
    }
}

impl Default for Aci {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Aci {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Aci {
    type Err = IdentifierError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Phone-number identity: a transitional identifier tied to a phone
/// number, supersede-able by an [`Aci`] for the same number.
///
/// The canonical string form carries a `PNI:` prefix so the two
/// identifier spaces stay disjoint on the wire. There is deliberately no
/// conversion between [`Pni`] and [`Aci`]; treating a PNI as a weaker
/// stand-in for an account is always an explicit
/// [`ServiceId::Pni`](crate::ServiceId) at the use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pni(Uuid);

impl Pni {
    /// Creates a new random PNI. Production PNIs are issued by the
    /// directory; this is for stores and tests that mint records.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PNI from an existing UUID token.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns a reference to the underlying token.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse a PNI from its canonical string form (`PNI:` + UUID).
    pub fn parse(raw: &str) -> crate::error::Result<Self> {
        let token = raw
            .strip_prefix(PNI_PREFIX)
            .ok_or_else(|| IdentifierError::invalid_pni(raw))?;
        Uuid::parse_str(token)
            .map(Self)
            .map_err(|_| IdentifierError::invalid_pni(raw))
    }
}

impl Default for Pni {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Pni {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{PNI_PREFIX}{}", self.0)
    }
}

impl FromStr for Pni {
    type Err = IdentifierError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Pni {
    type Error = IdentifierError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Pni> for String {
    fn from(pni: Pni) -> Self {
        pni.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_id_uniqueness() {
        let a = ConversationId::new();
        let b = ConversationId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_conversation_id_roundtrip() {
        let id = ConversationId::new();
        let parsed: ConversationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_conversation_id_rejects_garbage() {
        let err = "not-a-uuid".parse::<ConversationId>().unwrap_err();
        assert!(matches!(
            err,
            IdentifierError::InvalidRecordId {
                id_type: "ConversationId",
                ..
            }
        ));
    }

    #[test]
    fn test_aci_roundtrip() {
        let aci = Aci::new();
        let parsed = Aci::parse(&aci.to_string()).unwrap();
        assert_eq!(aci, parsed);
    }

    #[test]
    fn test_aci_equality_is_by_token() {
        let uuid = Uuid::new_v4();
        assert_eq!(Aci::from_uuid(uuid), Aci::from_uuid(uuid));
        assert_ne!(Aci::new(), Aci::new());
    }

    #[test]
    fn test_aci_rejects_pni_form() {
        let pni = Pni::new();
        assert!(Aci::parse(&pni.to_string()).is_err());
    }

    #[test]
    fn test_aci_rejects_malformed() {
        assert!(matches!(
            Aci::parse("zzz"),
            Err(IdentifierError::InvalidAci { .. })
        ));
    }

    #[test]
    fn test_pni_roundtrip() {
        let pni = Pni::new();
        let text = pni.to_string();
        assert!(text.starts_with("PNI:"));
        assert_eq!(Pni::parse(&text).unwrap(), pni);
    }

    #[test]
    fn test_pni_rejects_bare_uuid() {
        let err = Pni::parse(&Uuid::new_v4().to_string()).unwrap_err();
        assert!(matches!(err, IdentifierError::InvalidPni { .. }));
    }

    #[test]
    fn test_pni_serde_uses_prefixed_form() {
        let pni = Pni::new();
        let json = serde_json::to_string(&pni).unwrap();
        assert!(json.contains("PNI:"));
        let back: Pni = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pni);
    }

    #[test]
    fn test_aci_serde_is_bare_uuid() {
        let aci = Aci::new();
        let json = serde_json::to_string(&aci).unwrap();
        assert!(!json.contains("PNI:"));
        let back: Aci = serde_json::from_str(&json).unwrap();
        assert_eq!(back, aci);
    }
}
