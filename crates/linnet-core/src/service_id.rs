//! Service Identifiers
//!
//! The tagged union over the two account identifier spaces. A
//! [`ServiceId`] is either a durable [`Aci`] or a transitional [`Pni`];
//! code that can work with either kind takes a `ServiceId`, and code that
//! needs the durable identity takes an [`Aci`] so the distinction is
//! visible in signatures.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::IdentifierError;
use crate::ids::{Aci, Pni};

/// Either of the two service identifier kinds.
///
/// Equality compares both the tag and the underlying token: an ACI and a
/// PNI built from the same UUID are still different identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ServiceId {
    /// A durable account identifier.
    Aci(Aci),
    /// A phone-number identity.
    Pni(Pni),
}

impl ServiceId {
    /// Parse from either canonical string form (`PNI:`-prefixed UUID or
    /// bare UUID).
    pub fn parse(raw: &str) -> crate::error::Result<Self> {
        if raw.starts_with("PNI:") {
            Pni::parse(raw)
                .map(Self::Pni)
                .map_err(|_| IdentifierError::invalid_service_id(raw))
        } else {
            Aci::parse(raw)
                .map(Self::Aci)
                .map_err(|_| IdentifierError::invalid_service_id(raw))
        }
    }

    /// The durable account identifier, if this is one.
    #[must_use]
    pub fn as_aci(&self) -> Option<Aci> {
        match self {
            Self::Aci(aci) => Some(*aci),
            Self::Pni(_) => None,
        }
    }

    /// The phone-number identity, if this is one.
    #[must_use]
    pub fn as_pni(&self) -> Option<Pni> {
        match self {
            Self::Aci(_) => None,
            Self::Pni(pni) => Some(*pni),
        }
    }

    /// Whether this identifier is a durable ACI.
    #[must_use]
    pub fn is_aci(&self) -> bool {
        matches!(self, Self::Aci(_))
    }
}

impl From<Aci> for ServiceId {
    fn from(aci: Aci) -> Self {
        Self::Aci(aci)
    }
}

impl From<Pni> for ServiceId {
    fn from(pni: Pni) -> Self {
        Self::Pni(pni)
    }
}

impl Display for ServiceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aci(aci) => Display::fmt(aci, f),
            Self::Pni(pni) => Display::fmt(pni, f),
        }
    }
}

impl FromStr for ServiceId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ServiceId {
    type Error = IdentifierError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ServiceId> for String {
    fn from(id: ServiceId) -> Self {
        id.to_string()
    }
}
