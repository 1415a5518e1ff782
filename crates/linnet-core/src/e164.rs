//! E.164 Phone Numbers
//!
//! Normalized international phone number format. Parsing accepts the
//! punctuation humans type and reduces it to the canonical `+` plus
//! digits form; equality and hashing are defined on the normalized form
//! only.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::IdentifierError;

/// Visual separators stripped during normalization.
const SEPARATORS: &[char] = &[' ', '-', '.', '(', ')'];

/// Minimum number of digits after the `+` sign.
const MIN_DIGITS: usize = 7;

/// Maximum number of digits after the `+` sign (E.164 limit).
const MAX_DIGITS: usize = 15;

/// A phone number in normalized E.164 international format.
///
/// Exactly one phone number may be attached to a conversation record at
/// a time, and a number may appear in at most one live conversation
/// record at any instant; this type is the key those invariants are
/// stated over.
///
/// # Example
///
/// ```
/// use linnet_core::E164;
///
/// let a = E164::parse("+1 (555) 123-4567").unwrap();
/// let b = E164::parse("+15551234567").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "+15551234567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct E164(String);

impl E164 {
    /// Parse and normalize a raw phone number string.
    ///
    /// Normalization is an explicit field-by-field step: strip visual
    /// separators, require a leading `+`, then validate that what remains
    /// is 7 to 15 digits with a non-zero country code digit first.
    pub fn parse(raw: &str) -> crate::error::Result<Self> {
        let compact: String = raw.chars().filter(|c| !SEPARATORS.contains(c)).collect();

        let digits = compact
            .strip_prefix('+')
            .ok_or_else(|| IdentifierError::invalid_phone_number(raw, "missing leading +"))?;

        if digits.len() < MIN_DIGITS {
            return Err(IdentifierError::invalid_phone_number(raw, "too short"));
        }
        if digits.len() > MAX_DIGITS {
            return Err(IdentifierError::invalid_phone_number(raw, "too long"));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdentifierError::invalid_phone_number(
                raw,
                "non-digit character",
            ));
        }
        if digits.starts_with('0') {
            return Err(IdentifierError::invalid_phone_number(
                raw,
                "zero country code",
            ));
        }

        Ok(Self(format!("+{digits}")))
    }

    /// The normalized string form, `+` followed by 7 to 15 digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for E164 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for E164 {
    type Err = IdentifierError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for E164 {
    type Error = IdentifierError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<E164> for String {
    fn from(number: E164) -> Self {
        number.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical() {
        let number = E164::parse("+15551234567").unwrap();
        assert_eq!(number.as_str(), "+15551234567");
    }

    #[test]
    fn test_parse_strips_separators() {
        let number = E164::parse("+1 (555) 123-45.67").unwrap();
        assert_eq!(number.as_str(), "+15551234567");
    }

    #[test]
    fn test_equality_on_normalized_form() {
        let a = E164::parse("+44 20 7946 0958").unwrap();
        let b = E164::parse("+442079460958").unwrap();
        assert_eq!(a, b);

        use std::collections::HashSet;
        let set: HashSet<E164> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_rejects_missing_plus() {
        let err = E164::parse("15551234567").unwrap_err();
        assert!(matches!(
            err,
            IdentifierError::InvalidPhoneNumber {
                reason: "missing leading +",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_too_short() {
        assert!(E164::parse("+555123").is_err());
    }

    #[test]
    fn test_rejects_too_long() {
        assert!(E164::parse("+1234567890123456").is_err());
    }

    #[test]
    fn test_rejects_letters() {
        assert!(E164::parse("+1555CALLNOW").is_err());
    }

    #[test]
    fn test_rejects_zero_country_code() {
        assert!(E164::parse("+05551234567").is_err());
    }

    #[test]
    fn test_serde_roundtrip_rejects_invalid() {
        let number = E164::parse("+15551234567").unwrap();
        let json = serde_json::to_string(&number).unwrap();
        let back: E164 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, number);

        assert!(serde_json::from_str::<E164>("\"5551234567\"").is_err());
    }
}
