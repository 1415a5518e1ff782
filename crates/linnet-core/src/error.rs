//! Identifier Error Types
//!
//! Standardized error type for identifier parsing and validation.
//! Malformed input is rejected here, before any directory lookup or
//! store access happens.

use thiserror::Error;

/// Errors produced when parsing or validating raw identifier input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The raw value is not a well-formed account identifier.
    #[error("Invalid ACI: {value}")]
    InvalidAci { value: String },

    /// The raw value is not a well-formed phone-number identity.
    #[error("Invalid PNI: {value}")]
    InvalidPni { value: String },

    /// The raw value matches neither service identifier form.
    #[error("Invalid service identifier: {value}")]
    InvalidServiceId { value: String },

    /// The raw value is not a normalizable E.164 phone number.
    #[error("Invalid phone number ({reason}): {value}")]
    InvalidPhoneNumber {
        value: String,
        reason: &'static str,
    },

    /// A strongly typed record id failed to parse.
    #[error("Invalid {id_type}: {value}")]
    InvalidRecordId {
        id_type: &'static str,
        value: String,
    },
}

impl IdentifierError {
    /// Create an invalid-ACI error.
    pub fn invalid_aci(value: impl Into<String>) -> Self {
        Self::InvalidAci {
            value: value.into(),
        }
    }

    /// Create an invalid-PNI error.
    pub fn invalid_pni(value: impl Into<String>) -> Self {
        Self::InvalidPni {
            value: value.into(),
        }
    }

    /// Create an invalid-service-identifier error.
    pub fn invalid_service_id(value: impl Into<String>) -> Self {
        Self::InvalidServiceId {
            value: value.into(),
        }
    }

    /// Create an invalid-phone-number error.
    pub fn invalid_phone_number(value: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidPhoneNumber {
            value: value.into(),
            reason,
        }
    }
}

/// Result type alias using [`IdentifierError`].
pub type Result<T> = std::result::Result<T, IdentifierError>;
