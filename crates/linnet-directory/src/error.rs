//! Directory error types.

use thiserror::Error;

/// Errors that can occur talking to the directory service.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Directory unreachable or failing.
    #[error("Directory unavailable: {message}")]
    Unavailable { message: String },

    /// Directory refused the request due to rate limiting.
    #[error("Directory rate limited: {message}")]
    RateLimited { message: String },

    /// Directory answered with something the client could not interpret.
    #[error("Malformed directory response: {message}")]
    Malformed { message: String },
}

impl DirectoryError {
    /// Create an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a rate-limited error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Create a malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Check if this error is retryable on a later pass.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DirectoryError::Unavailable { .. } | DirectoryError::RateLimited { .. }
        )
    }
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DirectoryError::unavailable("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_is_retryable() {
        assert!(DirectoryError::unavailable("timeout").is_retryable());
        assert!(DirectoryError::rate_limited("slow down").is_retryable());
        assert!(!DirectoryError::malformed("bad payload").is_retryable());
    }
}
