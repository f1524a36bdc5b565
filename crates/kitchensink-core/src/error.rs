//! Error types for the Kitchensink client.

use crate::validation::FieldErrors;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Kitchensink client.
///
/// This provides typed, structured error variants matching the error
/// taxonomy of the REST contract: field validation (client- or
/// server-raised), authorization, transport, and local workflow misuse.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum KitchensinkError {
    /// One or more fields failed validation, keyed by field name.
    ///
    /// Raised locally before a request is sent, or rebuilt from a
    /// field→message map the server returns in the error envelope.
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// The session token was rejected (HTTP 401). The session has
    /// already been torn down by the time this surfaces.
    #[error("Session expired or invalid")]
    Unauthorized,

    /// The caller is not allowed to perform the action (HTTP 403).
    /// Shown as a page-level message, never per-field.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The server rejected the request with a business error.
    /// `message` is surfaced to the user verbatim.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never completed (DNS, refused connection, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A workflow operation was invoked in a state that does not allow
    /// it (e.g. saving while a request is already in flight).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Client configuration error (missing base URL, unreadable file).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KitchensinkError {
    /// Creates a Forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates an Api error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a Network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Creates an InvalidState error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Creates a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an Unauthorized error.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Check if this is a Forbidden error.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// Check if this is a Network error.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Whether the user can recover by editing their input and
    /// resubmitting, as opposed to a terminal or page-level failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Network(_))
    }

    /// Field errors carried by this error, if any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// A user-facing message for page-level display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Network error. Please check if the API server is running.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Convenience alias used across the client crates.
pub type Result<T> = std::result::Result<T, KitchensinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(KitchensinkError::Unauthorized.is_unauthorized());
        assert!(KitchensinkError::forbidden("nope").is_forbidden());
        assert!(KitchensinkError::network("down").is_network());
        assert!(!KitchensinkError::api(500, "boom").is_network());
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(KitchensinkError::network("down").is_recoverable());
        assert!(KitchensinkError::Validation(FieldErrors::default()).is_recoverable());
        assert!(!KitchensinkError::Unauthorized.is_recoverable());
        assert!(!KitchensinkError::forbidden("x").is_recoverable());
    }

    #[test]
    fn test_network_user_message_is_generic() {
        let msg = KitchensinkError::network("tcp reset").user_message();
        assert!(!msg.contains("tcp reset"));
    }
}
