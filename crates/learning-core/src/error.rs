use thiserror::Error;

use crate::domain::entity::EntityKind;

/// Marker the remote API puts in the message of a missing-resource failure
pub const NOT_FOUND_MARKER: &str = "Resource not found";

/// Failure reported by an entity gateway
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The addressed entity does not exist server-side
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Network or server hiccup; worth another attempt
    #[error("{0}")]
    Transient(String),

    /// Failure without a usable message
    #[error("Unknown gateway failure")]
    Unknown,
}

impl GatewayError {
    /// Build a not-found error for an entity of the given kind
    pub fn not_found(kind: EntityKind, id: impl std::fmt::Display) -> Self {
        GatewayError::NotFound(format!("{} {}", kind, id))
    }

    /// The message carried by this error, if it has one
    pub fn message(&self) -> Option<String> {
        match self {
            GatewayError::Unknown => None,
            other => Some(other.to_string()),
        }
    }
}

/// Crate-level error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LearningError {
    /// Gateway failure surfaced directly
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Invalid or unparsable configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A mutation task panicked
    #[error("Mutation task failed: {0}")]
    TaskFailed(String),

    /// A mutation task was aborted before it settled
    #[error("Mutation was cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for LearningError {
    fn from(err: serde_json::Error) -> Self {
        LearningError::ConfigurationError(err.to_string())
    }
}

/// Result alias used across the crate
pub type LearningResult<T> = Result<T, LearningError>;

/// Turn a gateway failure into the message stored in the store's error slot.
///
/// Not-found failures become `"<fallback>: Not found"`, other failures keep
/// their own message, and failures without a message fall back to `fallback`
/// verbatim.
pub fn format_error(error: &GatewayError, fallback: &str) -> String {
    match error.message() {
        Some(message) if message.contains(NOT_FOUND_MARKER) => format!("{}: Not found", fallback),
        Some(message) if !message.is_empty() => message,
        _ => fallback.to_string(),
    }
}
