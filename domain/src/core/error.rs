//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Raised when a value object refuses its input. The `field` carried by
/// [`DomainError::InvalidField`] is the wire name of the offending input so
/// callers can report it verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid room code: {0}")]
    InvalidRoomCode(String),

    #[error("Invalid quiz: {0}")]
    InvalidQuiz(String),
}

impl DomainError {
    pub fn missing(field: &'static str) -> Self {
        DomainError::MissingField { field }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the input field this error refers to
    pub fn field(&self) -> &'static str {
        match self {
            DomainError::MissingField { field } | DomainError::InvalidField { field, .. } => field,
            DomainError::InvalidRoomCode(_) => "room_code",
            DomainError::InvalidQuiz(_) => "quiz",
        }
    }
}
