//! Error type shared by the session use cases
//!
//! Every use case reports failures as a [`PulseError`] so the HTTP layer can
//! map them onto status codes in one place.

use pulse_domain::{AccessError, DomainError};
use std::fmt::Display;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum PulseError {
    /// Missing or malformed input
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("Authentication required")]
    Unauthorized,

    #[error("Teacher role required")]
    Forbidden,

    #[error("Room {0} not found")]
    RoomNotFound(String),

    #[error("Room {0} is no longer accepting responses")]
    SessionClosed(String),

    /// The log store or a generation service failed
    #[error("{operation} failed: {detail}")]
    Upstream {
        operation: &'static str,
        detail: String,
    },
}

impl PulseError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        PulseError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Wrap a collaborator failure, logging it with its context
    pub fn upstream(operation: &'static str, err: impl Display) -> Self {
        let detail = err.to_string();
        error!(operation, error = %detail, "Upstream failure");
        PulseError::Upstream { operation, detail }
    }
}

impl From<DomainError> for PulseError {
    fn from(e: DomainError) -> Self {
        PulseError::Validation {
            field: e.field(),
            message: e.to_string(),
        }
    }
}

impl From<AccessError> for PulseError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::Unauthenticated => PulseError::Unauthorized,
            AccessError::NotPresenter => PulseError::Forbidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_keeps_field() {
        let err: PulseError = DomainError::missing("student_id").into();
        match err {
            PulseError::Validation { field, message } => {
                assert_eq!(field, "student_id");
                assert_eq!(message, "student_id is required");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_access_error_mapping() {
        assert!(matches!(
            PulseError::from(AccessError::Unauthenticated),
            PulseError::Unauthorized
        ));
        assert!(matches!(
            PulseError::from(AccessError::NotPresenter),
            PulseError::Forbidden
        ));
    }
}
