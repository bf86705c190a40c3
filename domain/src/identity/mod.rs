//! Caller identity and the presenter/participant role check.
//!
//! Identities are issued by an external provider; this module only models
//! what the provider hands over and answers "may this caller present?".

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display name used when the provider supplies none
pub const UNKNOWN_PRESENTER_NAME: &str = "Unknown Teacher";

/// Role claim attached to a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Presenter: creates sessions and reads aggregated feedback
    Teacher,
    /// Participant: joins by room code and submits answers
    Student,
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            _ => Err(()),
        }
    }
}

/// Why a caller may not perform a presenter action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Teacher role required")]
    NotPresenter,
}

/// An authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub display_name: Option<String>,
    /// `None` when the caller has not picked a role yet
    pub role: Option<Role>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
            role: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Convenience constructor for a presenter
    pub fn teacher(user_id: impl Into<String>) -> Self {
        Self::new(user_id).with_role(Role::Teacher)
    }

    pub fn is_presenter(&self) -> bool {
        self.role == Some(Role::Teacher)
    }

    /// Name recorded in session metadata
    pub fn presenter_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_PRESENTER_NAME)
    }
}

/// Require an authenticated presenter
pub fn require_presenter(identity: Option<&Identity>) -> Result<&Identity, AccessError> {
    let identity = identity.ok_or(AccessError::Unauthenticated)?;
    if identity.user_id.trim().is_empty() {
        return Err(AccessError::Unauthenticated);
    }
    if !identity.is_presenter() {
        return Err(AccessError::NotPresenter);
    }
    Ok(identity)
}
