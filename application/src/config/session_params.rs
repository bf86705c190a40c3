//! Session parameters - limits and switches for the session use cases.
//!
//! [`SessionParams`] carries the static knobs the session use cases share.
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Session use case parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Maximum records read from one session stream.
    pub read_limit: usize,
    /// Consult and maintain the room/owner index streams.
    pub use_index: bool,
    /// Attempts at drawing an unused room code before giving up.
    pub max_code_attempts: usize,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            read_limit: 500,
            use_index: true,
            max_code_attempts: 5,
        }
    }
}

impl SessionParams {
    pub fn with_read_limit(mut self, limit: usize) -> Self {
        self.read_limit = limit;
        self
    }

    pub fn with_index(mut self, enabled: bool) -> Self {
        self.use_index = enabled;
        self
    }

    pub fn with_max_code_attempts(mut self, attempts: usize) -> Self {
        self.max_code_attempts = attempts;
        self
    }
}
