//! Session status use case
//!
//! Owners move a session between `active` and `completed` by appending a
//! `status_changed` record; the definition is never rewritten.

use crate::config::SessionParams;
use crate::error::PulseError;
use crate::ports::log_store::LogStore;
use chrono::Utc;
use pulse_domain::{
    Identity, RoomCode, SessionLog, SessionStatus, StatusChange, StreamName, StreamRecord,
    require_presenter,
};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOutcome {
    pub room_code: RoomCode,
    pub status: SessionStatus,
    /// False when the session already had the requested status
    pub changed: bool,
}

pub struct SetStatusUseCase {
    store: Arc<dyn LogStore>,
    params: SessionParams,
}

impl SetStatusUseCase {
    pub fn new(store: Arc<dyn LogStore>, params: SessionParams) -> Self {
        Self { store, params }
    }

    /// Set the status of one of the caller's own sessions
    pub async fn execute(
        &self,
        identity: Option<&Identity>,
        room_code: &str,
        status: SessionStatus,
    ) -> Result<StatusOutcome, PulseError> {
        let presenter = require_presenter(identity)?;
        let code = RoomCode::parse(room_code)?;
        let stream = StreamName::for_owner(&presenter.user_id, &code);

        let records = self
            .store
            .read_from(&stream, 0, self.params.read_limit)
            .await
            .map_err(|e| PulseError::upstream("read session", e))?;
        let log = SessionLog::from_records(&records);
        let current = log
            .status()
            .ok_or_else(|| PulseError::RoomNotFound(code.to_string()))?;

        if current == status {
            return Ok(StatusOutcome {
                room_code: code,
                status,
                changed: false,
            });
        }

        let change = StreamRecord::StatusChanged(StatusChange {
            status,
            changed_at: Utc::now(),
        });
        self.store
            .append(&stream, &change)
            .await
            .map_err(|e| PulseError::upstream("update session status", e))?;

        info!(room_code = %code, from = %current, to = %status, "Session status changed");
        Ok(StatusOutcome {
            room_code: code,
            status,
            changed: true,
        })
    }
}
