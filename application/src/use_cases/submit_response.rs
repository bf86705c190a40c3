//! Submit response use case
//!
//! Validates a participant's answers against the session's quiz and
//! appends them to the session stream. Repeat submissions are appended as
//! separate records.

use super::resolve_room::RoomResolver;
use crate::error::PulseError;
use crate::ports::log_store::LogStore;
use pulse_domain::{
    Answer, DomainError, ParticipantSubmission, RoomCode, SessionLog, SessionStatus, StreamRecord,
};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct SubmitResponseInput {
    pub room_code: String,
    pub student_id: String,
    pub answers: Vec<Answer>,
}

pub struct SubmitResponseUseCase {
    store: Arc<dyn LogStore>,
    resolver: Arc<RoomResolver>,
}

impl SubmitResponseUseCase {
    pub fn new(store: Arc<dyn LogStore>, resolver: Arc<RoomResolver>) -> Self {
        Self { store, resolver }
    }

    pub async fn execute(&self, input: SubmitResponseInput) -> Result<(), PulseError> {
        let code = RoomCode::parse(&input.room_code)?;
        let submission = ParticipantSubmission::new(input.student_id, input.answers)?;

        let room = self.resolver.resolve_full(&code).await?;
        let log = SessionLog::from_records(&room.records);
        let definition = log
            .definition()
            .ok_or_else(|| PulseError::RoomNotFound(code.to_string()))?;

        if log.status() == Some(SessionStatus::Completed) {
            return Err(PulseError::SessionClosed(code.to_string()));
        }
        if let Some(unknown) = submission
            .answers
            .iter()
            .find(|a| definition.question(a.q_id).is_none())
        {
            return Err(DomainError::invalid(
                "answers",
                format!("question {} is not part of this quiz", unknown.q_id),
            )
            .into());
        }

        let student_id = submission.student_id.clone();
        self.store
            .append(&room.stream, &StreamRecord::ParticipantSubmission(submission))
            .await
            .map_err(|e| PulseError::upstream("submit response", e))?;

        info!(room_code = %code, student_id = %student_id, "Response recorded");
        Ok(())
    }
}
