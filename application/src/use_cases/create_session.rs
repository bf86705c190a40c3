//! Create session use case
//!
//! Allocates a room code, claims it in the room index, then writes the
//! session definition as the first record of a fresh owner-scoped stream.
//! A claim that cannot be written fails the creation before anything else
//! is stored. A claim left behind by a failed definition write points at an
//! empty stream, which resolution skips.

use super::session_index::SessionIndex;
use crate::config::SessionParams;
use crate::error::PulseError;
use crate::ports::evaluator::FeedbackEvaluator;
use crate::ports::log_store::LogStore;
use crate::ports::room_codes::RoomCodeGenerator;
use chrono::Utc;
use pulse_domain::{
    DomainError, Identity, Question, RoomCode, SessionDefinition, SessionMetadata, SessionStatus,
    StreamName, StreamRecord, require_presenter, validate_quiz,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Input for creating a session
#[derive(Debug, Clone)]
pub struct CreateSessionInput {
    pub lecture_text: String,
    /// Quiz to use as is; `None` asks the evaluator to write one
    pub quiz: Option<Vec<Question>>,
}

impl CreateSessionInput {
    pub fn new(lecture_text: impl Into<String>) -> Self {
        Self {
            lecture_text: lecture_text.into(),
            quiz: None,
        }
    }

    pub fn with_quiz(mut self, quiz: Vec<Question>) -> Self {
        self.quiz = Some(quiz);
        self
    }
}

/// Result of creating a session
#[derive(Debug, Clone)]
pub struct CreateSessionOutput {
    pub room_code: RoomCode,
    pub stream: StreamName,
    pub quiz: Vec<Question>,
}

pub struct CreateSessionUseCase {
    store: Arc<dyn LogStore>,
    evaluator: Arc<dyn FeedbackEvaluator>,
    codes: Arc<dyn RoomCodeGenerator>,
    index: Arc<SessionIndex>,
    params: SessionParams,
}

impl CreateSessionUseCase {
    pub fn new(
        store: Arc<dyn LogStore>,
        evaluator: Arc<dyn FeedbackEvaluator>,
        codes: Arc<dyn RoomCodeGenerator>,
        index: Arc<SessionIndex>,
        params: SessionParams,
    ) -> Self {
        Self {
            store,
            evaluator,
            codes,
            index,
            params,
        }
    }

    pub async fn execute(
        &self,
        identity: Option<&Identity>,
        input: CreateSessionInput,
    ) -> Result<CreateSessionOutput, PulseError> {
        let presenter = require_presenter(identity)?;
        if input.lecture_text.trim().is_empty() {
            return Err(DomainError::missing("lecture_text").into());
        }

        let quiz = match input.quiz {
            Some(quiz) => quiz,
            None => {
                info!("No quiz supplied, generating one from the lecture");
                self.evaluator
                    .generate_quiz(&input.lecture_text)
                    .await
                    .map_err(|e| PulseError::upstream("generate quiz", e))?
            }
        };
        validate_quiz(&quiz)?;

        let (room_code, stream) = self.allocate(&presenter.user_id).await?;
        let metadata = SessionMetadata {
            user_id: presenter.user_id.clone(),
            user_name: presenter.presenter_name().to_string(),
            room_code: room_code.clone(),
            created_at: Utc::now(),
            status: SessionStatus::Active,
        };
        let definition = SessionDefinition::new(input.lecture_text, quiz, metadata)?;
        let quiz = definition.quiz.clone();

        self.index
            .claim_room(&presenter.user_id, &stream, &room_code)
            .await
            .map_err(|e| PulseError::upstream("claim room code", e))?;

        self.store
            .append(&stream, &StreamRecord::SessionDefinition(definition))
            .await
            .map_err(|e| PulseError::upstream("create session", e))?;

        self.index
            .register_owner(&presenter.user_id, &stream, &room_code)
            .await;

        info!(room_code = %room_code, stream = %stream, questions = quiz.len(), "Session created");
        Ok(CreateSessionOutput {
            room_code,
            stream,
            quiz,
        })
    }

    /// Draw room codes until one maps to an empty stream for this owner
    async fn allocate(&self, owner_id: &str) -> Result<(RoomCode, StreamName), PulseError> {
        let attempts = self.params.max_code_attempts.max(1);
        for attempt in 1..=attempts {
            let code = self.codes.next_code();
            let stream = StreamName::for_owner(owner_id, &code);
            let existing = self
                .store
                .read(&stream, 1)
                .await
                .map_err(|e| PulseError::upstream("allocate room code", e))?;
            if existing.is_empty() {
                return Ok((code, stream));
            }
            debug!(room_code = %code, attempt, "Room code already used by this owner");
        }
        Err(PulseError::upstream(
            "allocate room code",
            format!("no unused room code after {attempts} attempts"),
        ))
    }
}
