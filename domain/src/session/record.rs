//! Stream records
//!
//! Every entry in a session stream is a JSON object tagged by its `type`
//! field. The tags and field names are the wire format shared with existing
//! streams, so they must not be renamed.

use super::room_code::RoomCode;
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One open-ended quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Positive id, unique within its quiz
    pub id: u32,
    /// Question text shown to participants
    pub question: String,
}

impl Question {
    pub fn new(id: u32, question: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
        }
    }
}

/// Check that a quiz can be published.
///
/// A quiz needs at least one question, every id must be positive and
/// unique, and no question text may be blank.
pub fn validate_quiz(quiz: &[Question]) -> Result<(), DomainError> {
    if quiz.is_empty() {
        return Err(DomainError::InvalidQuiz("quiz has no questions".to_string()));
    }
    let mut seen = HashSet::new();
    for q in quiz {
        if q.id == 0 {
            return Err(DomainError::InvalidQuiz(
                "question ids must be positive".to_string(),
            ));
        }
        if !seen.insert(q.id) {
            return Err(DomainError::InvalidQuiz(format!(
                "duplicate question id {}",
                q.id
            )));
        }
        if q.question.trim().is_empty() {
            return Err(DomainError::InvalidQuiz(format!(
                "question {} has no text",
                q.id
            )));
        }
    }
    Ok(())
}

/// A participant's answer to one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub q_id: u32,
    pub answer: String,
}

impl Answer {
    pub fn new(q_id: u32, answer: impl Into<String>) -> Self {
        Self {
            q_id,
            answer: answer.into(),
        }
    }
}

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Active,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(SessionStatus::Active),
            "completed" => Ok(SessionStatus::Completed),
            other => Err(DomainError::invalid(
                "status",
                format!("expected 'active' or 'completed', got '{other}'"),
            )),
        }
    }
}

/// Ownership and lifecycle details embedded in the definition record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub user_id: String,
    pub user_name: String,
    pub room_code: RoomCode,
    pub created_at: DateTime<Utc>,
    pub status: SessionStatus,
}

/// The session-defining record, always the first append to a stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDefinition {
    pub lecture_text: String,
    pub quiz: Vec<Question>,
    /// Absent on sessions created before ownership was recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_metadata: Option<SessionMetadata>,
}

impl SessionDefinition {
    /// Build a definition, rejecting blank lecture text and invalid quizzes
    pub fn new(
        lecture_text: impl Into<String>,
        quiz: Vec<Question>,
        metadata: SessionMetadata,
    ) -> Result<Self, DomainError> {
        let lecture_text = lecture_text.into();
        if lecture_text.trim().is_empty() {
            return Err(DomainError::missing("lecture_text"));
        }
        validate_quiz(&quiz)?;
        Ok(Self {
            lecture_text,
            quiz,
            session_metadata: Some(metadata),
        })
    }

    /// Status recorded at creation time (legacy definitions count as active)
    pub fn initial_status(&self) -> SessionStatus {
        self.session_metadata
            .as_ref()
            .map(|m| m.status)
            .unwrap_or_default()
    }

    pub fn question(&self, id: u32) -> Option<&Question> {
        self.quiz.iter().find(|q| q.id == id)
    }
}

/// One participant's answers, appended once per visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSubmission {
    pub student_id: String,
    pub answers: Vec<Answer>,
}

impl ParticipantSubmission {
    /// Build a submission, enforcing at most one answer per question id
    pub fn new(student_id: impl Into<String>, answers: Vec<Answer>) -> Result<Self, DomainError> {
        let student_id = student_id.into();
        if student_id.trim().is_empty() {
            return Err(DomainError::missing("student_id"));
        }
        if answers.is_empty() {
            return Err(DomainError::missing("answers"));
        }
        let mut seen = HashSet::new();
        for a in &answers {
            if !seen.insert(a.q_id) {
                return Err(DomainError::invalid(
                    "answers",
                    format!("question {} answered more than once", a.q_id),
                ));
            }
        }
        Ok(Self {
            student_id,
            answers,
        })
    }

    /// Answer text for `q_id`, if this submission has one
    pub fn answer_for(&self, q_id: u32) -> Option<&str> {
        self.answers
            .iter()
            .find(|a| a.q_id == q_id)
            .map(|a| a.answer.as_str())
    }
}

/// Owner-issued lifecycle transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: SessionStatus,
    pub changed_at: DateTime<Utc>,
}

/// A typed session stream record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StreamRecord {
    #[serde(rename = "quiz_data")]
    SessionDefinition(SessionDefinition),
    #[serde(rename = "student_response")]
    ParticipantSubmission(ParticipantSubmission),
    #[serde(rename = "status_changed")]
    StatusChanged(StatusChange),
}

impl StreamRecord {
    /// Wire tag of this record
    pub fn kind(&self) -> &'static str {
        match self {
            StreamRecord::SessionDefinition(_) => "quiz_data",
            StreamRecord::ParticipantSubmission(_) => "student_response",
            StreamRecord::StatusChanged(_) => "status_changed",
        }
    }

    /// Serialize to the stringified body stored in the log
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A record as read back from the store
///
/// Reads never fail on a single bad body: valid JSON with an unknown tag is
/// kept as [`StoredRecord::Unrecognized`], and anything else is passed
/// through untouched as [`StoredRecord::Raw`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StoredRecord {
    Known(StreamRecord),
    Unrecognized(serde_json::Value),
    Raw { body: String },
}

impl StoredRecord {
    /// Decode a stored body
    pub fn decode(body: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => match serde_json::from_value::<StreamRecord>(value.clone()) {
                Ok(record) => StoredRecord::Known(record),
                Err(_) => StoredRecord::Unrecognized(value),
            },
            Err(_) => StoredRecord::Raw {
                body: body.to_string(),
            },
        }
    }

    pub fn as_known(&self) -> Option<&StreamRecord> {
        match self {
            StoredRecord::Known(record) => Some(record),
            _ => None,
        }
    }

    /// The definition, if this record is one
    pub fn as_definition(&self) -> Option<&SessionDefinition> {
        match self.as_known()? {
            StreamRecord::SessionDefinition(def) => Some(def),
            _ => None,
        }
    }
}

impl From<StreamRecord> for StoredRecord {
    fn from(record: StreamRecord) -> Self {
        StoredRecord::Known(record)
    }
}
