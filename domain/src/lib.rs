//! Domain layer for lecture-pulse
//!
//! This crate contains the session record model, naming rules, and feedback
//! value objects. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Session stream
//!
//! A session is one append-only stream in an external log store. The first
//! record defines the quiz; every later record is a participant submission
//! or a status change. Nothing is ever updated in place.
//!
//! ## Feedback
//!
//! Aggregated feedback is derived from the stream on every read and never
//! stored.

pub mod core;
pub mod feedback;
pub mod identity;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use core::{error::DomainError, model::Model};
pub use feedback::{
    entities::{
        Evaluation, NO_RESPONSES_PLACEHOLDER, QuestionFailure, QuestionFeedback, SessionResults,
        StudentAnswer, needs_reteach,
    },
    insights::{Assessment, SessionInsights},
    parsing::{ResponseParseError, parse_evaluation, parse_plain_text, parse_quiz},
};
pub use identity::{AccessError, Identity, Role, require_presenter};
pub use prompt::PromptTemplate;
pub use session::{
    index::IndexRecord,
    log::{SessionLog, head_definition},
    record::{
        Answer, ParticipantSubmission, Question, SessionDefinition, SessionMetadata,
        SessionStatus, StatusChange, StoredRecord, StreamRecord, validate_quiz,
    },
    room_code::RoomCode,
    stream_name::StreamName,
};
