//! Application layer for lecture-pulse
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod error;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionParams;
pub use error::PulseError;
pub use ports::{
    evaluator::{EvaluationError, FeedbackEvaluator},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    log_store::{LogStore, StoreError, StreamInfo},
    room_codes::RoomCodeGenerator,
    simplifier::{SimplifyError, Simplifier},
};
pub use use_cases::aggregate_feedback::AggregateFeedbackUseCase;
pub use use_cases::create_session::{CreateSessionInput, CreateSessionOutput, CreateSessionUseCase};
pub use use_cases::fetch_room_data::{FetchRoomDataUseCase, RoomData};
pub use use_cases::list_sessions::{ListSessionsUseCase, SessionDirectory, SessionSummary};
pub use use_cases::llm_evaluator::LlmFeedbackEvaluator;
pub use use_cases::resolve_room::{ResolvedRoom, RoomResolver};
pub use use_cases::session_index::SessionIndex;
pub use use_cases::set_status::{SetStatusUseCase, StatusOutcome};
pub use use_cases::simplify_question::{SimplifyQuestionUseCase, fallback_simplification};
pub use use_cases::submit_response::{SubmitResponseInput, SubmitResponseUseCase};
