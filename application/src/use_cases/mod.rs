//! Use cases for lecture-pulse sessions

pub mod aggregate_feedback;
pub mod create_session;
pub mod fetch_room_data;
pub mod list_sessions;
pub mod llm_evaluator;
pub mod resolve_room;
pub mod session_index;
pub mod set_status;
pub mod simplify_question;
pub mod submit_response;

#[cfg(test)]
pub(crate) mod test_support;
