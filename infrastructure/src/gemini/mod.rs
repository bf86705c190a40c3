//! Gemini adapter
//!
//! Implements [`LlmGateway`](pulse_application::LlmGateway) over the
//! `generateContent` REST endpoint.

mod error;
mod gateway;
mod protocol;
mod session;

pub use error::GeminiError;
pub use gateway::{DEFAULT_GEMINI_BASE_URL, GeminiGateway};
pub use session::GeminiSession;
