//! Parsing of structured generation output.
//!
//! The generation service is asked for JSON, but models still wrap it in
//! Markdown fences or add a sentence around it now and then. These helpers
//! cut the JSON payload out before deserializing. Pure functions, no I/O.

use super::entities::Evaluation;
use crate::session::record::{Question, validate_quiz};
use thiserror::Error;

/// Generation output that could not be turned into the expected shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseParseError {
    #[error("no JSON {expected} found in response")]
    NoJson { expected: &'static str },

    #[error("malformed JSON: {0}")]
    Malformed(String),

    #[error("generated quiz rejected: {0}")]
    InvalidQuiz(String),

    #[error("empty {0}")]
    Empty(&'static str),
}

/// Parse an evaluation object with the three summary fields
pub fn parse_evaluation(response: &str) -> Result<Evaluation, ResponseParseError> {
    let json = extract_json(response, '{', '}').ok_or(ResponseParseError::NoJson {
        expected: "object",
    })?;
    serde_json::from_str(json).map_err(|e| ResponseParseError::Malformed(e.to_string()))
}

/// Parse a generated quiz (`[{"id": 1, "question": "..."}]`) and validate it
pub fn parse_quiz(response: &str) -> Result<Vec<Question>, ResponseParseError> {
    let json = extract_json(response, '[', ']').ok_or(ResponseParseError::NoJson {
        expected: "array",
    })?;
    let quiz: Vec<Question> =
        serde_json::from_str(json).map_err(|e| ResponseParseError::Malformed(e.to_string()))?;
    validate_quiz(&quiz).map_err(|e| ResponseParseError::InvalidQuiz(e.to_string()))?;
    Ok(quiz)
}

/// Clean up a free-text generation (recommendations, simplified text)
pub fn parse_plain_text(response: &str, what: &'static str) -> Result<String, ResponseParseError> {
    let text = strip_fences(response).trim().trim_matches('"').trim();
    if text.is_empty() {
        return Err(ResponseParseError::Empty(what));
    }
    Ok(text.to_string())
}

/// Slice from the first `open` to the last `close`
fn extract_json(response: &str, open: char, close: char) -> Option<&str> {
    let body = strip_fences(response);
    let start = body.find(open)?;
    let end = body.rfind(close)?;
    (end > start).then(|| &body[start..=end])
}

/// Remove a surrounding ```json ... ``` fence if present
fn strip_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
