//! Feedback evaluator port
//!
//! Everything the aggregation and session-creation flows need from the
//! text-generation service, expressed as domain values.

use super::llm_gateway::GatewayError;
use async_trait::async_trait;
use pulse_domain::{Evaluation, Question, ResponseParseError, StudentAnswer};
use thiserror::Error;

/// A generation request that did not produce a usable result
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("generation request failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("unusable generation output: {0}")]
    Parse(#[from] ResponseParseError),
}

#[async_trait]
pub trait FeedbackEvaluator: Send + Sync {
    /// Produce a short quiz from a lecture transcript
    async fn generate_quiz(&self, lecture_text: &str) -> Result<Vec<Question>, EvaluationError>;

    /// Summarize the class's answers to one question
    async fn evaluate_answers(
        &self,
        lecture_text: &str,
        question: &str,
        answers: &[StudentAnswer],
    ) -> Result<Evaluation, EvaluationError>;

    /// Write a short re-teach script for a question the class struggled with
    async fn recommend_reteach(
        &self,
        lecture_text: &str,
        question: &str,
    ) -> Result<String, EvaluationError>;
}
