//! LLM-backed feedback evaluator
//!
//! Implements [`FeedbackEvaluator`] on top of any [`LlmGateway`]: builds the
//! prompts from [`PromptTemplate`], opens one session per request, and
//! parses the structured output.

use crate::ports::evaluator::{EvaluationError, FeedbackEvaluator};
use crate::ports::llm_gateway::LlmGateway;
use async_trait::async_trait;
use pulse_domain::core::string::truncate;
use pulse_domain::{
    Evaluation, Model, PromptTemplate, Question, StudentAnswer, parse_evaluation,
    parse_plain_text, parse_quiz,
};
use std::sync::Arc;
use tracing::debug;

pub struct LlmFeedbackEvaluator {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
}

impl LlmFeedbackEvaluator {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model) -> Self {
        Self { gateway, model }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }
}

#[async_trait]
impl FeedbackEvaluator for LlmFeedbackEvaluator {
    async fn generate_quiz(&self, lecture_text: &str) -> Result<Vec<Question>, EvaluationError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, PromptTemplate::quiz_system())
            .await?;
        let response = session
            .send_expecting_json(&PromptTemplate::quiz_generation(lecture_text))
            .await?;
        debug!(model = %self.model, response = %truncate(&response, 200), "Quiz generated");
        Ok(parse_quiz(&response)?)
    }

    async fn evaluate_answers(
        &self,
        lecture_text: &str,
        question: &str,
        answers: &[StudentAnswer],
    ) -> Result<Evaluation, EvaluationError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(&self.model, PromptTemplate::evaluation_system())
            .await?;
        let prompt = PromptTemplate::evaluation_prompt(lecture_text, question, answers);
        let response = session.send_expecting_json(&prompt).await?;
        debug!(
            question = %truncate(question, 60),
            answers = answers.len(),
            "Answers evaluated"
        );
        Ok(parse_evaluation(&response)?)
    }

    async fn recommend_reteach(
        &self,
        lecture_text: &str,
        question: &str,
    ) -> Result<String, EvaluationError> {
        let session = self.gateway.create_session(&self.model).await?;
        let response = session
            .send(&PromptTemplate::recommendation_prompt(lecture_text, question))
            .await?;
        Ok(parse_plain_text(&response, "recommendation")?)
    }
}
