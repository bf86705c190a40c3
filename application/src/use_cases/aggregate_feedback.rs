//! Aggregate feedback use case
//!
//! Turns a session stream into per-question feedback:
//!
//! ```text
//! records ──▶ SessionLog ──▶ answers per question ──▶ evaluate (concurrent)
//!                                                        │
//!                    insights ◀── reteach suggestion ◀───┘
//! ```
//!
//! Nothing is cached or stored; every call evaluates from scratch.

use super::resolve_room::RoomResolver;
use crate::error::PulseError;
use crate::ports::evaluator::FeedbackEvaluator;
use futures::future::join_all;
use pulse_domain::{
    Identity, QuestionFailure, QuestionFeedback, RoomCode, SessionDefinition, SessionInsights,
    SessionLog, SessionResults, StoredRecord, StudentAnswer, needs_reteach, require_presenter,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Reason shown to the presenter for a question that failed to evaluate
const EVALUATION_FAILED: &str = "Feedback could not be generated for this question";

pub struct AggregateFeedbackUseCase {
    evaluator: Arc<dyn FeedbackEvaluator>,
    resolver: Arc<RoomResolver>,
}

impl AggregateFeedbackUseCase {
    pub fn new(evaluator: Arc<dyn FeedbackEvaluator>, resolver: Arc<RoomResolver>) -> Self {
        Self {
            evaluator,
            resolver,
        }
    }

    /// Results for the session behind `room_code`
    pub async fn execute(
        &self,
        identity: Option<&Identity>,
        room_code: &str,
    ) -> Result<SessionResults, PulseError> {
        require_presenter(identity)?;
        let code = RoomCode::parse(room_code)?;
        let room = self.resolver.resolve(&code).await?;
        self.aggregate(&room.records)
            .await
            .ok_or_else(|| PulseError::RoomNotFound(code.to_string()))
    }

    /// Aggregate already-read records; `None` when no definition is present
    pub async fn aggregate(&self, records: &[StoredRecord]) -> Option<SessionResults> {
        let log = SessionLog::from_records(records);
        let definition = log.definition()?;
        if log.skipped() > 0 {
            warn!(skipped = log.skipped(), "Ignoring unrecognized records");
        }

        let total_responses = log.total_responses();
        if total_responses == 0 {
            return Some(SessionResults::empty());
        }

        let answers = answers_by_question(definition, &log);
        let evaluations = join_all(
            definition
                .quiz
                .iter()
                .zip(answers)
                .filter(|(_, answers)| !answers.is_empty())
                .map(|(question, answers)| async move {
                    let outcome = self
                        .evaluator
                        .evaluate_answers(&definition.lecture_text, &question.question, &answers)
                        .await;
                    (question.id, answers, outcome)
                }),
        )
        .await;

        let mut per_question: BTreeMap<u32, QuestionFeedback> = definition
            .quiz
            .iter()
            .map(|q| (q.id, QuestionFeedback::placeholder()))
            .collect();
        let mut failed = Vec::new();
        for (question_id, answers, outcome) in evaluations {
            match outcome {
                Ok(evaluation) => {
                    per_question.insert(
                        question_id,
                        QuestionFeedback::from_evaluation(evaluation, answers),
                    );
                }
                Err(e) => {
                    warn!(question_id, error = %e, "Question evaluation failed");
                    per_question.remove(&question_id);
                    failed.push(QuestionFailure {
                        question_id,
                        reason: EVALUATION_FAILED.to_string(),
                    });
                }
            }
        }

        let ai_recommendation = self.recommendation(definition, &per_question).await;
        let insights = SessionInsights::from_feedback(
            definition.quiz.len(),
            total_responses,
            per_question.values(),
        );

        info!(
            total_responses,
            evaluated = per_question.len(),
            failed = failed.len(),
            "Feedback aggregated"
        );
        Some(SessionResults {
            total_responses,
            distinct_participants: log.distinct_participants(),
            per_question_feedback: per_question,
            failed_questions: failed,
            ai_recommendation,
            insights: Some(insights),
        })
    }

    /// A re-teach script for the first quiz question, when any question
    /// shows confusion
    async fn recommendation(
        &self,
        definition: &SessionDefinition,
        per_question: &BTreeMap<u32, QuestionFeedback>,
    ) -> Option<String> {
        if !needs_reteach(per_question.values()) {
            return None;
        }
        let first = definition.quiz.first()?;
        match self
            .evaluator
            .recommend_reteach(&definition.lecture_text, &first.question)
            .await
        {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "Re-teach recommendation failed");
                None
            }
        }
    }
}

/// Non-empty answers for each quiz question, in quiz order
fn answers_by_question(definition: &SessionDefinition, log: &SessionLog) -> Vec<Vec<StudentAnswer>> {
    definition
        .quiz
        .iter()
        .map(|q| {
            log.submissions()
                .iter()
                .filter_map(|sub| {
                    sub.answer_for(q.id)
                        .filter(|a| !a.is_empty())
                        .map(|a| StudentAnswer::new(sub.student_id.clone(), a))
                })
                .collect()
        })
        .collect()
}
