//! Feedback value objects - derived from a stream on every read, never stored.

use super::insights::SessionInsights;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Positive summary used for a question nobody has answered
pub const NO_RESPONSES_PLACEHOLDER: &str = "No responses yet for this question.";

/// Keywords in an improvement summary that trigger a re-teach suggestion
const RETEACH_KEYWORDS: [&str; 2] = ["misconception", "confus"];

/// Structured summary returned by the evaluation collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// What participants generally understood
    pub positive_summary: String,
    /// Most common misconception or point of confusion
    pub improvement_summary: String,
    /// Actionable advice for the presenter
    pub teacher_feedback: String,
}

/// One participant's non-empty answer to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentAnswer {
    pub student_id: String,
    pub answer: String,
}

impl StudentAnswer {
    pub fn new(student_id: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            answer: answer.into(),
        }
    }
}

/// Feedback for a single question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFeedback {
    pub positive_summary: String,
    pub improvement_summary: String,
    pub teacher_feedback: String,
    /// Raw answers the summaries were computed from
    pub student_responses: Vec<StudentAnswer>,
}

impl QuestionFeedback {
    /// Feedback for a question with no non-empty answers
    pub fn placeholder() -> Self {
        Self {
            positive_summary: NO_RESPONSES_PLACEHOLDER.to_string(),
            improvement_summary: String::new(),
            teacher_feedback: String::new(),
            student_responses: Vec::new(),
        }
    }

    pub fn from_evaluation(evaluation: Evaluation, answers: Vec<StudentAnswer>) -> Self {
        Self {
            positive_summary: evaluation.positive_summary,
            improvement_summary: evaluation.improvement_summary,
            teacher_feedback: evaluation.teacher_feedback,
            student_responses: answers,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.student_responses.is_empty() && self.positive_summary == NO_RESPONSES_PLACEHOLDER
    }

    /// True when the improvement summary mentions a misconception or
    /// confusion (case-insensitive)
    pub fn signals_confusion(&self) -> bool {
        let lower = self.improvement_summary.to_lowercase();
        RETEACH_KEYWORDS.iter().any(|k| lower.contains(k))
    }
}

/// A question whose evaluation failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFailure {
    pub question_id: u32,
    /// Generic description, safe to show to the presenter
    pub reason: String,
}

/// Aggregated results for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResults {
    /// Number of submission records, duplicates included
    pub total_responses: usize,
    /// Number of distinct participant ids
    pub distinct_participants: usize,
    /// Feedback for every question that completed, keyed by question id
    pub per_question_feedback: BTreeMap<u32, QuestionFeedback>,
    /// Questions whose evaluation failed this round
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_questions: Vec<QuestionFailure>,
    /// Suggested re-teach script, when any question showed confusion
    pub ai_recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<SessionInsights>,
}

impl SessionResults {
    /// Results for a session nobody has answered yet
    pub fn empty() -> Self {
        Self {
            total_responses: 0,
            distinct_participants: 0,
            per_question_feedback: BTreeMap::new(),
            failed_questions: Vec::new(),
            ai_recommendation: None,
            insights: None,
        }
    }

    /// True when at least one question failed to evaluate
    pub fn is_partial(&self) -> bool {
        !self.failed_questions.is_empty()
    }
}

/// True when any question's feedback calls for a re-teach
pub fn needs_reteach<'a>(feedback: impl IntoIterator<Item = &'a QuestionFeedback>) -> bool {
    feedback.into_iter().any(QuestionFeedback::signals_confusion)
}
