//! Session-level summary derived from per-question feedback text.
//!
//! These are keyword heuristics over the generated summaries, not a score
//! of the participants' answers.

use super::entities::{NO_RESPONSES_PLACEHOLDER, QuestionFeedback};
use serde::{Deserialize, Serialize};

/// Phrases in a positive summary that mean nobody understood the question
const EMPTY_UNDERSTANDING_MARKERS: [&str; 3] =
    ["no discernible", "i dont know", "no correct understanding"];

/// Phrases in an improvement summary that mark a real gap
const SIGNIFICANT_GAP_MARKERS: [&str; 6] = [
    "misconception",
    "completely lacks",
    "fundamental",
    "confusion",
    "incorrect",
    "does not understand",
];

/// Subset of gap phrases that mark a fundamental misconception
const MAJOR_GAP_MARKERS: [&str; 3] = ["misconception", "completely lacks", "fundamental"];

/// Responses below this count are scaled against it for the response rate
const EXPECTED_CLASS_SIZE: usize = 10;

/// Overall verdict for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Strong,
    Mixed,
    NeedsAttention,
}

impl Assessment {
    /// Verdict for an understanding rate in percent
    pub fn from_rate(understanding_rate: u32) -> Self {
        match understanding_rate {
            70.. => Assessment::Strong,
            40.. => Assessment::Mixed,
            _ => Assessment::NeedsAttention,
        }
    }
}

/// Dashboard summary of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInsights {
    pub questions_well_understood: usize,
    pub questions_needing_improvement: usize,
    pub major_misconceptions: usize,
    /// Percent of quiz questions that were well understood
    pub understanding_rate: u32,
    /// Percent of an expected class of ten that responded, capped at 100
    pub response_rate: u32,
    pub assessment: Assessment,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
}

impl SessionInsights {
    /// Summarize the feedback for a quiz of `quiz_len` questions
    pub fn from_feedback<'a>(
        quiz_len: usize,
        total_responses: usize,
        feedback: impl IntoIterator<Item = &'a QuestionFeedback>,
    ) -> Self {
        let mut well_understood = 0;
        let mut needing_improvement = 0;
        let mut major = 0;
        let mut strengths = Vec::new();
        let mut gaps = Vec::new();

        for fb in feedback {
            let positive = fb.positive_summary.to_lowercase();
            let improvement = fb.improvement_summary.to_lowercase();

            let has_real_positive = !fb.positive_summary.is_empty()
                && fb.positive_summary != NO_RESPONSES_PLACEHOLDER
                && !contains_any(&positive, &EMPTY_UNDERSTANDING_MARKERS);
            let has_gap = !improvement.trim().is_empty()
                && contains_any(&improvement, &SIGNIFICANT_GAP_MARKERS);

            if !fb.positive_summary.is_empty() && fb.positive_summary != NO_RESPONSES_PLACEHOLDER {
                strengths.push(fb.positive_summary.clone());
            }
            if !fb.improvement_summary.trim().is_empty() {
                gaps.push(fb.improvement_summary.clone());
            }

            if has_gap {
                needing_improvement += 1;
                if contains_any(&improvement, &MAJOR_GAP_MARKERS) {
                    major += 1;
                }
            } else if has_real_positive {
                well_understood += 1;
            }
        }

        let understanding_rate = percent(well_understood, quiz_len);
        let response_rate = percent(total_responses, total_responses.max(EXPECTED_CLASS_SIZE));

        Self {
            questions_well_understood: well_understood,
            questions_needing_improvement: needing_improvement,
            major_misconceptions: major,
            understanding_rate,
            response_rate,
            assessment: Assessment::from_rate(understanding_rate),
            strengths,
            gaps,
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}
