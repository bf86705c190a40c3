//! Feedback domain - what the aggregation pipeline produces.
//!
//! - [`entities::QuestionFeedback`] / [`entities::SessionResults`] - derived results
//! - [`insights::SessionInsights`] - dashboard summary heuristics
//! - [`parsing`] - extraction of structured generation output

pub mod entities;
pub mod insights;
pub mod parsing;
