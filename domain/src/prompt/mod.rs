//! Prompt domain
//!
//! Templates for the prompts sent to the generation service.

mod template;

pub use template::PromptTemplate;
