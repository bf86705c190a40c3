//! Ports (interfaces) for external dependencies
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod evaluator;
pub mod llm_gateway;
pub mod log_store;
pub mod room_codes;
pub mod simplifier;
