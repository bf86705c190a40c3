//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - generation model identifiers
//! - [`error::DomainError`] - domain-level validation errors

pub mod error;
pub mod model;
pub mod string;
