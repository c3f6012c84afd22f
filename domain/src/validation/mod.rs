//! Validation rules.
//!
//! - [`patterns`]: pure format predicates and calendar age
//! - [`engine`]: per-step validation producing a [`engine::ValidationReport`]

pub mod engine;
pub mod patterns;
