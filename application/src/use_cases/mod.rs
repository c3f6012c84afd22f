//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod persisted_draft;
pub mod wizard_controller;
