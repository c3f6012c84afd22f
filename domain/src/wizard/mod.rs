//! Wizard structure.
//!
//! - [`step::Step`]: the four sequential stages
//! - [`field::FieldId`]: identifiers of every collected input
//! - [`inputs::FormInputs`]: raw text typed into the form

pub mod field;
pub mod inputs;
pub mod step;
