//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: masking and date formatting helpers

pub mod error;
pub mod string;
