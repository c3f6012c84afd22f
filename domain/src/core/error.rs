//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown document type: {0}")]
    UnknownDocumentType(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Step out of range: {0} (expected 1..={max})", max = crate::wizard::step::TOTAL_STEPS)]
    StepOutOfRange(u8),
}
