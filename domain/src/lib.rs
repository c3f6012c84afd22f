//! Domain layer for ekyc-wizard
//!
//! This crate contains the core rules of the identity-verification wizard:
//! the session draft, field validation, document schemas and the final
//! eligibility decision. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Draft
//!
//! The [`Draft`] is the accumulated, not-yet-submitted form state of one
//! session. Extraction results are kept only for documents that are still
//! attached.
//!
//! ## Steps
//!
//! The wizard has four sequential [`Step`]s. Each step's required fields are
//! checked by [`validate_step`] before the wizard may advance.
//!
//! ## Eligibility
//!
//! [`EligibilityEvaluator`] runs seven independent criteria over a draft;
//! the session is eligible only when all of them pass.

pub mod core;
pub mod document;
pub mod draft;
pub mod eligibility;
pub mod validation;
pub mod wizard;

// Re-export commonly used types
pub use crate::core::error::DomainError;
pub use document::{
    extraction::{ExtractedFields, ExtractionOutcome, ExtractionStatus},
    kind::{DocumentType, FieldSpec},
    upload::{DocumentUpload, MAX_UPLOAD_BYTES},
};
pub use draft::{
    entities::{BasicDetails, Draft, PersonalDetails},
    review::ReviewSummary,
};
pub use eligibility::{
    EligibilityEvaluator,
    checks::{Criterion, EligibilityChecks},
    decision::{DecisionNotice, VerificationResult},
};
pub use validation::engine::{
    FieldFormat, FieldIssue, IssueKind, ValidationReport, check_field, validate_step,
};
pub use wizard::{
    field::FieldId,
    inputs::FormInputs,
    step::{Step, TOTAL_STEPS},
};
