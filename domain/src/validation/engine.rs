//! Per-step validation.
//!
//! Validation never fails with an error: it returns a [`ValidationReport`]
//! listing each failing field and why. Every required field must be
//! non-empty after trimming; fields with a declared format are also checked
//! against it.

use super::patterns::{
    BANK_CODE_RE, IDENTITY_NUMBER_RE, NATIONAL_ID_RE, is_valid_email,
};
use crate::core::string::parse_input_date;
use crate::draft::entities::Draft;
use crate::wizard::field::FieldId;
use crate::wizard::inputs::FormInputs;
use crate::wizard::step::Step;
use regex::Regex;

/// Declared constraint on a field, beyond presence.
#[derive(Debug, Clone, Copy)]
pub enum FieldFormat {
    /// Presence only
    Any,
    /// `local@domain.tld`
    Email,
    /// `YYYY-MM-DD` calendar date
    Date,
    /// Must match after capture normalization
    Pattern(&'static Regex),
}

impl FieldFormat {
    pub fn of(field: FieldId) -> Self {
        match field {
            FieldId::Email => FieldFormat::Email,
            FieldId::BirthDate => FieldFormat::Date,
            FieldId::IdentityNumber => FieldFormat::Pattern(&IDENTITY_NUMBER_RE),
            FieldId::NationalIdNumber => FieldFormat::Pattern(&NATIONAL_ID_RE),
            FieldId::BankCode => FieldFormat::Pattern(&BANK_CODE_RE),
            _ => FieldFormat::Any,
        }
    }

    fn accepts(&self, value: &str) -> bool {
        match self {
            FieldFormat::Any => true,
            FieldFormat::Email => is_valid_email(value),
            FieldFormat::Date => parse_input_date(value).is_some(),
            FieldFormat::Pattern(re) => re.is_match(value),
        }
    }
}

/// Why a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Empty after trimming, or no file attached
    Missing,
    /// Present but does not match the declared format
    InvalidFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: FieldId,
    pub kind: IssueKind,
}

/// Outcome of validating one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub step: Step,
    pub issues: Vec<FieldIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Failing fields in form order.
    pub fn failing_fields(&self) -> Vec<FieldId> {
        self.issues.iter().map(|issue| issue.field).collect()
    }

    pub fn is_failing(&self, field: FieldId) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

/// Check a single text value against its field's rules.
pub fn check_field(field: FieldId, value: &str) -> Option<IssueKind> {
    if value.trim().is_empty() {
        return Some(IssueKind::Missing);
    }
    let normalized = field.normalize_capture(value);
    if FieldFormat::of(field).accepts(&normalized) {
        None
    } else {
        Some(IssueKind::InvalidFormat)
    }
}

/// Validate every required field of `step`.
///
/// Text fields are read from `inputs`; document slots from `draft`.
pub fn validate_step(step: Step, inputs: &FormInputs, draft: &Draft) -> ValidationReport {
    let issues = FieldId::required_for(step)
        .iter()
        .filter_map(|&field| {
            let kind = match field {
                FieldId::Document(doc) => {
                    (!draft.has_document(doc)).then_some(IssueKind::Missing)
                }
                _ => check_field(field, inputs.get(field)),
            };
            kind.map(|kind| FieldIssue { field, kind })
        })
        .collect();

    ValidationReport { step, issues }
}
