//! Final eligibility evaluation.
//!
//! - [`checks::EligibilityChecks`]: per-criterion results
//! - [`decision::VerificationResult`]: stored outcome with timestamp
//! - [`decision::DecisionNotice`]: message shown to the user

pub mod checks;
pub mod decision;

use chrono::{DateTime, TimeZone, Utc};

use crate::draft::entities::Draft;
use crate::validation::patterns::{
    is_adult_on, is_valid_bank_code, is_valid_email, is_valid_identity_number,
    is_valid_national_id, is_valid_phone,
};
use checks::{Criterion, EligibilityChecks};
use decision::VerificationResult;

/// Stateless evaluator applying the cross-field criteria to a draft.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityEvaluator;

impl EligibilityEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate every criterion independently.
    ///
    /// Age is computed against `now`'s calendar date in its own time zone;
    /// the stored timestamp is `now` in UTC. The draft is not modified.
    pub fn evaluate<Tz: TimeZone>(&self, draft: &Draft, now: DateTime<Tz>) -> VerificationResult {
        let today = now.date_naive();
        let basic = &draft.basic_details;
        let personal = &draft.personal_details;

        let checks = EligibilityChecks::from_fn(|criterion| match criterion {
            Criterion::IdentityNumberFormat => is_valid_identity_number(&personal.identity_number),
            Criterion::NationalIdFormat => is_valid_national_id(&personal.national_id_number),
            Criterion::BankCodeFormat => is_valid_bank_code(&personal.bank_code),
            Criterion::MinimumAge => is_adult_on(&basic.birth_date, today),
            Criterion::DocumentsAttached => draft.all_documents_attached(),
            Criterion::PhoneLength => is_valid_phone(&basic.phone),
            Criterion::EmailFormat => is_valid_email(&basic.email),
        });

        VerificationResult {
            eligible: checks.all_pass(),
            checks,
            timestamp: now.with_timezone(&Utc),
        }
    }
}
