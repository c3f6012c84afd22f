//! Named eligibility criteria.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One eligibility criterion, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Criterion {
    IdentityNumberFormat,
    NationalIdFormat,
    BankCodeFormat,
    MinimumAge,
    DocumentsAttached,
    PhoneLength,
    EmailFormat,
}

impl Criterion {
    pub const ALL: [Criterion; 7] = [
        Criterion::IdentityNumberFormat,
        Criterion::NationalIdFormat,
        Criterion::BankCodeFormat,
        Criterion::MinimumAge,
        Criterion::DocumentsAttached,
        Criterion::PhoneLength,
        Criterion::EmailFormat,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Criterion::IdentityNumberFormat => "PAN number format",
            Criterion::NationalIdFormat => "Aadhaar number format",
            Criterion::BankCodeFormat => "IFSC code format",
            Criterion::MinimumAge => "Age 18 or older",
            Criterion::DocumentsAttached => "All documents uploaded",
            Criterion::PhoneLength => "10-digit phone number",
            Criterion::EmailFormat => "Email format",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Per-criterion results of one evaluation.
///
/// Built once by the evaluator and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityChecks {
    #[serde(rename = "panValid")]
    identity_number_valid: bool,
    #[serde(rename = "aadharValid")]
    national_id_valid: bool,
    #[serde(rename = "ifscValid")]
    bank_code_valid: bool,
    age_valid: bool,
    documents_uploaded: bool,
    phone_valid: bool,
    email_valid: bool,
}

impl EligibilityChecks {
    pub(crate) fn from_fn(mut check: impl FnMut(Criterion) -> bool) -> Self {
        Self {
            identity_number_valid: check(Criterion::IdentityNumberFormat),
            national_id_valid: check(Criterion::NationalIdFormat),
            bank_code_valid: check(Criterion::BankCodeFormat),
            age_valid: check(Criterion::MinimumAge),
            documents_uploaded: check(Criterion::DocumentsAttached),
            phone_valid: check(Criterion::PhoneLength),
            email_valid: check(Criterion::EmailFormat),
        }
    }

    pub fn get(&self, criterion: Criterion) -> bool {
        match criterion {
            Criterion::IdentityNumberFormat => self.identity_number_valid,
            Criterion::NationalIdFormat => self.national_id_valid,
            Criterion::BankCodeFormat => self.bank_code_valid,
            Criterion::MinimumAge => self.age_valid,
            Criterion::DocumentsAttached => self.documents_uploaded,
            Criterion::PhoneLength => self.phone_valid,
            Criterion::EmailFormat => self.email_valid,
        }
    }

    /// Criteria with their results, in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, bool)> + '_ {
        Criterion::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn all_pass(&self) -> bool {
        self.iter().all(|(_, passed)| passed)
    }

    pub fn failed(&self) -> Vec<Criterion> {
        self.iter()
            .filter(|(_, passed)| !passed)
            .map(|(c, _)| c)
            .collect()
    }
}
