//! Field identifiers.
//!
//! [`FieldId`] names every input the wizard collects. Validation failures,
//! error-state requests and field-change commands all refer to fields by
//! this identifier.

use std::fmt;

use super::step::Step;
use crate::core::error::DomainError;
use crate::document::kind::DocumentType;

/// Maximum length of the national-ID input after whitespace is stripped.
pub const NATIONAL_ID_INPUT_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    FirstName,
    LastName,
    Email,
    Phone,
    BirthDate,
    IdentityNumber,
    NationalIdNumber,
    AccountNumber,
    BankCode,
    BankName,
    /// File slot for a document
    Document(DocumentType),
}

const BASIC_FIELDS: &[FieldId] = &[
    FieldId::FirstName,
    FieldId::LastName,
    FieldId::Email,
    FieldId::Phone,
    FieldId::BirthDate,
];

const PERSONAL_FIELDS: &[FieldId] = &[
    FieldId::IdentityNumber,
    FieldId::NationalIdNumber,
    FieldId::AccountNumber,
    FieldId::BankCode,
    FieldId::BankName,
];

const DOCUMENT_FIELDS: &[FieldId] = &[
    FieldId::Document(DocumentType::Pan),
    FieldId::Document(DocumentType::NationalId),
    FieldId::Document(DocumentType::VoterId),
];

impl FieldId {
    /// Every text field, in form order.
    pub fn text_fields() -> impl Iterator<Item = FieldId> {
        BASIC_FIELDS.iter().chain(PERSONAL_FIELDS).copied()
    }

    /// Required fields of a step, in form order. The review step has none.
    pub fn required_for(step: Step) -> &'static [FieldId] {
        match step {
            Step::BasicDetails => BASIC_FIELDS,
            Step::PersonalDetails => PERSONAL_FIELDS,
            Step::Documents => DOCUMENT_FIELDS,
            Step::Review => &[],
        }
    }

    pub fn is_document(&self) -> bool {
        matches!(self, FieldId::Document(_))
    }

    /// Stable identifier, matching the form's input ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::FirstName => "firstName",
            FieldId::LastName => "lastName",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::BirthDate => "dob",
            FieldId::IdentityNumber => "pan",
            FieldId::NationalIdNumber => "aadhar",
            FieldId::AccountNumber => "accountNumber",
            FieldId::BankCode => "ifsc",
            FieldId::BankName => "bankName",
            FieldId::Document(DocumentType::Pan) => "panFile",
            FieldId::Document(DocumentType::NationalId) => "aadharFile",
            FieldId::Document(DocumentType::VoterId) => "voterFile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldId::FirstName => "First Name",
            FieldId::LastName => "Last Name",
            FieldId::Email => "Email",
            FieldId::Phone => "Phone",
            FieldId::BirthDate => "Date of Birth",
            FieldId::IdentityNumber => "PAN Number",
            FieldId::NationalIdNumber => "Aadhaar Number",
            FieldId::AccountNumber => "Bank Account Number",
            FieldId::BankCode => "IFSC Code",
            FieldId::BankName => "Bank Name",
            FieldId::Document(DocumentType::Pan) => "PAN Card",
            FieldId::Document(DocumentType::NationalId) => "Aadhaar Card",
            FieldId::Document(DocumentType::VoterId) => "Voter ID",
        }
    }

    /// Input-time normalization applied as the user types.
    ///
    /// The national-ID input drops whitespace and is cut at 12 characters;
    /// every other field is kept verbatim.
    pub fn normalize_input(&self, value: &str) -> String {
        match self {
            FieldId::NationalIdNumber => value
                .chars()
                .filter(|c| !c.is_whitespace())
                .take(NATIONAL_ID_INPUT_LEN)
                .collect(),
            _ => value.to_string(),
        }
    }

    /// Capture-time normalization applied when the step is saved.
    pub fn normalize_capture(&self, value: &str) -> String {
        match self {
            FieldId::IdentityNumber | FieldId::BankCode => value.trim().to_uppercase(),
            _ => value.to_string(),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FieldId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        match lowered.as_str() {
            "firstname" | "first-name" | "first" => Ok(FieldId::FirstName),
            "lastname" | "last-name" | "last" => Ok(FieldId::LastName),
            "email" => Ok(FieldId::Email),
            "phone" => Ok(FieldId::Phone),
            "dob" | "birthdate" | "birth-date" => Ok(FieldId::BirthDate),
            "pan" | "identity-number" => Ok(FieldId::IdentityNumber),
            "aadhar" | "aadhaar" | "national-id" => Ok(FieldId::NationalIdNumber),
            "accountnumber" | "account-number" | "account" => Ok(FieldId::AccountNumber),
            "ifsc" | "bank-code" => Ok(FieldId::BankCode),
            "bankname" | "bank-name" | "bank" => Ok(FieldId::BankName),
            "panfile" => Ok(FieldId::Document(DocumentType::Pan)),
            "aadharfile" | "aadhaarfile" => Ok(FieldId::Document(DocumentType::NationalId)),
            "voterfile" | "voteridfile" | "bankfile" => {
                Ok(FieldId::Document(DocumentType::VoterId))
            }
            _ => Err(DomainError::UnknownField(s.to_string())),
        }
    }
}
