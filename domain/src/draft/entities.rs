//! Draft aggregate.
//!
//! [`Draft`] is the accumulated form state of one session. It serializes to
//! the JSON layout used by the durable store:
//!
//! ```json
//! {
//!   "basicDetails": { "firstName": "...", "lastName": "...", "email": "...", "phone": "...", "dob": "..." },
//!   "personalDetails": { "pan": "...", "aadhar": "...", "accountNumber": "...", "ifsc": "...", "bankName": "..." },
//!   "documents": { "pan": "pan.jpg" },
//!   "ocrResults": { "pan": { "name": "..." } },
//!   "verificationResult": { "eligible": false, "checks": { ... }, "timestamp": "..." }
//! }
//! ```
//!
//! # Invariant
//!
//! Every `ocrResults` key is also a `documents` key. The mutators below are
//! the only way to touch either map, and [`Draft::normalize`] restores the
//! invariant on data loaded from elsewhere.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::document::extraction::ExtractedFields;
use crate::document::kind::DocumentType;
use crate::eligibility::decision::VerificationResult;
use crate::wizard::field::FieldId;
use crate::wizard::inputs::FormInputs;
use crate::wizard::step::Step;

/// Step 1 fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Birthdate as entered (`YYYY-MM-DD`)
    #[serde(rename = "dob")]
    pub birth_date: String,
}

/// Step 2 fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDetails {
    /// PAN, upper-cased on capture
    #[serde(rename = "pan")]
    pub identity_number: String,
    /// Aadhaar number
    #[serde(rename = "aadhar")]
    pub national_id_number: String,
    pub account_number: String,
    /// IFSC, upper-cased on capture
    #[serde(rename = "ifsc")]
    pub bank_code: String,
    pub bank_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Draft {
    pub basic_details: BasicDetails,
    pub personal_details: PersonalDetails,
    documents: BTreeMap<DocumentType, String>,
    ocr_results: BTreeMap<DocumentType, ExtractedFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verification_result: Option<VerificationResult>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured value of a text field. `None` for document fields.
    pub fn field_value(&self, field: FieldId) -> Option<&str> {
        let basic = &self.basic_details;
        let personal = &self.personal_details;
        let value = match field {
            FieldId::FirstName => &basic.first_name,
            FieldId::LastName => &basic.last_name,
            FieldId::Email => &basic.email,
            FieldId::Phone => &basic.phone,
            FieldId::BirthDate => &basic.birth_date,
            FieldId::IdentityNumber => &personal.identity_number,
            FieldId::NationalIdNumber => &personal.national_id_number,
            FieldId::AccountNumber => &personal.account_number,
            FieldId::BankCode => &personal.bank_code,
            FieldId::BankName => &personal.bank_name,
            FieldId::Document(_) => return None,
        };
        Some(value.as_str())
    }

    /// Copy a step's inputs into the draft, applying capture normalization.
    ///
    /// The documents step records files as they are selected, and the review
    /// step has no inputs, so both are no-ops here.
    pub fn capture(&mut self, step: Step, inputs: &FormInputs) {
        let value = |field: FieldId| field.normalize_capture(inputs.get(field));
        match step {
            Step::BasicDetails => {
                self.basic_details = BasicDetails {
                    first_name: value(FieldId::FirstName),
                    last_name: value(FieldId::LastName),
                    email: value(FieldId::Email),
                    phone: value(FieldId::Phone),
                    birth_date: value(FieldId::BirthDate),
                };
            }
            Step::PersonalDetails => {
                self.personal_details = PersonalDetails {
                    identity_number: value(FieldId::IdentityNumber),
                    national_id_number: value(FieldId::NationalIdNumber),
                    account_number: value(FieldId::AccountNumber),
                    bank_code: value(FieldId::BankCode),
                    bank_name: value(FieldId::BankName),
                };
            }
            Step::Documents | Step::Review => {}
        }
    }

    // ==================== Documents ====================

    /// Record a selected file. Any extraction result for the previous file
    /// in the same slot is discarded.
    pub fn attach_document(&mut self, document: DocumentType, file_name: impl Into<String>) {
        self.documents.insert(document, file_name.into());
        self.ocr_results.remove(&document);
    }

    /// Clear a document slot and its extraction result.
    ///
    /// Returns whether a file was attached.
    pub fn remove_document(&mut self, document: DocumentType) -> bool {
        self.ocr_results.remove(&document);
        self.documents.remove(&document).is_some()
    }

    pub fn document(&self, document: DocumentType) -> Option<&str> {
        self.documents.get(&document).map(String::as_str)
    }

    pub fn has_document(&self, document: DocumentType) -> bool {
        self.document(document).is_some_and(|name| !name.is_empty())
    }

    pub fn all_documents_attached(&self) -> bool {
        DocumentType::ALL.iter().all(|doc| self.has_document(*doc))
    }

    pub fn documents(&self) -> impl Iterator<Item = (DocumentType, &str)> {
        self.documents.iter().map(|(doc, name)| (*doc, name.as_str()))
    }

    // ==================== Extraction results ====================

    /// Store extracted fields for an attached document.
    ///
    /// Returns `false` and stores nothing when the document is no longer
    /// attached.
    pub fn record_extraction(&mut self, document: DocumentType, fields: ExtractedFields) -> bool {
        if !self.has_document(document) {
            return false;
        }
        self.ocr_results.insert(document, fields);
        true
    }

    pub fn ocr_result(&self, document: DocumentType) -> Option<&ExtractedFields> {
        self.ocr_results.get(&document)
    }

    pub fn ocr_results(&self) -> impl Iterator<Item = (DocumentType, &ExtractedFields)> {
        self.ocr_results.iter().map(|(doc, fields)| (*doc, fields))
    }

    /// Drop extraction results whose document is not attached.
    ///
    /// Returns the number of entries removed.
    pub fn normalize(&mut self) -> usize {
        let before = self.ocr_results.len();
        let documents = &self.documents;
        self.ocr_results
            .retain(|doc, _| documents.get(doc).is_some_and(|name| !name.is_empty()));
        before - self.ocr_results.len()
    }

    // ==================== Verification ====================

    pub fn verification_result(&self) -> Option<&VerificationResult> {
        self.verification_result.as_ref()
    }

    pub fn set_verification_result(&mut self, result: VerificationResult) {
        self.verification_result = Some(result);
    }
}
