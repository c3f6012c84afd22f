//! Document type definitions.
//!
//! [`DocumentType`] is the closed set of identity documents the wizard
//! collects. Each variant carries its upload endpoint and the schema of
//! fields the extraction service is expected to return for it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::DomainError;

/// Identity document collected in the documents step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Permanent Account Number card
    #[serde(rename = "pan")]
    Pan,
    /// National identity card (Aadhaar)
    #[serde(rename = "aadhaar")]
    NationalId,
    /// Voter identity card
    #[serde(rename = "voterid")]
    VoterId,
}

/// A single field the extraction service may return for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key in the extraction response payload
    pub key: &'static str,
    /// Human-readable label for display
    pub label: &'static str,
}

const fn field(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { key, label }
}

const PAN_FIELDS: &[FieldSpec] = &[
    field("name", "Name"),
    field("pan_no", "PAN Number"),
    field("date_of_birth", "Date of Birth"),
    field("fathers_name", "Father's Name"),
];

const NATIONAL_ID_FIELDS: &[FieldSpec] = &[
    field("name", "Name"),
    field("aadhar_no", "Aadhaar Number"),
    field("date_of_birth", "Date of Birth"),
    field("full_address", "Address"),
    field("gender", "Gender"),
];

const VOTER_ID_FIELDS: &[FieldSpec] = &[
    field("name", "Name"),
    field("voter_id", "Voter ID"),
    field("date_of_birth", "Date of Birth"),
    field("age", "Age"),
    field("gender", "Gender"),
    field("full_address", "Address"),
    field("fathers_name", "Father's Name"),
];

impl DocumentType {
    /// All document types, in the order the documents step lists them.
    pub const ALL: [DocumentType; 3] = [
        DocumentType::Pan,
        DocumentType::NationalId,
        DocumentType::VoterId,
    ];

    /// Stable identifier used in persisted state and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Pan => "pan",
            DocumentType::NationalId => "aadhaar",
            DocumentType::VoterId => "voterid",
        }
    }

    /// Display name used in user-facing messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentType::Pan => "PAN",
            DocumentType::NationalId => "Aadhaar",
            DocumentType::VoterId => "voter ID",
        }
    }

    /// Default upload path on the extraction service.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            DocumentType::Pan => "/api/v1/ocr/upload/pan",
            DocumentType::NationalId => "/api/v1/ocr/upload/ind_aadhaar",
            DocumentType::VoterId => "/api/v1/ocr/upload/voterid",
        }
    }

    /// Fields the extraction service returns for this document, in display order.
    pub fn expected_fields(&self) -> &'static [FieldSpec] {
        match self {
            DocumentType::Pan => PAN_FIELDS,
            DocumentType::NationalId => NATIONAL_ID_FIELDS,
            DocumentType::VoterId => VOTER_ID_FIELDS,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pan" => Ok(DocumentType::Pan),
            "aadhaar" | "aadhar" | "national-id" | "nationalid" => Ok(DocumentType::NationalId),
            "voterid" | "voter-id" | "voter" => Ok(DocumentType::VoterId),
            _ => Err(DomainError::UnknownDocumentType(s.to_string())),
        }
    }
}
