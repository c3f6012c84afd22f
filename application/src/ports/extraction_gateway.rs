//! Extraction gateway port
//!
//! Defines the interface to the document extraction (OCR) service.

use async_trait::async_trait;
use ekyc_domain::{DocumentType, DocumentUpload, ExtractedFields, ExtractionOutcome};
use thiserror::Error;

/// Errors from a single extraction call.
///
/// The display text of each variant is the reason shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Service answered with a non-2xx status
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    /// Service answered 2xx with `success: false`
    #[error("Failed to extract {} data", .0.display_name())]
    Rejected(DocumentType),

    /// Request could not be sent or the connection failed
    #[error("{0}")]
    Transport(String),

    /// Response body could not be read or parsed
    #[error("{0}")]
    InvalidResponse(String),
}

/// Gateway to the extraction service.
///
/// One call per document; implementations make a single attempt and never
/// retry. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ExtractionGateway: Send + Sync {
    /// Upload a document and return the fields extracted from it.
    async fn extract(
        &self,
        document: DocumentType,
        upload: DocumentUpload,
    ) -> Result<ExtractedFields, ExtractionError>;
}

/// Collapse a gateway result into the outcome stored by the wizard.
pub fn to_outcome(result: Result<ExtractedFields, ExtractionError>) -> ExtractionOutcome {
    match result {
        Ok(fields) => ExtractionOutcome::Success(fields),
        Err(e) => ExtractionOutcome::Failure(e.to_string()),
    }
}
