//! Document domain.
//!
//! - [`kind::DocumentType`]: the three identity documents and their field schemas
//! - [`extraction::ExtractionOutcome`]: result of one extraction call
//! - [`upload::DocumentUpload`]: a selected file and the upload size cap

pub mod extraction;
pub mod kind;
pub mod upload;
