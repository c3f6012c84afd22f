//! Extraction service configuration from TOML (`[ocr]` section)

use crate::ocr::DEFAULT_BASE_URL;
use ekyc_domain::DocumentType;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw extraction service configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOcrConfig {
    /// Service root, without a trailing path
    pub base_url: String,
    /// Per-request timeout in seconds (unset = wait indefinitely)
    pub timeout_secs: Option<u64>,
    /// Endpoint overrides
    pub pan_endpoint: Option<String>,
    pub national_id_endpoint: Option<String>,
    pub voter_id_endpoint: Option<String>,
}

impl Default for FileOcrConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            pan_endpoint: None,
            national_id_endpoint: None,
            voter_id_endpoint: None,
        }
    }
}

impl FileOcrConfig {
    /// Configured override for a document's endpoint, if any.
    pub fn endpoint_override(&self, document: DocumentType) -> Option<&str> {
        match document {
            DocumentType::Pan => self.pan_endpoint.as_deref(),
            DocumentType::NationalId => self.national_id_endpoint.as_deref(),
            DocumentType::VoterId => self.voter_id_endpoint.as_deref(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
