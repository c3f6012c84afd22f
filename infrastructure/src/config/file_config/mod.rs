//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod ocr;
mod output;
mod storage;
mod wizard;

pub use ocr::FileOcrConfig;
pub use output::FileOutputConfig;
pub use storage::FileStorageConfig;
pub use wizard::FileWizardConfig;

use ekyc_domain::DocumentType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a configuration issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Setting is ignored or suspicious; startup continues
    Warning,
    /// Setting cannot work; startup should stop
    Error,
}

/// A single problem found in the merged configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted key of the offending setting
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Extraction service settings
    pub ocr: FileOcrConfig,
    /// Draft storage settings
    pub storage: FileStorageConfig,
    /// Wizard behavior settings
    pub wizard: FileWizardConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let base_url = self.ocr.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                field: "ocr.base_url".to_string(),
                message: format!("'{}' must start with http:// or https://", self.ocr.base_url),
            });
        }

        if self.ocr.timeout_secs == Some(0) {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                field: "ocr.timeout_secs".to_string(),
                message: "cannot be 0 (leave unset to wait indefinitely)".to_string(),
            });
        }

        for document in DocumentType::ALL {
            if let Some(endpoint) = self.ocr.endpoint_override(document)
                && !endpoint.starts_with('/')
            {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    field: format!("ocr.{}", endpoint_key(document)),
                    message: format!("'{endpoint}' must start with '/'"),
                });
            }
        }

        if self.storage.ephemeral && self.storage.dir.is_some() {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                field: "storage.dir".to_string(),
                message: "ignored because storage.ephemeral is true".to_string(),
            });
        }

        issues
    }
}

fn endpoint_key(document: DocumentType) -> &'static str {
    match document {
        DocumentType::Pan => "pan_endpoint",
        DocumentType::NationalId => "national_id_endpoint",
        DocumentType::VoterId => "voter_id_endpoint",
    }
}
