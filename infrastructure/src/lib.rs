//! Infrastructure layer for ekyc-wizard
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod ocr;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileConfig, FileOcrConfig, FileOutputConfig, FileStorageConfig,
    FileWizardConfig, Severity,
};
pub use ocr::{DEFAULT_BASE_URL, HttpExtractionClient, OcrClientError};
pub use storage::{FileKeyValueStore, MemoryKeyValueStore};
