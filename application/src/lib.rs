//! Application layer for ekyc-wizard
//!
//! This crate contains the wizard controller, draft persistence, port
//! definitions and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::WizardSettings;
pub use ports::{
    clock::{Clock, FixedClock, SystemClock},
    extraction_gateway::{ExtractionError, ExtractionGateway},
    key_value_store::{KeyValueStore, StoreError},
    wizard_event::WizardEvent,
};
pub use use_cases::persisted_draft::{DRAFT_STORAGE_KEY, PersistedDraft};
pub use use_cases::wizard_controller::{
    CompletionDisposition, ExtractionCompletion, FILE_TOO_LARGE_MESSAGE, NextOutcome,
    WizardController, WizardError,
};
