//! Configuration file loading for ekyc-wizard
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `EKYC_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./ekyc.toml` or `./.ekyc.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/ekyc-wizard/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileConfig, FileOcrConfig, FileOutputConfig, FileStorageConfig,
    FileWizardConfig, Severity,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
