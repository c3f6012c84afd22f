//! Presentation layer for ekyc-wizard
//!
//! This crate contains CLI definitions, console formatting and the
//! interactive wizard REPL.

pub mod cli;
pub mod config;
pub mod output;
pub mod wizard;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use wizard::{WizardCommand, WizardPresenter, WizardRepl};
