//! CLI command definitions

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How decisions are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable decision notice
    #[default]
    Text,
    /// Decision notice plus the stored verification result as JSON
    Json,
}

/// CLI arguments for ekyc-wizard
#[derive(Parser, Debug)]
#[command(name = "ekyc")]
#[command(author, version, about = "Guided identity-verification (KYC) wizard")]
#[command(long_about = r#"
ekyc walks you through a four-step identity verification:

1. Basic Details: name, email, phone and birthdate
2. Personal Details: PAN, Aadhaar and bank account
3. Documents: PAN card, Aadhaar card and voter ID images
4. Review: check everything and submit for an eligibility decision

Attached documents are sent to an OCR service and the extracted fields are
shown as soon as they arrive. Progress is saved after every step, so you can
quit and pick up where you left off.

Configuration files are loaded from (in priority order):
1. EKYC_* environment variables (e.g. EKYC_OCR__BASE_URL)
2. --config <path>     Explicit config file
3. ./ekyc.toml         Project-level config
4. ~/.config/ekyc-wizard/config.toml   Global config

Example:
  ekyc
  ekyc --base-url http://ocr.internal:8000 --store-dir ./drafts
  ekyc --ephemeral --output json
"#)]
pub struct Cli {
    /// OCR service base URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Directory for the saved draft (overrides config)
    #[arg(long, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Keep the draft in memory only; nothing is saved
    #[arg(long)]
    pub ephemeral: bool,

    /// Discard any saved draft before starting
    #[arg(long)]
    pub reset: bool,

    /// Output format for decisions
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
