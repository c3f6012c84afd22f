//! CLI entrypoint for ekyc-wizard
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use ekyc_application::{KeyValueStore, WizardController};
use ekyc_domain::DocumentType;
use ekyc_infrastructure::{
    ConfigLoader, FileConfig, FileKeyValueStore, HttpExtractionClient, MemoryKeyValueStore,
    Severity,
};
use ekyc_presentation::{Cli, OutputConfig, ReplConfig, WizardRepl};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        info!("Configuration files disabled (--no-config)");
        ConfigLoader::load_defaults()
    } else {
        if let Some(path) = &cli.config
            && !path.exists()
        {
            bail!("Config file not found: {}", path.display());
        }
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);

    let issues = config.validate();
    for issue in issues.iter().filter(|i| i.severity == Severity::Warning) {
        warn!("Config: {}", issue);
    }
    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .map(|i| i.to_string())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }

    if !config.output.color || cli.no_color {
        colored::control::set_override(false);
    }

    info!("Starting ekyc wizard");

    // === Dependency Injection ===
    let mut client = HttpExtractionClient::new(&config.ocr.base_url, config.ocr.timeout())
        .context("Failed to create OCR client")?;
    for document in [
        DocumentType::Pan,
        DocumentType::NationalId,
        DocumentType::VoterId,
    ] {
        if let Some(endpoint) = config.ocr.endpoint_override(document) {
            client = client.with_endpoint(document, endpoint);
        }
    }
    info!("OCR service: {}", client.base_url());

    let store: Arc<dyn KeyValueStore> = if config.storage.ephemeral {
        info!("Draft storage: in-memory");
        Arc::new(MemoryKeyValueStore::new())
    } else {
        let dir = match config.storage.dir.clone().or_else(FileKeyValueStore::default_dir) {
            Some(dir) => dir,
            None => bail!("No data directory available; set storage.dir or use --store-dir"),
        };
        info!("Draft storage: {}", dir.display());
        Arc::new(FileKeyValueStore::new(dir))
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let mut controller = WizardController::new(Arc::new(client), store, tx)
        .with_settings(config.wizard.to_settings());
    if cli.reset {
        controller.reset();
    }

    let output = OutputConfig { format: cli.output };
    let repl_config = ReplConfig {
        show_progress: config.output.spinner,
        show_help_on_start: config.output.show_help,
    };
    let repl = WizardRepl::new(controller, rx, output, repl_config);
    repl.run().await?;

    Ok(())
}

/// CLI flags take precedence over every configuration source
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        config.ocr.base_url = base_url.clone();
    }
    if let Some(dir) = &cli.store_dir {
        config.storage.dir = Some(dir.clone());
    }
    if cli.ephemeral {
        config.storage.ephemeral = true;
    }
}

/// Initialize logging based on verbosity level.
///
/// `RUST_LOG` wins over `-v` when set. Logs go to stderr, or to `log_file`
/// when given; the returned guard flushes the file writer on drop.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"), // -vvv or more
        },
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}
