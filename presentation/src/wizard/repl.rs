//! Interactive wizard REPL
//!
//! Reads commands from stdin while extraction results arrive in the
//! background. Both are multiplexed with `tokio::select!` so a finished
//! extraction is shown without waiting for the next command.

use super::command::{WizardCommand, help_text};
use super::presenter::WizardPresenter;
use crate::cli::commands::OutputFormat;
use crate::config::{OutputConfig, ReplConfig};
use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use ekyc_application::{ExtractionGateway, NextOutcome, WizardController, WizardEvent};
use ekyc_domain::{DocumentType, DocumentUpload, MAX_UPLOAD_BYTES, TOTAL_STEPS};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Input that woke the main loop
enum Wake {
    Line(Option<String>),
    Extraction,
}

/// Interactive wizard session over stdin/stdout
pub struct WizardRepl<G: ExtractionGateway + 'static> {
    controller: WizardController<G>,
    events: mpsc::UnboundedReceiver<WizardEvent>,
    presenter: WizardPresenter,
    output: OutputConfig,
    config: ReplConfig,
}

impl<G: ExtractionGateway + 'static> WizardRepl<G> {
    pub fn new(
        controller: WizardController<G>,
        events: mpsc::UnboundedReceiver<WizardEvent>,
        output: OutputConfig,
        config: ReplConfig,
    ) -> Self {
        Self {
            controller,
            events,
            presenter: WizardPresenter::new(config.clone()),
            output,
            config,
        }
    }

    pub fn controller(&self) -> &WizardController<G> {
        &self.controller
    }

    /// Run until `quit` or end of input
    pub async fn run(mut self) -> std::io::Result<()> {
        self.print_welcome();
        self.drain_events();
        self.presenter.render_step(&self.controller);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            self.prompt()?;

            let pending = self.controller.has_pending_extractions();
            let wake = tokio::select! {
                line = lines.next_line() => Wake::Line(line?),
                Some((document, disposition)) = self.controller.next_extraction(), if pending => {
                    debug!("{} extraction applied: {:?}", document, disposition);
                    Wake::Extraction
                }
            };

            match wake {
                Wake::Line(Some(line)) => {
                    let flow = self.handle_line(&line).await;
                    self.drain_events();
                    if flow == Flow::Quit {
                        break;
                    }
                }
                Wake::Line(None) => {
                    println!();
                    break;
                }
                Wake::Extraction => {
                    // Keep the result on its own line rather than after the prompt
                    println!();
                    self.drain_events();
                }
            }
        }

        println!("Bye!");
        Ok(())
    }

    /// Parse and execute one line of input
    pub async fn handle_line(&mut self, line: &str) -> Flow {
        match WizardCommand::parse(line) {
            Ok(command) => self.execute(command).await,
            Err(e) => {
                println!("{}", e.to_string().red());
                Flow::Continue
            }
        }
    }

    async fn execute(&mut self, command: WizardCommand) -> Flow {
        match command {
            WizardCommand::Set { field, value } => {
                let result = self
                    .controller
                    .on_field_change(field, &value)
                    .and_then(|_| self.controller.on_field_blur(field));
                if let Err(e) = result {
                    println!("{}", e.to_string().red());
                }
            }
            WizardCommand::Attach { document, path } => self.attach(document, &path).await,
            WizardCommand::Remove(document) => {
                if !self.controller.on_file_removed(document) {
                    println!("{} has no file attached.", document.display_name());
                }
            }
            WizardCommand::Next => match self.controller.on_next() {
                NextOutcome::Saved => {
                    println!("{}", "Saved. Type 'submit' to verify.".green());
                }
                NextOutcome::Advanced { .. } | NextOutcome::Blocked(_) => {}
            },
            WizardCommand::Back => {
                if self.controller.on_previous().is_none() {
                    println!("Already on the first step.");
                }
            }
            WizardCommand::Submit => self.submit().await,
            WizardCommand::Show => {
                self.drain_events();
                self.presenter.render_step(&self.controller);
            }
            WizardCommand::Status => self.presenter.render_extractions(&self.controller),
            WizardCommand::Reset => self.controller.reset(),
            WizardCommand::Help => println!("{}", help_text()),
            WizardCommand::Quit => {
                if self.controller.has_pending_extractions() {
                    println!(
                        "{}",
                        "Extractions still in progress will be discarded.".yellow()
                    );
                }
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    async fn attach(&mut self, document: DocumentType, path: &Path) {
        let bytes = match read_capped(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                println!(
                    "{} {}: {}",
                    "Could not read".red(),
                    path.display(),
                    e
                );
                return;
            }
        };

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content_type = mime_guess::from_path(path).first_or_octet_stream();
        let upload =
            DocumentUpload::new(file_name, bytes).with_content_type(content_type.essence_str());

        if let Err(e) = self.controller.on_file_selected(document, upload) {
            debug!("File refused: {}", e);
        }
    }

    async fn submit(&mut self) {
        let result = {
            let submit = self.controller.on_submit();
            tokio::pin!(submit);
            // Render events (the spinner) while the decision is being computed
            loop {
                tokio::select! {
                    result = &mut submit => break result,
                    Some(event) = self.events.recv() => {
                        self.presenter.render(&event);
                    }
                }
            }
        };

        match result {
            Ok(_) => {
                self.drain_events();
                if self.output.format == OutputFormat::Json
                    && let Some(verification) = self.controller.draft().verification_result()
                {
                    println!("{}", ConsoleFormatter::format_json(verification));
                }
            }
            Err(e) => println!("{}", e.to_string().red()),
        }
    }

    fn drain_events(&mut self) {
        let mut redraw = false;
        while let Ok(event) = self.events.try_recv() {
            redraw |= self.presenter.render(&event);
        }
        if redraw {
            self.presenter.render_step(&self.controller);
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            KYC Verification Wizard          │");
        println!("╰─────────────────────────────────────────────╯");
        if self.config.show_help_on_start {
            println!();
            println!("{}", help_text());
        }
        println!();
    }

    fn prompt(&self) -> std::io::Result<()> {
        let step = self.controller.step();
        print!(
            "{} ",
            format!("[{}/{}] >", step.number(), TOTAL_STEPS).cyan().bold()
        );
        std::io::stdout().flush()
    }
}

/// Read a file, stopping one byte past the upload limit.
///
/// An oversized file is still refused by the controller, without ever
/// holding more than the limit plus one byte in memory.
async fn read_capped(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = tokio::fs::File::open(path).await?;
    let mut bytes = Vec::new();
    file.take(MAX_UPLOAD_BYTES as u64 + 1)
        .read_to_end(&mut bytes)
        .await?;
    Ok(bytes)
}
