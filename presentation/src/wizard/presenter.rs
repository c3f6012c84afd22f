//! Console presenter for wizard events
//!
//! Renders [`WizardEvent`]s as they arrive from the controller's channel.
//! Step views are drawn from the controller's current state.

use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use ekyc_application::{ExtractionGateway, WizardController, WizardEvent};
use ekyc_domain::{DocumentType, ExtractionStatus, IssueKind, Step};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Renders wizard events and step views to stdout
pub struct WizardPresenter {
    config: ReplConfig,
    spinner: Option<ProgressBar>,
}

impl WizardPresenter {
    pub fn new(config: ReplConfig) -> Self {
        Self {
            config,
            spinner: None,
        }
    }

    /// Render one event.
    ///
    /// Returns `true` when the step view should be redrawn afterwards.
    pub fn render(&mut self, event: &WizardEvent) -> bool {
        match event {
            WizardEvent::SessionRestored { documents } => {
                println!("{}", "Restored your saved progress.".green());
                if !documents.is_empty() {
                    let names: Vec<&str> = documents.iter().map(|d| d.display_name()).collect();
                    println!("  {} {}", "Attached:".dimmed(), names.join(", "));
                }
                false
            }
            WizardEvent::Reset => {
                println!("{}", "Started over. Saved progress was cleared.".yellow());
                true
            }
            WizardEvent::PersistenceFailed { message } => {
                println!(
                    "{} {}",
                    "Could not save progress:".yellow().bold(),
                    message
                );
                false
            }
            // The review step is drawn by ReviewReady, which follows
            WizardEvent::StepChanged { to, .. } => !to.is_last(),
            WizardEvent::ReviewReady(summary) => {
                print!("{}", ConsoleFormatter::step_header(Step::LAST));
                print!("{}", ConsoleFormatter::format_review(summary));
                false
            }
            WizardEvent::ValidationFailed(report) => {
                print!("{}", ConsoleFormatter::format_validation(report));
                false
            }
            WizardEvent::FieldErrorMarked { field, kind } => {
                let reason = match kind {
                    IssueKind::Missing => "is required",
                    IssueKind::InvalidFormat => "has an invalid format",
                };
                println!("  {} {} {}", "✗".red(), field.label().red(), reason);
                false
            }
            WizardEvent::FieldErrorCleared { field } => {
                println!("  {} {}", "✓".green(), field.label());
                false
            }
            WizardEvent::FileAccepted {
                document,
                file_name,
            } => {
                println!(
                    "  {} {} attached to {}",
                    "✓".green(),
                    file_name.bold(),
                    document.display_name()
                );
                false
            }
            WizardEvent::FileRejected { document, message } => {
                println!(
                    "  {} {}: {}",
                    "✗".red(),
                    document.display_name(),
                    message.red()
                );
                false
            }
            WizardEvent::DocumentRemoved { document } => {
                println!("  {} removed", document.display_name());
                false
            }
            WizardEvent::ExtractionStarted { document } => {
                print!(
                    "{}",
                    ConsoleFormatter::format_extraction(*document, Some(&ExtractionStatus::Pending))
                );
                false
            }
            WizardEvent::ExtractionSucceeded { document, fields } => {
                let status = ExtractionStatus::Extracted(fields.clone());
                print!("{}", ConsoleFormatter::format_extraction(*document, Some(&status)));
                false
            }
            WizardEvent::ExtractionFailed { document, reason } => {
                let status = ExtractionStatus::Failed(reason.clone());
                print!("{}", ConsoleFormatter::format_extraction(*document, Some(&status)));
                false
            }
            WizardEvent::ExtractionCleared { document } => {
                println!(
                    "  {}",
                    format!("Extracted data for {} cleared", document.display_name()).dimmed()
                );
                false
            }
            WizardEvent::SubmitStarted => {
                self.start_spinner();
                false
            }
            WizardEvent::Decision(notice) => {
                self.stop_spinner();
                print!("{}", ConsoleFormatter::format_decision(notice));
                false
            }
        }
    }

    /// Draw the current step from the controller's state
    pub fn render_step<G: ExtractionGateway + 'static>(&self, controller: &WizardController<G>) {
        let step = controller.step();
        if step.is_last() {
            print!("{}", ConsoleFormatter::step_header(step));
            print!(
                "{}",
                ConsoleFormatter::format_review(&controller.review_summary())
            );
            return;
        }

        print!("{}", ConsoleFormatter::step_header(step));
        print!(
            "{}",
            ConsoleFormatter::format_step(
                step,
                controller.inputs(),
                controller.draft(),
                |field| controller.is_marked(field)
            )
        );
        if step == Step::Documents {
            self.render_extractions(controller);
        }
        println!(
            "\n{}",
            "Fill in the fields with 'set', then press Enter to continue.".dimmed()
        );
    }

    /// Extraction panels for every document slot
    pub fn render_extractions<G: ExtractionGateway + 'static>(
        &self,
        controller: &WizardController<G>,
    ) {
        let mut shown = false;
        for document in [
            DocumentType::Pan,
            DocumentType::NationalId,
            DocumentType::VoterId,
        ] {
            let status = controller.extraction_status(document);
            let panel = ConsoleFormatter::format_extraction(document, status);
            if !panel.is_empty() {
                print!("{}", panel);
                shown = true;
            }
        }
        if !shown {
            println!("  {}", "No extraction results yet.".dimmed());
        }
    }

    fn start_spinner(&mut self) {
        if !self.config.show_progress {
            println!("{}", "Verifying your information...".dimmed());
            return;
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Verifying your information...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}
