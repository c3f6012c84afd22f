//! Console output formatter for the wizard

use colored::Colorize;
use ekyc_domain::{
    DecisionNotice, DocumentType, Draft, ExtractionStatus, FieldId, FormInputs, IssueKind,
    ReviewSummary, Step, TOTAL_STEPS, ValidationReport,
};
use serde::Serialize;

/// Guidance shown under every failed extraction
pub const EXTRACTION_FAILED_HINT: &str =
    "Please try uploading a clearer image or contact support.";

/// Formats wizard state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Step banner with a progress indicator
    pub fn step_header(step: Step) -> String {
        let dots: Vec<String> = (1..=TOTAL_STEPS)
            .map(|n| {
                if n < step.number() {
                    "●".green().to_string()
                } else if n == step.number() {
                    "●".cyan().bold().to_string()
                } else {
                    "○".dimmed().to_string()
                }
            })
            .collect();

        format!("{}\n{:^60}\n", Self::header(&step.to_string()), dots.join(" "))
    }

    /// Fields of a data-entry step with their current values.
    ///
    /// `is_marked` decides which fields are drawn in error state.
    pub fn format_step(
        step: Step,
        inputs: &FormInputs,
        draft: &Draft,
        is_marked: impl Fn(FieldId) -> bool,
    ) -> String {
        let mut output = String::new();
        for &field in FieldId::required_for(step) {
            let value = match field {
                FieldId::Document(document) => draft.document(document).unwrap_or(""),
                _ => inputs.get(field),
            };
            output.push_str(&Self::field_line(field, value, is_marked(field)));
            output.push('\n');
        }
        output
    }

    /// One `label: value` row
    pub fn field_line(field: FieldId, value: &str, marked: bool) -> String {
        let label = format!("{:<20}", field.label());
        let label = if marked {
            label.red().bold()
        } else {
            label.normal()
        };
        let marker = if marked { "✗".red() } else { " ".normal() };

        let value = if value.is_empty() {
            let placeholder = if field.is_document() {
                "(no file)"
            } else {
                "(empty)"
            };
            placeholder.dimmed().to_string()
        } else {
            value.to_string()
        };

        format!(" {} {} {}  {}", marker, label, value, field.as_str().dimmed())
    }

    /// Extraction panel for one document slot; empty when there is nothing to show
    pub fn format_extraction(document: DocumentType, status: Option<&ExtractionStatus>) -> String {
        match status {
            None => String::new(),
            Some(ExtractionStatus::Pending) => format!(
                "   {}\n",
                format!("Extracting data from {} document...", document.as_str()).dimmed()
            ),
            Some(ExtractionStatus::Extracted(fields)) => {
                let mut output = format!(
                    "   {}\n",
                    format!("✓ Extracted Data ({})", document.display_name())
                        .green()
                        .bold()
                );
                for (label, value) in fields.display_rows(document) {
                    output.push_str(&format!("     {} {}\n", format!("{label}:").dimmed(), value));
                }
                output
            }
            Some(ExtractionStatus::Failed(reason)) => format!(
                "   {}\n     {}\n     {}\n",
                format!("✗ Extraction Failed ({})", document.display_name())
                    .red()
                    .bold(),
                reason,
                EXTRACTION_FAILED_HINT.dimmed()
            ),
        }
    }

    /// Failing fields of a blocked step
    pub fn format_validation(report: &ValidationReport) -> String {
        let mut output = format!(
            "{}\n",
            "Please complete the highlighted fields before continuing."
                .yellow()
                .bold()
        );
        for issue in &report.issues {
            let reason = match issue.kind {
                IssueKind::Missing if issue.field.is_document() => "file required",
                IssueKind::Missing => "required",
                IssueKind::InvalidFormat => "invalid format",
            };
            output.push_str(&format!(
                "  {} {} ({})\n",
                "✗".red(),
                issue.field.label(),
                reason
            ));
        }
        output
    }

    /// Review step contents
    pub fn format_review(summary: &ReviewSummary) -> String {
        let mut output = Self::section_header("Review Your Information");
        for (label, value) in summary.rows() {
            output.push_str(&format!("  {} {}\n", format!("{label:<15}").cyan(), value));
        }
        output.push_str(&format!(
            "\n{}\n",
            "Type 'submit' to verify, or 'back' to make changes.".dimmed()
        ));
        output
    }

    /// Decision shown after submission
    pub fn format_decision(notice: &DecisionNotice) -> String {
        let mut output = String::new();
        let line = "=".repeat(60);
        if notice.eligible {
            output.push_str(&format!("\n{}\n", line.green()));
            output.push_str(&format!("{} {}\n", "✓".green().bold(), notice.title.green().bold()));
        } else {
            output.push_str(&format!("\n{}\n", line.red()));
            output.push_str(&format!("{} {}\n", "✗".red().bold(), notice.title.red().bold()));
        }

        output.push('\n');
        output.push_str(&notice.message);
        output.push('\n');

        if !notice.guidance.is_empty() {
            output.push('\n');
            for hint in &notice.guidance {
                output.push_str(&format!("  * {}\n", hint));
            }
        }

        let line = if notice.eligible { line.green() } else { line.red() };
        output.push_str(&format!("{}\n", line));
        output
    }

    /// Format any serializable value as pretty JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
