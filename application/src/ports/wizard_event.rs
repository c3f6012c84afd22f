//! Wizard event types emitted by WizardController for presentation layer rendering
//!
//! These events form the output port from the application layer to the presentation layer.
//! The presentation layer receives them over an unbounded channel and renders them
//! in whatever surface it drives (console REPL today).

use ekyc_domain::{
    DecisionNotice, DocumentType, ExtractedFields, FieldId, IssueKind, ReviewSummary, Step,
    ValidationReport,
};

/// Events emitted by WizardController for presentation layer to render
#[derive(Debug, Clone)]
pub enum WizardEvent {
    // === Session ===
    /// A saved draft was found and loaded at startup
    SessionRestored {
        /// Documents attached in the restored draft
        documents: Vec<DocumentType>,
    },
    /// The session was wiped and the wizard returned to step 1
    Reset,
    /// Writing the draft to durable storage failed (session continues)
    PersistenceFailed { message: String },

    // === Navigation ===
    /// The active step changed
    StepChanged { from: Step, to: Step },
    /// "Next" was refused because the current step has failing fields
    ValidationFailed(ValidationReport),
    /// The review step became active; carries the masked projection
    ReviewReady(ReviewSummary),

    // === Field Marks ===
    /// A live check marked a field as invalid
    FieldErrorMarked { field: FieldId, kind: IssueKind },
    /// A previously marked field was corrected
    FieldErrorCleared { field: FieldId },

    // === Documents ===
    /// A file was accepted into a document slot
    FileAccepted {
        document: DocumentType,
        file_name: String,
    },
    /// A file was refused before upload; the slot is now empty
    FileRejected {
        document: DocumentType,
        message: String,
    },
    /// A document slot was emptied by the user
    DocumentRemoved { document: DocumentType },

    // === Extraction ===
    /// Upload to the extraction service began
    ExtractionStarted { document: DocumentType },
    /// Extraction finished and the fields were recorded
    ExtractionSucceeded {
        document: DocumentType,
        fields: ExtractedFields,
    },
    /// Extraction failed; nothing was recorded
    ExtractionFailed {
        document: DocumentType,
        reason: String,
    },
    /// The extraction panel for a document was hidden
    ExtractionCleared { document: DocumentType },

    // === Submission ===
    /// Eligibility evaluation began
    SubmitStarted,
    /// Eligibility decision is available
    Decision(DecisionNotice),
}
