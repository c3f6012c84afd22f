//! Wizard Controller
//!
//! Owns the session: the current step, the field inputs, the [`Draft`] and the
//! extraction state of each document slot. User events are the only inputs;
//! every observable change is emitted as a [`WizardEvent`] for the
//! presentation layer to render.
//!
//! Extraction requests run as tasks in a [`JoinSet`] and are applied one at a
//! time, in completion order, by whoever drives [`WizardController::next_extraction`].
//! A completion is applied only if its slot has not been reselected or
//! emptied since the request was issued.

mod tracker;

pub use tracker::ExtractionTracker;

use crate::config::WizardSettings;
use crate::ports::clock::{Clock, SystemClock};
use crate::ports::extraction_gateway::{ExtractionGateway, to_outcome};
use crate::ports::key_value_store::KeyValueStore;
use crate::ports::wizard_event::WizardEvent;
use crate::use_cases::persisted_draft::PersistedDraft;
use ekyc_domain::{
    DecisionNotice, DocumentType, DocumentUpload, Draft, EligibilityEvaluator, ExtractionOutcome,
    ExtractionStatus, FieldId, FormInputs, IssueKind, MAX_UPLOAD_BYTES, ReviewSummary, Step,
    ValidationReport, check_field, validate_step,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// User-facing message for an oversized file.
pub const FILE_TOO_LARGE_MESSAGE: &str = "File size must be less than 5MB";

/// Errors returned by wizard commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("File size must be less than 5MB ({document}: {size} bytes, limit {limit})")]
    FileTooLarge {
        document: DocumentType,
        size: usize,
        limit: usize,
    },

    #[error("{0} is a document slot, not a text field")]
    NotATextField(FieldId),

    #[error("Submission is only available on the review step (currently on {0})")]
    NotOnFinalStep(Step),
}

/// Result of a "next" command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    /// Step captured, saved and the wizard moved forward
    Advanced { from: Step, to: Step },
    /// Final step captured and saved; there is nowhere further to go
    Saved,
    /// Current step has failing fields; nothing was captured
    Blocked(ValidationReport),
}

/// A finished extraction task
#[derive(Debug, Clone)]
pub struct ExtractionCompletion {
    pub document: DocumentType,
    /// Slot generation at the time the request was issued
    pub generation: u64,
    pub outcome: ExtractionOutcome,
}

/// What happened to a completion when it was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionDisposition {
    /// Fields were recorded in the draft
    Recorded,
    /// Failure was shown for the slot
    Failed,
    /// Slot was reselected or emptied since the request; result dropped
    Discarded,
}

/// Wizard controller managing one verification session
pub struct WizardController<G: ExtractionGateway + 'static> {
    gateway: Arc<G>,
    persisted: PersistedDraft,
    clock: Arc<dyn Clock>,
    evaluator: EligibilityEvaluator,
    settings: WizardSettings,
    draft: Draft,
    inputs: FormInputs,
    step: Step,
    /// Fields currently shown in error state
    error_marks: BTreeSet<FieldId>,
    extractions: ExtractionTracker,
    /// In-flight extraction requests
    pending: JoinSet<ExtractionCompletion>,
    /// Set while an evaluation is underway. `on_submit` borrows the
    /// controller mutably, so a second submission cannot start meanwhile;
    /// the flag only reports an evaluation that has not completed.
    submitting: bool,
    /// Channel sender for wizard events
    tx: mpsc::UnboundedSender<WizardEvent>,
}

impl<G: ExtractionGateway + 'static> WizardController<G> {
    /// Create a controller and restore any saved draft from `store`
    pub fn new(
        gateway: Arc<G>,
        store: Arc<dyn KeyValueStore>,
        tx: mpsc::UnboundedSender<WizardEvent>,
    ) -> Self {
        let mut controller = Self {
            gateway,
            persisted: PersistedDraft::new(store),
            clock: Arc::new(SystemClock),
            evaluator: EligibilityEvaluator::new(),
            settings: WizardSettings::default(),
            draft: Draft::new(),
            inputs: FormInputs::new(),
            step: Step::FIRST,
            error_marks: BTreeSet::new(),
            extractions: ExtractionTracker::new(),
            pending: JoinSet::new(),
            submitting: false,
            tx,
        };
        controller.restore();
        controller
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_settings(mut self, settings: WizardSettings) -> Self {
        self.settings = settings;
        self
    }

    // ==================== Accessors ====================

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn inputs(&self) -> &FormInputs {
        &self.inputs
    }

    /// Whether `field` is currently shown in error state
    pub fn is_marked(&self, field: FieldId) -> bool {
        self.error_marks.contains(&field)
    }

    pub fn error_marks(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.error_marks.iter().copied()
    }

    pub fn extraction_status(&self, document: DocumentType) -> Option<&ExtractionStatus> {
        self.extractions.status(document)
    }

    /// Whether any extraction task has not been collected yet
    pub fn has_pending_extractions(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Whether a submission was started and has not produced a decision
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Read-only projection of the draft for the review step
    pub fn review_summary(&self) -> ReviewSummary {
        ReviewSummary::from_draft(&self.draft)
    }

    // ==================== Fields ====================

    /// Record a new value for a text field.
    ///
    /// A field in error state is cleared as soon as it becomes non-empty.
    pub fn on_field_change(&mut self, field: FieldId, value: &str) -> Result<(), WizardError> {
        if field.is_document() {
            return Err(WizardError::NotATextField(field));
        }
        self.inputs.set(field, value);
        if !self.inputs.get(field).trim().is_empty() {
            self.unmark(field);
        }
        Ok(())
    }

    /// Run the live check for a single field (leaving the input).
    ///
    /// Returns the issue now shown for the field, if any.
    pub fn on_field_blur(&mut self, field: FieldId) -> Result<Option<IssueKind>, WizardError> {
        if field.is_document() {
            return Err(WizardError::NotATextField(field));
        }
        let issue = check_field(field, self.inputs.get(field));
        match issue {
            Some(kind) => self.mark(field, kind),
            None => self.unmark(field),
        }
        Ok(issue)
    }

    fn mark(&mut self, field: FieldId, kind: IssueKind) {
        if self.error_marks.insert(field) {
            self.emit(WizardEvent::FieldErrorMarked { field, kind });
        }
    }

    fn unmark(&mut self, field: FieldId) {
        if self.error_marks.remove(&field) {
            self.emit(WizardEvent::FieldErrorCleared { field });
        }
    }

    // ==================== Documents ====================

    /// Attach a file to a document slot and start extracting it.
    ///
    /// Files over the size cap are refused before any request is made and
    /// leave the slot empty.
    pub fn on_file_selected(
        &mut self,
        document: DocumentType,
        upload: DocumentUpload,
    ) -> Result<(), WizardError> {
        if upload.exceeds_limit() {
            let size = upload.size();
            warn!(
                "Rejected {} upload '{}': {} bytes exceeds {} byte limit",
                document, upload.file_name, size, MAX_UPLOAD_BYTES
            );
            self.empty_slot(document);
            self.emit(WizardEvent::FileRejected {
                document,
                message: FILE_TOO_LARGE_MESSAGE.to_string(),
            });
            return Err(WizardError::FileTooLarge {
                document,
                size,
                limit: MAX_UPLOAD_BYTES,
            });
        }

        let file_name = upload.file_name.clone();
        self.draft.attach_document(document, file_name.clone());
        self.unmark(FieldId::Document(document));
        self.persist();
        self.emit(WizardEvent::FileAccepted {
            document,
            file_name: file_name.clone(),
        });

        let generation = self.extractions.begin(document);
        info!(
            "Extracting {} from '{}' (generation {})",
            document, file_name, generation
        );
        self.emit(WizardEvent::ExtractionStarted { document });

        let gateway = Arc::clone(&self.gateway);
        self.pending.spawn(async move {
            let outcome = to_outcome(gateway.extract(document, upload).await);
            ExtractionCompletion {
                document,
                generation,
                outcome,
            }
        });
        Ok(())
    }

    /// Empty a document slot, dropping its extraction result.
    ///
    /// Returns whether a file was attached.
    pub fn on_file_removed(&mut self, document: DocumentType) -> bool {
        let removed = self.empty_slot(document);
        if removed {
            info!("Removed {} document", document);
            self.emit(WizardEvent::DocumentRemoved { document });
        }
        removed
    }

    fn empty_slot(&mut self, document: DocumentType) -> bool {
        if self.extractions.clear(document) {
            self.emit(WizardEvent::ExtractionCleared { document });
        }
        let removed = self.draft.remove_document(document);
        if removed {
            self.persist();
        }
        removed
    }

    // ==================== Extraction ====================

    /// Wait for the next extraction task to finish and apply it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_extraction(&mut self) -> Option<(DocumentType, CompletionDisposition)> {
        while let Some(joined) = self.pending.join_next().await {
            match joined {
                Ok(completion) => {
                    let document = completion.document;
                    return Some((document, self.apply_extraction(completion)));
                }
                Err(e) => {
                    warn!("Extraction task join error: {}", e);
                }
            }
        }
        None
    }

    /// Apply a finished extraction to the session.
    pub fn apply_extraction(&mut self, completion: ExtractionCompletion) -> CompletionDisposition {
        let ExtractionCompletion {
            document,
            generation,
            outcome,
        } = completion;

        if !self.extractions.is_current(document, generation) || !self.draft.has_document(document)
        {
            debug!(
                "Discarding stale {} extraction (generation {})",
                document, generation
            );
            return CompletionDisposition::Discarded;
        }

        self.extractions
            .settle(document, ExtractionStatus::from(outcome.clone()));

        match outcome {
            ExtractionOutcome::Success(fields) => {
                info!("Extracted {} field(s) from {}", fields.len(), document);
                self.draft.record_extraction(document, fields.clone());
                self.persist();
                self.emit(WizardEvent::ExtractionSucceeded { document, fields });
                CompletionDisposition::Recorded
            }
            ExtractionOutcome::Failure(reason) => {
                warn!("{} extraction failed: {}", document, reason);
                self.emit(WizardEvent::ExtractionFailed { document, reason });
                CompletionDisposition::Failed
            }
        }
    }

    // ==================== Navigation ====================

    /// Validate the current step; on success capture, save and advance.
    pub fn on_next(&mut self) -> NextOutcome {
        let current = self.step;
        let report = validate_step(current, &self.inputs, &self.draft);

        if !report.is_valid() {
            debug!(
                "Step {} blocked by {} failing field(s)",
                current.number(),
                report.issues.len()
            );
            for &field in FieldId::required_for(current) {
                if report.is_failing(field) {
                    self.error_marks.insert(field);
                } else {
                    self.error_marks.remove(&field);
                }
            }
            self.emit(WizardEvent::ValidationFailed(report.clone()));
            return NextOutcome::Blocked(report);
        }

        for &field in FieldId::required_for(current) {
            self.unmark(field);
        }
        self.draft.capture(current, &self.inputs);
        self.persist();

        match current.next() {
            Some(next) => {
                self.move_to(next);
                NextOutcome::Advanced {
                    from: current,
                    to: next,
                }
            }
            None => NextOutcome::Saved,
        }
    }

    /// Go back one step without validating or saving.
    pub fn on_previous(&mut self) -> Option<Step> {
        let previous = self.step.previous()?;
        self.move_to(previous);
        Some(previous)
    }

    fn move_to(&mut self, to: Step) {
        let from = self.step;
        self.step = to;
        info!("{} -> {}", from, to);
        self.emit(WizardEvent::StepChanged { from, to });
        if to.is_last() {
            self.emit(WizardEvent::ReviewReady(self.review_summary()));
        }
    }

    // ==================== Submission ====================

    /// Evaluate eligibility for the accumulated draft.
    ///
    /// Only available on the final step. The decision is stored in the draft
    /// and saved; the draft itself is kept so the result can be shown again.
    pub async fn on_submit(&mut self) -> Result<DecisionNotice, WizardError> {
        if !self.step.is_last() {
            return Err(WizardError::NotOnFinalStep(self.step));
        }

        self.submitting = true;
        self.emit(WizardEvent::SubmitStarted);
        if !self.settings.verification_delay.is_zero() {
            tokio::time::sleep(self.settings.verification_delay).await;
        }

        let result = self.evaluator.evaluate(&self.draft, self.clock.now());
        self.submitting = false;
        let failed = result.checks.failed();
        if failed.is_empty() {
            info!("Verification passed");
        } else {
            info!("Verification failed on {} criteria: {:?}", failed.len(), failed);
        }

        let notice = DecisionNotice::for_result(&result, &self.draft.basic_details.first_name);
        self.draft.set_verification_result(result);
        self.persist();
        self.emit(WizardEvent::Decision(notice.clone()));
        Ok(notice)
    }

    // ==================== Session ====================

    /// Discard the session: storage, draft, inputs, marks and panels.
    ///
    /// Extractions still in flight are ignored when they finish.
    pub fn reset(&mut self) {
        if let Err(e) = self.persisted.clear() {
            warn!("Failed to clear saved draft: {}", e);
            self.emit(WizardEvent::PersistenceFailed {
                message: e.to_string(),
            });
        }
        self.draft = Draft::new();
        self.inputs.clear();
        self.error_marks.clear();
        self.extractions.clear_all();
        self.submitting = false;
        self.step = Step::FIRST;
        info!("Session reset");
        self.emit(WizardEvent::Reset);
    }

    fn restore(&mut self) {
        let draft = self.persisted.load();
        if draft == Draft::new() {
            return;
        }

        for (document, fields) in draft.ocr_results() {
            self.extractions
                .settle(document, ExtractionStatus::Extracted(fields.clone()));
        }
        self.inputs = FormInputs::from_draft(&draft);
        let documents: Vec<DocumentType> = draft.documents().map(|(doc, _)| doc).collect();
        self.draft = draft;

        info!("Restored saved draft ({} document(s))", documents.len());
        self.emit(WizardEvent::SessionRestored { documents });
    }

    fn persist(&mut self) {
        if let Err(e) = self.persisted.save(&self.draft) {
            warn!("Failed to save draft: {}", e);
            self.emit(WizardEvent::PersistenceFailed {
                message: e.to_string(),
            });
        }
    }

    fn emit(&self, event: WizardEvent) {
        // Receiver gone means the front end has shut down
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::FixedClock;
    use crate::ports::extraction_gateway::ExtractionError;
    use crate::ports::key_value_store::StoreError;
    use crate::use_cases::persisted_draft::DRAFT_STORAGE_KEY;
    use async_trait::async_trait;
    use chrono::{FixedOffset, TimeZone};
    use ekyc_domain::ExtractedFields;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // ==================== Mock implementations ====================

    /// Gateway answering by file name; unknown files are rejected
    #[derive(Default)]
    struct MockGateway {
        responses: HashMap<String, Result<ExtractedFields, ExtractionError>>,
        calls: Mutex<Vec<(DocumentType, String)>>,
    }

    impl MockGateway {
        fn new() -> Self {
            Self::default()
        }

        fn respond(
            mut self,
            file_name: &str,
            result: Result<ExtractedFields, ExtractionError>,
        ) -> Self {
            self.responses.insert(file_name.to_string(), result);
            self
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ExtractionGateway for MockGateway {
        async fn extract(
            &self,
            document: DocumentType,
            upload: DocumentUpload,
        ) -> Result<ExtractedFields, ExtractionError> {
            self.calls
                .lock()
                .unwrap()
                .push((document, upload.file_name.clone()));
            self.responses
                .get(&upload.file_name)
                .cloned()
                .unwrap_or(Err(ExtractionError::Rejected(document)))
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        entries: Mutex<HashMap<String, String>>,
    }

    impl MemoryStore {
        fn saved_draft(&self) -> Option<Draft> {
            self.entries
                .lock()
                .unwrap()
                .get(DRAFT_STORAGE_KEY)
                .map(|raw| serde_json::from_str(raw).unwrap())
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }

    // ==================== Test Helpers ====================

    type Rx = mpsc::UnboundedReceiver<WizardEvent>;

    fn fixed_clock() -> Arc<dyn Clock> {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        Arc::new(FixedClock(
            ist.with_ymd_and_hms(2026, 10, 15, 10, 0, 0).unwrap(),
        ))
    }

    fn controller_with(
        gateway: MockGateway,
        store: Arc<MemoryStore>,
    ) -> (WizardController<MockGateway>, Arc<MockGateway>, Rx) {
        let gateway = Arc::new(gateway);
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = WizardController::new(Arc::clone(&gateway), store, tx)
            .with_clock(fixed_clock())
            .with_settings(WizardSettings::immediate());
        (controller, gateway, rx)
    }

    fn controller() -> (WizardController<MockGateway>, Rx) {
        let (controller, _, rx) = controller_with(MockGateway::new(), Arc::new(MemoryStore::default()));
        (controller, rx)
    }

    fn drain(rx: &mut Rx) -> Vec<WizardEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn upload(name: &str) -> DocumentUpload {
        DocumentUpload::new(name, vec![0u8; 64])
    }

    fn fields(name: &str) -> ExtractedFields {
        ExtractedFields::new().with("name", name)
    }

    fn fill_basic(controller: &mut WizardController<MockGateway>, dob: &str) {
        controller.on_field_change(FieldId::FirstName, "Asha").unwrap();
        controller.on_field_change(FieldId::LastName, "Rao").unwrap();
        controller
            .on_field_change(FieldId::Email, "asha@example.com")
            .unwrap();
        controller.on_field_change(FieldId::Phone, "9876543210").unwrap();
        controller.on_field_change(FieldId::BirthDate, dob).unwrap();
    }

    fn fill_personal(controller: &mut WizardController<MockGateway>) {
        controller
            .on_field_change(FieldId::IdentityNumber, "abcde1234f")
            .unwrap();
        controller
            .on_field_change(FieldId::NationalIdNumber, "1234 5678 9012")
            .unwrap();
        controller
            .on_field_change(FieldId::AccountNumber, "001122334455")
            .unwrap();
        controller.on_field_change(FieldId::BankCode, "sbin0001234").unwrap();
        controller
            .on_field_change(FieldId::BankName, "State Bank")
            .unwrap();
    }

    fn attach_all(controller: &mut WizardController<MockGateway>) {
        controller
            .on_file_selected(DocumentType::Pan, upload("pan.jpg"))
            .unwrap();
        controller
            .on_file_selected(DocumentType::NationalId, upload("aadhaar.jpg"))
            .unwrap();
        controller
            .on_file_selected(DocumentType::VoterId, upload("voter.jpg"))
            .unwrap();
    }

    /// Walk a controller to the review step with the given birthdate
    fn walk_to_review(controller: &mut WizardController<MockGateway>, dob: &str) {
        fill_basic(controller, dob);
        assert!(matches!(controller.on_next(), NextOutcome::Advanced { .. }));
        fill_personal(controller);
        assert!(matches!(controller.on_next(), NextOutcome::Advanced { .. }));
        attach_all(controller);
        assert!(matches!(controller.on_next(), NextOutcome::Advanced { .. }));
        assert_eq!(controller.step(), Step::Review);
    }

    // ==================== Session start ====================

    #[tokio::test]
    async fn test_fresh_session_starts_at_first_step() {
        let (controller, mut rx) = controller();

        assert_eq!(controller.step(), Step::BasicDetails);
        assert_eq!(controller.draft(), &Draft::new());
        assert!(!controller.has_pending_extractions());
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_restores_saved_draft() {
        let store = Arc::new(MemoryStore::default());
        let mut saved = Draft::new();
        saved.capture(
            Step::BasicDetails,
            &FormInputs::new().with(FieldId::FirstName, "Asha"),
        );
        saved.attach_document(DocumentType::Pan, "pan.jpg");
        saved.record_extraction(DocumentType::Pan, fields("ASHA RAO"));
        PersistedDraft::new(store.clone()).save(&saved).unwrap();

        let (controller, _, mut rx) = controller_with(MockGateway::new(), store);

        assert_eq!(controller.step(), Step::BasicDetails);
        assert_eq!(controller.inputs().get(FieldId::FirstName), "Asha");
        assert_eq!(
            controller.extraction_status(DocumentType::Pan),
            Some(&ExtractionStatus::Extracted(fields("ASHA RAO")))
        );
        let events = drain(&mut rx);
        assert!(matches!(
            events.as_slice(),
            [WizardEvent::SessionRestored { documents }] if documents == &vec![DocumentType::Pan]
        ));
    }

    // ==================== Fields ====================

    #[tokio::test]
    async fn test_next_blocked_on_empty_step() {
        let store = Arc::new(MemoryStore::default());
        let (mut controller, _, mut rx) = controller_with(MockGateway::new(), store.clone());

        let outcome = controller.on_next();

        let NextOutcome::Blocked(report) = outcome else {
            panic!("expected Blocked");
        };
        assert!(report.is_failing(FieldId::FirstName));
        assert!(report.is_failing(FieldId::BirthDate));
        assert_eq!(controller.step(), Step::BasicDetails);
        assert!(controller.is_marked(FieldId::Email));
        assert!(store.saved_draft().is_none());
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [WizardEvent::ValidationFailed(_)]
        ));
    }

    #[tokio::test]
    async fn test_field_change_clears_mark() {
        let (mut controller, mut rx) = controller();
        controller.on_next();
        drain(&mut rx);

        controller.on_field_change(FieldId::FirstName, "Asha").unwrap();

        assert!(!controller.is_marked(FieldId::FirstName));
        assert!(controller.is_marked(FieldId::LastName));
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [WizardEvent::FieldErrorCleared {
                field: FieldId::FirstName
            }]
        ));
    }

    #[tokio::test]
    async fn test_whitespace_does_not_clear_mark() {
        let (mut controller, _rx) = controller();
        controller.on_next();

        controller.on_field_change(FieldId::FirstName, "   ").unwrap();

        assert!(controller.is_marked(FieldId::FirstName));
    }

    #[tokio::test]
    async fn test_field_blur_marks_bad_format() {
        let (mut controller, mut rx) = controller();
        controller.on_field_change(FieldId::Email, "not-an-email").unwrap();

        let issue = controller.on_field_blur(FieldId::Email).unwrap();

        assert_eq!(issue, Some(IssueKind::InvalidFormat));
        assert!(controller.is_marked(FieldId::Email));
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [WizardEvent::FieldErrorMarked {
                field: FieldId::Email,
                kind: IssueKind::InvalidFormat
            }]
        ));

        controller.on_field_change(FieldId::Email, "a@b.co").unwrap();
        assert_eq!(controller.on_field_blur(FieldId::Email).unwrap(), None);
        assert!(!controller.is_marked(FieldId::Email));
    }

    #[tokio::test]
    async fn test_document_slot_is_not_a_text_field() {
        let (mut controller, _rx) = controller();
        let field = FieldId::Document(DocumentType::Pan);

        assert_eq!(
            controller.on_field_change(field, "x"),
            Err(WizardError::NotATextField(field))
        );
        assert_eq!(
            controller.on_field_blur(field),
            Err(WizardError::NotATextField(field))
        );
    }

    // ==================== Navigation ====================

    #[tokio::test]
    async fn test_next_captures_and_persists() {
        let store = Arc::new(MemoryStore::default());
        let (mut controller, _, mut rx) = controller_with(MockGateway::new(), store.clone());
        fill_basic(&mut controller, "1990-04-12");

        let outcome = controller.on_next();

        assert_eq!(
            outcome,
            NextOutcome::Advanced {
                from: Step::BasicDetails,
                to: Step::PersonalDetails
            }
        );
        let saved = store.saved_draft().unwrap();
        assert_eq!(saved.basic_details.first_name, "Asha");
        assert_eq!(saved.basic_details.birth_date, "1990-04-12");
        assert!(drain(&mut rx).iter().any(|e| matches!(
            e,
            WizardEvent::StepChanged {
                from: Step::BasicDetails,
                to: Step::PersonalDetails
            }
        )));
    }

    #[tokio::test]
    async fn test_personal_details_normalized_on_capture() {
        let (mut controller, _rx) = controller();
        fill_basic(&mut controller, "1990-04-12");
        controller.on_next();
        fill_personal(&mut controller);

        controller.on_next();

        let personal = &controller.draft().personal_details;
        assert_eq!(personal.identity_number, "ABCDE1234F");
        assert_eq!(personal.national_id_number, "123456789012");
        assert_eq!(personal.bank_code, "SBIN0001234");
        assert_eq!(controller.step(), Step::Documents);
    }

    #[tokio::test]
    async fn test_bad_identity_number_blocks() {
        let (mut controller, _rx) = controller();
        fill_basic(&mut controller, "1990-04-12");
        controller.on_next();
        fill_personal(&mut controller);
        controller
            .on_field_change(FieldId::IdentityNumber, "ABCD12345F")
            .unwrap();

        let NextOutcome::Blocked(report) = controller.on_next() else {
            panic!("expected Blocked");
        };
        assert_eq!(report.failing_fields(), vec![FieldId::IdentityNumber]);
        assert_eq!(controller.step(), Step::PersonalDetails);
    }

    #[tokio::test]
    async fn test_previous_keeps_inputs() {
        let (mut controller, _rx) = controller();
        assert_eq!(controller.on_previous(), None);

        fill_basic(&mut controller, "1990-04-12");
        controller.on_next();
        assert_eq!(controller.on_previous(), Some(Step::BasicDetails));

        assert_eq!(controller.step(), Step::BasicDetails);
        assert_eq!(controller.inputs().get(FieldId::LastName), "Rao");
    }

    #[tokio::test]
    async fn test_documents_step_requires_all_files() {
        let (mut controller, _rx) = controller();
        fill_basic(&mut controller, "1990-04-12");
        controller.on_next();
        fill_personal(&mut controller);
        controller.on_next();
        controller
            .on_file_selected(DocumentType::Pan, upload("pan.jpg"))
            .unwrap();

        let NextOutcome::Blocked(report) = controller.on_next() else {
            panic!("expected Blocked");
        };
        assert_eq!(
            report.failing_fields(),
            vec![
                FieldId::Document(DocumentType::NationalId),
                FieldId::Document(DocumentType::VoterId)
            ]
        );
    }

    #[tokio::test]
    async fn test_entering_review_emits_summary() {
        let (mut controller, mut rx) = controller();
        walk_to_review(&mut controller, "1990-04-12");

        let summary = drain(&mut rx).into_iter().find_map(|e| match e {
            WizardEvent::ReviewReady(summary) => Some(summary),
            _ => None,
        });
        let summary = summary.expect("review summary emitted");
        assert_eq!(summary, controller.review_summary());
    }

    #[tokio::test]
    async fn test_next_on_last_step_saves_without_moving() {
        let (mut controller, _rx) = controller();
        walk_to_review(&mut controller, "1990-04-12");

        assert_eq!(controller.on_next(), NextOutcome::Saved);
        assert_eq!(controller.step(), Step::Review);
    }

    // ==================== Documents ====================

    #[tokio::test]
    async fn test_oversized_file_rejected_before_upload() {
        let store = Arc::new(MemoryStore::default());
        let (mut controller, gateway, mut rx) = controller_with(MockGateway::new(), store);
        let big = DocumentUpload::new("huge.png", vec![0u8; MAX_UPLOAD_BYTES + 1]);

        let err = controller
            .on_file_selected(DocumentType::NationalId, big)
            .unwrap_err();

        assert_eq!(
            err,
            WizardError::FileTooLarge {
                document: DocumentType::NationalId,
                size: MAX_UPLOAD_BYTES + 1,
                limit: MAX_UPLOAD_BYTES,
            }
        );
        assert!(!controller.draft().has_document(DocumentType::NationalId));
        assert!(!controller.has_pending_extractions());
        assert_eq!(gateway.call_count(), 0);
        assert!(drain(&mut rx).iter().any(|e| matches!(
            e,
            WizardEvent::FileRejected { message, .. } if message == FILE_TOO_LARGE_MESSAGE
        )));
    }

    #[tokio::test]
    async fn test_oversized_file_empties_previous_selection() {
        let gateway = MockGateway::new().respond("pan.jpg", Ok(fields("A")));
        let (mut controller, _, _rx) = controller_with(gateway, Arc::new(MemoryStore::default()));
        controller
            .on_file_selected(DocumentType::Pan, upload("pan.jpg"))
            .unwrap();
        controller.next_extraction().await;

        let big = DocumentUpload::new("huge.png", vec![0u8; MAX_UPLOAD_BYTES + 1]);
        assert!(controller.on_file_selected(DocumentType::Pan, big).is_err());

        assert!(!controller.draft().has_document(DocumentType::Pan));
        assert!(controller.draft().ocr_result(DocumentType::Pan).is_none());
        assert!(controller.extraction_status(DocumentType::Pan).is_none());
    }

    #[tokio::test]
    async fn test_exactly_five_mib_accepted() {
        let (mut controller, _rx) = controller();
        let limit = DocumentUpload::new("max.png", vec![0u8; MAX_UPLOAD_BYTES]);

        assert!(controller.on_file_selected(DocumentType::Pan, limit).is_ok());
        assert_eq!(controller.draft().document(DocumentType::Pan), Some("max.png"));
    }

    // ==================== Extraction ====================

    #[tokio::test]
    async fn test_successful_extraction_recorded() {
        let store = Arc::new(MemoryStore::default());
        let extracted = ExtractedFields::new()
            .with("name", "A")
            .with("pan_no", "X");
        let gateway = MockGateway::new().respond("pan.jpg", Ok(extracted.clone()));
        let (mut controller, _, mut rx) = controller_with(gateway, store.clone());

        controller
            .on_file_selected(DocumentType::Pan, upload("pan.jpg"))
            .unwrap();
        assert_eq!(
            controller.extraction_status(DocumentType::Pan),
            Some(&ExtractionStatus::Pending)
        );

        let applied = controller.next_extraction().await;

        assert_eq!(
            applied,
            Some((DocumentType::Pan, CompletionDisposition::Recorded))
        );
        assert_eq!(
            controller.draft().ocr_result(DocumentType::Pan),
            Some(&extracted)
        );
        assert_eq!(
            store.saved_draft().unwrap().ocr_result(DocumentType::Pan),
            Some(&extracted)
        );
        assert!(drain(&mut rx).iter().any(|e| matches!(
            e,
            WizardEvent::ExtractionSucceeded {
                document: DocumentType::Pan,
                ..
            }
        )));
    }

    #[tokio::test]
    async fn test_failed_extraction_shown_not_recorded() {
        let gateway = MockGateway::new().respond("voter.jpg", Err(ExtractionError::HttpStatus(500)));
        let (mut controller, _, mut rx) = controller_with(gateway, Arc::new(MemoryStore::default()));

        controller
            .on_file_selected(DocumentType::VoterId, upload("voter.jpg"))
            .unwrap();
        let applied = controller.next_extraction().await;

        assert_eq!(
            applied,
            Some((DocumentType::VoterId, CompletionDisposition::Failed))
        );
        assert_eq!(
            controller.extraction_status(DocumentType::VoterId),
            Some(&ExtractionStatus::Failed("HTTP error! status: 500".to_string()))
        );
        assert!(controller.draft().ocr_result(DocumentType::VoterId).is_none());
        // Failure does not detach the file
        assert!(controller.draft().has_document(DocumentType::VoterId));
        assert!(drain(&mut rx).iter().any(|e| matches!(
            e,
            WizardEvent::ExtractionFailed { reason, .. } if reason == "HTTP error! status: 500"
        )));
    }

    #[tokio::test]
    async fn test_removed_document_discards_result() {
        let gateway = MockGateway::new().respond("pan.jpg", Ok(fields("A")));
        let (mut controller, _, mut rx) = controller_with(gateway, Arc::new(MemoryStore::default()));

        controller
            .on_file_selected(DocumentType::Pan, upload("pan.jpg"))
            .unwrap();
        assert!(controller.on_file_removed(DocumentType::Pan));
        let applied = controller.next_extraction().await;

        assert_eq!(
            applied,
            Some((DocumentType::Pan, CompletionDisposition::Discarded))
        );
        assert!(controller.draft().ocr_result(DocumentType::Pan).is_none());
        assert!(controller.extraction_status(DocumentType::Pan).is_none());
        let events = drain(&mut rx);
        assert!(events.iter().any(|e| matches!(
            e,
            WizardEvent::ExtractionCleared {
                document: DocumentType::Pan
            }
        )));
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, WizardEvent::ExtractionSucceeded { .. }))
        );
    }

    #[tokio::test]
    async fn test_remove_clears_recorded_result() {
        let store = Arc::new(MemoryStore::default());
        let gateway = MockGateway::new().respond("pan.jpg", Ok(fields("A")));
        let (mut controller, _, _rx) = controller_with(gateway, store.clone());
        controller
            .on_file_selected(DocumentType::Pan, upload("pan.jpg"))
            .unwrap();
        controller.next_extraction().await;

        controller.on_file_removed(DocumentType::Pan);

        assert!(controller.draft().ocr_result(DocumentType::Pan).is_none());
        assert!(store.saved_draft().unwrap().ocr_result(DocumentType::Pan).is_none());
        assert!(!controller.on_file_removed(DocumentType::Pan));
    }

    #[tokio::test]
    async fn test_reselection_supersedes_in_flight_request() {
        let gateway = MockGateway::new()
            .respond("old.jpg", Ok(fields("OLD")))
            .respond("new.jpg", Ok(fields("NEW")));
        let (mut controller, gateway, _rx) =
            controller_with(gateway, Arc::new(MemoryStore::default()));

        controller
            .on_file_selected(DocumentType::Pan, upload("old.jpg"))
            .unwrap();
        controller
            .on_file_selected(DocumentType::Pan, upload("new.jpg"))
            .unwrap();

        let mut dispositions = Vec::new();
        while let Some((_, disposition)) = controller.next_extraction().await {
            dispositions.push(disposition);
        }

        assert_eq!(gateway.call_count(), 2);
        assert_eq!(dispositions.len(), 2);
        assert!(dispositions.contains(&CompletionDisposition::Recorded));
        assert!(dispositions.contains(&CompletionDisposition::Discarded));
        assert_eq!(controller.draft().document(DocumentType::Pan), Some("new.jpg"));
        assert_eq!(
            controller.draft().ocr_result(DocumentType::Pan),
            Some(&fields("NEW"))
        );
    }

    #[tokio::test]
    async fn test_remove_then_reattach_ignores_first_request() {
        let gateway = MockGateway::new()
            .respond("first.jpg", Ok(fields("FIRST")))
            .respond("second.jpg", Err(ExtractionError::Rejected(DocumentType::Pan)));
        let (mut controller, _, _rx) = controller_with(gateway, Arc::new(MemoryStore::default()));

        controller
            .on_file_selected(DocumentType::Pan, upload("first.jpg"))
            .unwrap();
        controller.on_file_removed(DocumentType::Pan);
        controller
            .on_file_selected(DocumentType::Pan, upload("second.jpg"))
            .unwrap();
        while controller.next_extraction().await.is_some() {}

        assert!(controller.draft().ocr_result(DocumentType::Pan).is_none());
        assert_eq!(
            controller.extraction_status(DocumentType::Pan),
            Some(&ExtractionStatus::Failed(
                "Failed to extract PAN data".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_independent_documents_extract_concurrently() {
        let gateway = MockGateway::new()
            .respond("pan.jpg", Ok(fields("P")))
            .respond("aadhaar.jpg", Ok(fields("N")))
            .respond("voter.jpg", Ok(fields("V")));
        let (mut controller, _, _rx) = controller_with(gateway, Arc::new(MemoryStore::default()));

        attach_all(&mut controller);
        let mut recorded = 0;
        while let Some((_, disposition)) = controller.next_extraction().await {
            assert_eq!(disposition, CompletionDisposition::Recorded);
            recorded += 1;
        }

        assert_eq!(recorded, 3);
        assert_eq!(controller.draft().ocr_results().count(), 3);
    }

    #[tokio::test]
    async fn test_next_extraction_none_when_idle() {
        let (mut controller, _rx) = controller();
        assert_eq!(controller.next_extraction().await, None);
    }

    // ==================== Submission ====================

    #[tokio::test]
    async fn test_submit_outside_review_rejected() {
        let (mut controller, _rx) = controller();

        assert_eq!(
            controller.on_submit().await,
            Err(WizardError::NotOnFinalStep(Step::BasicDetails))
        );
        assert!(controller.draft().verification_result().is_none());
    }

    #[tokio::test]
    async fn test_submit_eligible() {
        let store = Arc::new(MemoryStore::default());
        let (mut controller, _, mut rx) = controller_with(MockGateway::new(), store.clone());
        walk_to_review(&mut controller, "1990-04-12");
        drain(&mut rx);

        let notice = controller.on_submit().await.unwrap();

        assert!(notice.eligible);
        assert_eq!(notice.title, "Verification Successful!");
        assert!(notice.message.contains("Asha"));
        assert!(!controller.is_submitting());

        let saved = store.saved_draft().unwrap();
        let result = saved.verification_result().unwrap();
        assert!(result.eligible);
        assert!(result.checks.all_pass());

        let events = drain(&mut rx);
        assert!(matches!(events.first(), Some(WizardEvent::SubmitStarted)));
        assert!(matches!(events.last(), Some(WizardEvent::Decision(n)) if n.eligible));
    }

    #[tokio::test]
    async fn test_submit_underage_ineligible() {
        let (mut controller, _rx) = controller();
        // One day short of 18 on the fixed clock date
        walk_to_review(&mut controller, "2008-10-16");

        let notice = controller.on_submit().await.unwrap();

        assert!(!notice.eligible);
        assert_eq!(notice.guidance.len(), 3);
        let result = controller.draft().verification_result().unwrap();
        assert_eq!(
            result.checks.failed(),
            vec![ekyc_domain::Criterion::MinimumAge]
        );
    }

    #[tokio::test]
    async fn test_submit_turning_eighteen_today_eligible() {
        let (mut controller, _rx) = controller();
        walk_to_review(&mut controller, "2008-10-15");

        assert!(controller.on_submit().await.unwrap().eligible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_waits_for_verification_delay() {
        let gateway = Arc::new(MockGateway::new());
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut controller =
            WizardController::new(gateway, Arc::new(MemoryStore::default()), tx)
                .with_clock(fixed_clock())
                .with_settings(WizardSettings::with_delay_millis(2000));
        walk_to_review(&mut controller, "1990-04-12");

        let started = tokio::time::Instant::now();
        controller.on_submit().await.unwrap();

        assert!(started.elapsed() >= std::time::Duration::from_millis(2000));
        assert!(!controller.is_submitting());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_submit_does_not_block_the_next_one() {
        let gateway = Arc::new(MockGateway::new());
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut controller =
            WizardController::new(gateway, Arc::new(MemoryStore::default()), tx)
                .with_clock(fixed_clock())
                .with_settings(WizardSettings::with_delay_millis(2000));
        walk_to_review(&mut controller, "1990-04-12");

        let abandoned = tokio::time::timeout(
            std::time::Duration::from_millis(500),
            controller.on_submit(),
        )
        .await;
        assert!(abandoned.is_err());
        assert!(controller.is_submitting());
        assert!(controller.draft().verification_result().is_none());

        let notice = controller.on_submit().await.unwrap();
        assert!(notice.eligible);
        assert!(!controller.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_keeps_draft() {
        let store = Arc::new(MemoryStore::default());
        let (mut controller, _, _rx) = controller_with(MockGateway::new(), store.clone());
        walk_to_review(&mut controller, "1990-04-12");

        controller.on_submit().await.unwrap();

        let saved = store.saved_draft().unwrap();
        assert_eq!(saved.basic_details.first_name, "Asha");
        assert!(saved.all_documents_attached());
    }

    // ==================== Reset ====================

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let store = Arc::new(MemoryStore::default());
        let gateway = MockGateway::new().respond("pan.jpg", Ok(fields("A")));
        let (mut controller, _, mut rx) = controller_with(gateway, store.clone());
        fill_basic(&mut controller, "1990-04-12");
        controller.on_next();
        controller
            .on_file_selected(DocumentType::Pan, upload("pan.jpg"))
            .unwrap();
        drain(&mut rx);

        controller.reset();

        assert_eq!(controller.step(), Step::BasicDetails);
        assert_eq!(controller.draft(), &Draft::new());
        assert_eq!(controller.inputs().get(FieldId::FirstName), "");
        assert!(controller.extraction_status(DocumentType::Pan).is_none());
        assert!(store.saved_draft().is_none());
        assert!(matches!(drain(&mut rx).as_slice(), [WizardEvent::Reset]));

        // The request issued before the reset must not land in the new session
        assert_eq!(
            controller.next_extraction().await,
            Some((DocumentType::Pan, CompletionDisposition::Discarded))
        );
        assert!(controller.draft().ocr_result(DocumentType::Pan).is_none());
    }
}
