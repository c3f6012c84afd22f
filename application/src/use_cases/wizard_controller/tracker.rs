//! Per-document extraction tracking.
//!
//! Every document slot carries a generation counter. Selecting or removing a
//! file bumps it, so a completion can be matched against the selection that
//! started it.

use ekyc_domain::{DocumentType, ExtractionStatus};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    status: Option<ExtractionStatus>,
}

/// Extraction status and generation for each document slot.
#[derive(Debug, Default)]
pub struct ExtractionTracker {
    slots: BTreeMap<DocumentType, Slot>,
}

impl ExtractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new extraction for `document`, superseding any in flight.
    ///
    /// Returns the generation the completion must carry.
    pub fn begin(&mut self, document: DocumentType) -> u64 {
        let slot = self.slots.entry(document).or_default();
        slot.generation += 1;
        slot.status = Some(ExtractionStatus::Pending);
        slot.generation
    }

    /// Forget the slot's status and invalidate in-flight work.
    ///
    /// Returns whether a status was shown.
    pub fn clear(&mut self, document: DocumentType) -> bool {
        let slot = self.slots.entry(document).or_default();
        slot.generation += 1;
        slot.status.take().is_some()
    }

    /// Clear every slot.
    pub fn clear_all(&mut self) {
        for slot in self.slots.values_mut() {
            slot.generation += 1;
            slot.status = None;
        }
    }

    pub fn is_current(&self, document: DocumentType, generation: u64) -> bool {
        self.slots
            .get(&document)
            .is_some_and(|slot| slot.generation == generation)
    }

    /// Set the status without touching the generation.
    pub fn settle(&mut self, document: DocumentType, status: ExtractionStatus) {
        self.slots.entry(document).or_default().status = Some(status);
    }

    pub fn status(&self, document: DocumentType) -> Option<&ExtractionStatus> {
        self.slots.get(&document).and_then(|slot| slot.status.as_ref())
    }
}
