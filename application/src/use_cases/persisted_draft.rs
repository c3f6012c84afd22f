//! Persisted Draft
//!
//! Saves and restores the session [`Draft`] through a [`KeyValueStore`].
//! Loading never fails: absent or unreadable data yields an empty draft so a
//! fresh session can always start.

use crate::ports::key_value_store::{KeyValueStore, StoreError};
use ekyc_domain::Draft;
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key holding the serialized draft.
pub const DRAFT_STORAGE_KEY: &str = "kycFormData";

/// Draft persistence over a key-value store.
#[derive(Clone)]
pub struct PersistedDraft {
    store: Arc<dyn KeyValueStore>,
}

impl PersistedDraft {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Serialize the full draft and store it under the draft key.
    pub fn save(&self, draft: &Draft) -> Result<(), StoreError> {
        let json = serde_json::to_string(draft)?;
        self.store.set(DRAFT_STORAGE_KEY, &json)?;
        debug!("Draft saved ({} bytes)", json.len());
        Ok(())
    }

    /// Load the stored draft.
    ///
    /// Missing, corrupt or unreadable data is treated as an empty draft. The
    /// result is normalized so every extraction result has its document.
    pub fn load(&self) -> Draft {
        let raw = match self.store.get(DRAFT_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Draft::new(),
            Err(e) => {
                warn!("Failed to read saved draft, starting fresh: {}", e);
                return Draft::new();
            }
        };

        match serde_json::from_str::<Draft>(&raw) {
            Ok(mut draft) => {
                let pruned = draft.normalize();
                if pruned > 0 {
                    warn!("Dropped {} extraction result(s) without a document", pruned);
                }
                draft
            }
            Err(e) => {
                warn!("Saved draft is corrupt, starting fresh: {}", e);
                Draft::new()
            }
        }
    }

    /// Remove the stored draft.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(DRAFT_STORAGE_KEY)
    }
}
