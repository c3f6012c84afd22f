//! Raw text inputs of the form.
//!
//! [`FormInputs`] holds what the user has typed so far, independently of the
//! [`Draft`](crate::draft::entities::Draft). Moving back a step never loses
//! data because the inputs persist across navigation.

use std::collections::BTreeMap;

use super::field::FieldId;
use crate::draft::entities::Draft;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    values: BTreeMap<FieldId, String>,
}

impl FormInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate inputs from a saved draft.
    pub fn from_draft(draft: &Draft) -> Self {
        let mut inputs = Self::new();
        for field in FieldId::text_fields() {
            if let Some(value) = draft.field_value(field)
                && !value.is_empty()
            {
                inputs.values.insert(field, value.to_string());
            }
        }
        inputs
    }

    /// Store a value after applying the field's input normalization.
    ///
    /// Document fields are not text inputs and are ignored.
    pub fn set(&mut self, field: FieldId, value: &str) {
        if field.is_document() {
            return;
        }
        self.values.insert(field, field.normalize_input(value));
    }

    pub fn with(mut self, field: FieldId, value: &str) -> Self {
        self.set(field, value);
        self
    }

    /// Current value, empty if never set.
    pub fn get(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
