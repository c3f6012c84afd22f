//! Extraction value objects.
//!
//! [`ExtractedFields`] is the field set the extraction service returned for
//! one document. [`ExtractionOutcome`] is the result of a single extraction
//! call, and [`ExtractionStatus`] is what the documents step shows for a slot
//! while and after that call runs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::kind::DocumentType;

/// Named string fields returned by the extraction service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedFields(BTreeMap<String, String>);

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `data` object of a service response.
    ///
    /// Scalars are stringified, `null` entries are dropped and nested values
    /// keep their JSON text. A non-object payload yields an empty set.
    pub fn from_json(data: &Value) -> Self {
        let Value::Object(map) = data else {
            return Self::default();
        };

        map.iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    other => other.to_string(),
                };
                Some((key.as_str(), text))
            })
            .collect()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Labelled rows for the document's schema, in schema order.
    ///
    /// Fields that are absent or blank are omitted, never defaulted.
    pub fn display_rows(&self, document: DocumentType) -> Vec<(&'static str, &str)> {
        document
            .expected_fields()
            .iter()
            .filter_map(|spec| {
                self.get(spec.key)
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| (spec.label, value))
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExtractedFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Result of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Success(ExtractedFields),
    Failure(String),
}

/// Per-document extraction state shown next to the file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionStatus {
    /// Request issued, no result yet
    Pending,
    /// Fields extracted successfully
    Extracted(ExtractedFields),
    /// Extraction failed with a human-readable reason
    Failed(String),
}

impl From<ExtractionOutcome> for ExtractionStatus {
    fn from(outcome: ExtractionOutcome) -> Self {
        match outcome {
            ExtractionOutcome::Success(fields) => ExtractionStatus::Extracted(fields),
            ExtractionOutcome::Failure(reason) => ExtractionStatus::Failed(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_stringifies_scalars() {
        let fields = ExtractedFields::from_json(&json!({
            "name": "ASHA RAO",
            "age": 34,
            "verified": true,
            "gender": null,
        }));
        assert_eq!(fields.get("name"), Some("ASHA RAO"));
        assert_eq!(fields.get("age"), Some("34"));
        assert_eq!(fields.get("verified"), Some("true"));
        assert_eq!(fields.get("gender"), None);
    }

    #[test]
    fn test_from_json_non_object_is_empty() {
        assert!(ExtractedFields::from_json(&json!("oops")).is_empty());
        assert!(ExtractedFields::from_json(&Value::Null).is_empty());
    }

    #[test]
    fn test_display_rows_follow_schema_and_skip_blanks() {
        let fields = ExtractedFields::new()
            .with("fathers_name", "RAVI RAO")
            .with("name", "ASHA RAO")
            .with("pan_no", "  ")
            .with("unrelated", "x");

        let rows = fields.display_rows(DocumentType::Pan);
        assert_eq!(
            rows,
            vec![("Name", "ASHA RAO"), ("Father's Name", "RAVI RAO")]
        );
    }

    #[test]
    fn test_status_from_outcome() {
        let ok = ExtractionOutcome::Success(ExtractedFields::new().with("name", "A"));
        assert!(matches!(
            ExtractionStatus::from(ok),
            ExtractionStatus::Extracted(_)
        ));
        let failed = ExtractionOutcome::Failure("HTTP error! status: 500".to_string());
        assert_eq!(
            ExtractionStatus::from(failed),
            ExtractionStatus::Failed("HTTP error! status: 500".to_string())
        );
    }
}
