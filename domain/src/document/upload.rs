//! Selected document file.

use std::fmt;

/// Hard cap on a single document upload (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// A file the user selected for a document slot.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file is over [`MAX_UPLOAD_BYTES`]. Exactly 5 MiB is accepted.
    pub fn exceeds_limit(&self) -> bool {
        self.size() > MAX_UPLOAD_BYTES
    }
}

// Keep file contents out of logs.
impl fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_inclusive() {
        assert!(!DocumentUpload::new("a.jpg", vec![0; MAX_UPLOAD_BYTES]).exceeds_limit());
        assert!(DocumentUpload::new("a.jpg", vec![0; MAX_UPLOAD_BYTES + 1]).exceeds_limit());
    }

    #[test]
    fn test_debug_omits_bytes() {
        let upload = DocumentUpload::new("scan.pdf", vec![7; 16]).with_content_type("application/pdf");
        let rendered = format!("{:?}", upload);
        assert!(rendered.contains("size: 16"));
        assert!(!rendered.contains("[7, 7"));
    }
}
