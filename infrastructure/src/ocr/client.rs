//! HTTP adapter for the extraction service.
//!
//! Each document is uploaded as a multipart form with a single `file` part
//! to `{base_url}{endpoint}`. The service answers with
//! `{ "success": bool, "data": { ... } }`.

use async_trait::async_trait;
use ekyc_application::ports::extraction_gateway::{ExtractionError, ExtractionGateway};
use ekyc_domain::{DocumentType, DocumentUpload, ExtractedFields};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default service location.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Errors building the client
#[derive(Error, Debug)]
pub enum OcrClientError {
    #[error("Failed to create HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct OcrResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<Value>,
}

/// Extraction service client
#[derive(Debug, Clone)]
pub struct HttpExtractionClient {
    client: reqwest::Client,
    base_url: String,
    /// Endpoint overrides; documents not listed use their default path
    endpoints: BTreeMap<DocumentType, String>,
}

impl HttpExtractionClient {
    /// Create a client for the service at `base_url`.
    ///
    /// Without a timeout a request waits for the service indefinitely.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, OcrClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
            endpoints: BTreeMap::new(),
        })
    }

    /// Upload `document` files to `path` instead of the default endpoint.
    pub fn with_endpoint(mut self, document: DocumentType, path: impl Into<String>) -> Self {
        self.endpoints.insert(document, path.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full upload URL for a document type.
    pub fn url_for(&self, document: DocumentType) -> String {
        let endpoint = self
            .endpoints
            .get(&document)
            .map(String::as_str)
            .unwrap_or_else(|| document.default_endpoint());
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

#[async_trait]
impl ExtractionGateway for HttpExtractionClient {
    async fn extract(
        &self,
        document: DocumentType,
        upload: DocumentUpload,
    ) -> Result<ExtractedFields, ExtractionError> {
        let url = self.url_for(document);
        debug!("Uploading {:?} to {}", upload, url);

        let mut part = Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(content_type) = &upload.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| ExtractionError::Transport(e.to_string()))?;
        }
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Extraction request to {} failed: {}", url, e);
                ExtractionError::Transport(e.to_string())
            })?;

        check_status(response.status())?;

        let body = response
            .text()
            .await
            .map_err(|e| ExtractionError::InvalidResponse(e.to_string()))?;
        parse_body(document, &body)
    }
}

/// Any non-2xx status is a failure regardless of the body.
fn check_status(status: StatusCode) -> Result<(), ExtractionError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ExtractionError::HttpStatus(status.as_u16()))
    }
}

/// Interpret a 2xx response body.
fn parse_body(document: DocumentType, body: &str) -> Result<ExtractedFields, ExtractionError> {
    let response: OcrResponse = serde_json::from_str(body)
        .map_err(|e| ExtractionError::InvalidResponse(e.to_string()))?;

    if !response.success {
        return Err(ExtractionError::Rejected(document));
    }

    Ok(response
        .data
        .map(|data| ExtractedFields::from_json(&data))
        .unwrap_or_default())
}
