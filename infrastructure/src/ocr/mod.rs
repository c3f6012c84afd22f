//! Extraction (OCR) service adapter

mod client;

pub use client::{DEFAULT_BASE_URL, HttpExtractionClient, OcrClientError};
