use std::path::PathBuf;

use thiserror::Error;

use crate::llm::LlmError;

/// Application-level error type.
///
/// Every failure a run can hit maps to exactly one variant. Only
/// `LayoutOverflow` is recovered from (the most-compressed document is
/// still written); everything else terminates the run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported file format: '{0}' (expected .pdf, .docx, or .txt)")]
    UnsupportedFormat(String),

    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Structured output failed schema validation: {0}")]
    SchemaViolation(String),

    #[error("Extraction service error: {0}")]
    Service(#[from] LlmError),

    #[error("Document still spans {pages} pages at maximum compression")]
    LayoutOverflow { pages: usize },

    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
