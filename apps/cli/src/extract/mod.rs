//! Raw text extraction from resume source files.
//!
//! Dispatch is a case-sensitive suffix match on the file name — `.pdf`,
//! `.docx`, `.txt` — anything else is `UnsupportedFormat`. Pure
//! text-stream extraction: no OCR, no layout reconstruction.

mod docx;
mod pdf;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::errors::AppError;

/// Extracts the raw text content of a resume file.
///
/// Fails with `FileNotFound` before any format dispatch if the path does
/// not exist.
pub fn extract_text(path: &Path) -> Result<String, AppError> {
    if !path.exists() {
        return Err(AppError::FileNotFound(path.to_path_buf()));
    }

    let name = path.to_string_lossy();
    let text = if name.ends_with(".pdf") {
        pdf::extract(path)?
    } else if name.ends_with(".docx") {
        docx::extract(path)?
    } else if name.ends_with(".txt") {
        fs::read_to_string(path)?
    } else {
        return Err(AppError::UnsupportedFormat(name.into_owned()));
    };

    info!("Extracted {} characters from {}", text.len(), name);
    Ok(text)
}
