//! PDF text extraction via `pdf-extract`.

use std::path::Path;

use crate::errors::AppError;

/// Concatenates per-page extracted text with newline separators.
///
/// Pages that yield no extractable text contribute an empty string — a
/// scanned page is not an error, it is just blank.
pub fn extract(path: &Path) -> Result<String, AppError> {
    let pages = pdf_extract::extract_text_by_pages(path)
        .map_err(|e| AppError::Extraction(format!("PDF extraction failed: {e}")))?;
    Ok(pages.join("\n"))
}
