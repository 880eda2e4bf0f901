//! Document-to-text boundary for uploaded job descriptions and resumes.
//!
//! PDFs go through `pdf-extract`; everything else is decoded as UTF-8.
//! Extraction failure is reported to the caller; the UI then treats the
//! corresponding input as empty and Intake gating blocks progress.

use crate::errors::AppError;

/// Extracts plain text from an uploaded document.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, AppError> {
    if is_pdf(filename, bytes) {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Extraction(format!("Error extracting text from PDF: {e}")))
    } else {
        String::from_utf8(bytes.to_vec())
            .map_err(|_| AppError::Extraction("File is not valid UTF-8 text".to_string()))
    }
}

fn is_pdf(filename: &str, bytes: &[u8]) -> bool {
    filename.to_lowercase().ends_with(".pdf") || bytes.starts_with(b"%PDF-")
}
