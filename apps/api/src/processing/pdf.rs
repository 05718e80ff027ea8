//! PDF text extraction.

use crate::errors::AppError;

/// Pulls plain text out of an in-memory PDF. Encrypted, image-only or
/// corrupt files surface as unprocessable rather than a server error.
pub fn extract_text(bytes: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|err| {
        tracing::warn!(error = %err, "failed to extract text from PDF");
        AppError::UnprocessableEntity("could not extract text from the PDF".to_string())
    })?;
    Ok(text)
}
