use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;

use crate::analysis::normalize::normalize_text;
use crate::analysis::skills::{extract_sections, parse_resume_sections, SectionParse, StrictExtraction};
use crate::errors::AppError;
use crate::processing::{pdf, process_resume, AnalyzedResume};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct QuickScanRequest {
    pub text: String,
}

/// Drains a multipart body into (filename, bytes) pairs, keeping only
/// fields that carry a file.
pub async fn read_pdf_fields(multipart: &mut Multipart) -> Result<Vec<(String, Vec<u8>)>, AppError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(String::from) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        files.push((filename, bytes.to_vec()));
    }
    Ok(files)
}

/// POST /api/v1/resumes
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzedResume>, AppError> {
    let files = read_pdf_fields(&mut multipart).await?;
    let (filename, bytes) = files
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Validation("no file uploaded".to_string()))?;

    tracing::info!(filename, size = bytes.len(), "processing resume upload");
    let analyzed =
        process_resume(&state.db, &state.llm, &state.lexicon, &filename, &bytes).await?;
    Ok(Json(analyzed))
}

/// POST /api/v1/resumes/extract
///
/// Heading-scoped extraction only: sections that cannot be located are
/// reported as "not found" rather than guessed.
pub async fn handle_extract_sections(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<StrictExtraction>, AppError> {
    let files = read_pdf_fields(&mut multipart).await?;
    let (_, bytes) = files
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Validation("no file uploaded".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    let text = normalize_text(&pdf::extract_text(&bytes)?);
    Ok(Json(extract_sections(&state.lexicon, &text)))
}

/// POST /api/v1/resumes/quickscan
pub async fn handle_quickscan(
    State(state): State<AppState>,
    Json(req): Json<QuickScanRequest>,
) -> Result<Json<SectionParse>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }
    let text = normalize_text(&req.text);
    Ok(Json(parse_resume_sections(&state.lexicon, &text)))
}
