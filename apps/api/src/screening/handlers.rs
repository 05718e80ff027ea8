use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    extract::{Multipart, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use serde_json::json;
use tokio_stream::wrappers::ReceiverStream;

use crate::errors::AppError;
use crate::processing::process_resume;
use crate::screening::{candidate_record, CandidateRecord, CompiledFilters, ScreeningFilters};
use crate::state::AppState;

#[derive(serde::Serialize)]
pub struct ScreeningResponse {
    pub count: usize,
    pub results: Vec<CandidateRecord>,
}

/// Drains a screening multipart body: fields with a filename become uploads,
/// everything else is a filter form field.
async fn read_screening_request(
    multipart: &mut Multipart,
) -> Result<(Vec<(String, Vec<u8>)>, ScreeningFilters), AppError> {
    let mut files = Vec::new();
    let mut fields: HashMap<String, String> = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if let Some(filename) = field.file_name().map(String::from) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
            files.push((filename, bytes.to_vec()));
        } else if let Some(name) = field.name().map(String::from) {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read field: {e}")))?;
            fields.insert(name, value);
        }
    }
    Ok((files, ScreeningFilters::from_form_fields(&fields)))
}

async fn screen_one(
    state: &AppState,
    filters: &CompiledFilters,
    filename: &str,
    bytes: &[u8],
) -> Option<CandidateRecord> {
    if bytes.is_empty() {
        tracing::warn!(filename, "empty upload skipped");
        return None;
    }
    let analyzed =
        match process_resume(&state.db, &state.llm, &state.lexicon, filename, bytes).await {
            Ok(analyzed) => analyzed,
            Err(err) => {
                tracing::warn!(filename, error = %err, "screening skipped unprocessable resume");
                return None;
            }
        };
    if filters.admit(&analyzed.data, analyzed.ats_score) {
        Some(candidate_record(filename, &analyzed))
    } else {
        None
    }
}

/// POST /api/v1/screening
pub async fn handle_screening(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningResponse>, AppError> {
    let (files, filters) = read_screening_request(&mut multipart).await?;
    if files.is_empty() {
        return Err(AppError::Validation("no files uploaded".to_string()));
    }
    let filters = CompiledFilters::compile(filters);

    let mut results = Vec::new();
    for (filename, bytes) in &files {
        if let Some(record) = screen_one(&state, &filters, filename, bytes).await {
            results.push(record);
        }
    }
    Ok(Json(ScreeningResponse {
        count: results.len(),
        results,
    }))
}

/// POST /api/v1/screening/stream
///
/// The whole multipart body is read before streaming starts, so a slow
/// client cannot stall an exhausted upload stream mid-run. One progress
/// event is emitted per admitted candidate, then a final done event.
pub async fn handle_screening_stream(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Sse<ReceiverStream<Result<Event, Infallible>>>, AppError> {
    let (files, filters) = read_screening_request(&mut multipart).await?;
    if files.is_empty() {
        return Err(AppError::Validation("no files uploaded".to_string()));
    }
    let filters = CompiledFilters::compile(filters);
    let total = files.len();

    let (tx, rx) = tokio::sync::mpsc::channel::<Result<Event, Infallible>>(16);
    tokio::spawn(async move {
        let mut results: Vec<CandidateRecord> = Vec::new();
        for (i, (filename, bytes)) in files.iter().enumerate() {
            if let Some(record) = screen_one(&state, &filters, filename, bytes).await {
                let latest_name = record.name.clone();
                results.push(record);
                let progress = json!({
                    "progress": i + 1,
                    "processed": results.len(),
                    "total": total,
                    "latest_filename": filename,
                    "latest_name": latest_name,
                    "results_so_far": results,
                });
                if tx.send(Ok(Event::default().json_data(&progress).unwrap_or_default())).await.is_err() {
                    // Client went away; stop burning model calls.
                    return;
                }
            }
        }
        let done = json!({"done": true, "results": results, "count": results.len()});
        let _ = tx
            .send(Ok(Event::default().json_data(&done).unwrap_or_default()))
            .await;
    });

    Ok(Sse::new(ReceiverStream::new(rx)).keep_alive(KeepAlive::default()))
}
