use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::processing::prompts;
use crate::state::AppState;

const CHAT_SYSTEM: &str =
    "You are a concise assistant for recruiters reviewing candidate resumes.";

#[derive(Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub resume_data: Value,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/v1/chat
/// Answers a recruiter question about one already-processed resume.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if req.query.trim().is_empty() {
        return Err(AppError::Validation("query must not be empty".to_string()));
    }

    let resume_json = serde_json::to_string(&req.resume_data)
        .map_err(|e| AppError::Validation(format!("invalid resume_data: {e}")))?;
    let prompt = prompts::chat_prompt(&resume_json, req.query.trim());

    let response = state
        .llm
        .call(&prompt, CHAT_SYSTEM, 512)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;
    let answer = response
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Llm("model returned an empty answer".to_string()))?
        .to_string();

    Ok(Json(ChatResponse { response: answer }))
}
