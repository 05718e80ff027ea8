pub mod chat;
pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::processing::handlers as resume_handlers;
use crate::screening::handlers as screening_handlers;
use crate::state::AppState;

/// Resume PDFs are small; 20 MiB leaves headroom for batch screening uploads.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes", post(resume_handlers::handle_upload_resume))
        .route(
            "/api/v1/resumes/extract",
            post(resume_handlers::handle_extract_sections),
        )
        .route(
            "/api/v1/resumes/quickscan",
            post(resume_handlers::handle_quickscan),
        )
        // Screening API
        .route("/api/v1/screening", post(screening_handlers::handle_screening))
        .route(
            "/api/v1/screening/stream",
            post(screening_handlers::handle_screening_stream),
        )
        // Chat API
        .route("/api/v1/chat", post(chat::handle_chat))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
