use std::sync::Arc;

use sqlx::PgPool;

use crate::analysis::lexicon::SkillLexicon;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Immutable skill vocabulary shared by all extraction and scoring paths.
    pub lexicon: Arc<SkillLexicon>,
}
