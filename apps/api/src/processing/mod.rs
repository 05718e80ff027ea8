//! Resume processing pipeline: PDF bytes in, scored structured resume out.

pub mod certificates;
pub mod cleanup;
pub mod handlers;
pub mod models;
pub mod pdf;
pub mod projects;
pub mod prompts;
pub mod store;

use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;

use crate::analysis::ats::{calculate_ats_score, AtsReport, ScoreBreakdown, SectionPresence};
use crate::analysis::languages::languages_from_value;
use crate::analysis::lexicon::SkillLexicon;
use crate::analysis::normalize::normalize_text;
use crate::errors::AppError;
use crate::llm_client::{LlmClient, ModelOutcome};
use models::ResumeData;

/// Extraction prompts are capped so a pathological PDF cannot blow the
/// model's context window.
const MAX_PROMPT_CHARS: usize = 80_000;

/// Fully processed resume as returned to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedResume {
    #[serde(flatten)]
    pub data: ResumeData,
    pub ats_score: f64,
    pub ats_breakdown: ScoreBreakdown,
    pub word_count: usize,
}

/// Runs the full pipeline for one uploaded PDF: text extraction, structured
/// model extraction, certificate and project evaluation, skill cleanup,
/// language normalization and scoring. Persistence is best effort; a failed
/// insert is logged and the response still succeeds.
pub async fn process_resume(
    db: &PgPool,
    llm: &LlmClient,
    lexicon: &SkillLexicon,
    filename: &str,
    bytes: &[u8],
) -> Result<AnalyzedResume, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    let raw_text = pdf::extract_text(bytes)?;
    let text = normalize_text(&raw_text);
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "the PDF contains no extractable text".to_string(),
        ));
    }
    let prompt_text: String = text.chars().take(MAX_PROMPT_CHARS).collect();

    let mut data = match llm
        .call_outcome::<ResumeData>(
            &prompts::extraction_prompt(&prompt_text),
            prompts::EXTRACTION_SYSTEM,
            3000,
        )
        .await
    {
        ModelOutcome::Parsed(data) => data,
        ModelOutcome::UpstreamUnavailable(reason) => return Err(AppError::Llm(reason)),
        ModelOutcome::Malformed { error, raw } => {
            tracing::warn!(%error, raw, "resume extraction returned malformed JSON");
            return Err(AppError::UnprocessableEntity(
                "the model did not return usable resume data".to_string(),
            ));
        }
    };

    data.certificate_analysis = certificates::evaluate_certificates(llm, &data.certificates).await;
    data.project_analysis = projects::evaluate_projects(llm, &data.projects).await;

    let (data, report) = finalize_resume(lexicon, data, &raw_text);

    if let Err(err) = store::insert_report(db, filename, &data, &report).await {
        tracing::warn!(error = %err, filename, "failed to persist resume report");
    }

    Ok(AnalyzedResume {
        data,
        ats_score: report.ats_score,
        ats_breakdown: report.ats_breakdown,
        word_count: report.word_count,
    })
}

/// Post-extraction stage: skill cleanup, language normalization, scoring.
/// Scoring sees the raw extracted text, not the normalized one: bullet
/// markers and line lengths only exist before whitespace collapsing.
fn finalize_resume(
    lexicon: &SkillLexicon,
    mut data: ResumeData,
    raw_text: &str,
) -> (ResumeData, AtsReport) {
    data.skills.technical = cleanup::dedup_technical_skills(
        &data.skills.technical,
        &data.skills.area_of_interest,
        &data.certificates,
    );

    let languages: Vec<String> = languages_from_value(&data.languages)
        .iter()
        .map(|l| l.rendered())
        .collect();
    data.languages = Value::Array(languages.iter().cloned().map(Value::String).collect());

    let presence = section_presence(&data);
    let report = calculate_ats_score(lexicon, &presence, raw_text, languages);
    (data, report)
}

/// Derives which scorable sections the extracted data actually filled in.
pub fn section_presence(data: &ResumeData) -> SectionPresence {
    SectionPresence {
        experience: !data.internships.is_empty(),
        education: !data.education.tenth.is_empty()
            || !data.education.twelfth.is_empty()
            || !data.education.bachelor.is_empty(),
        skills: !data.skills.technical.is_empty()
            || !data.skills.soft.is_empty()
            || !data.skills.area_of_interest.is_empty(),
        projects: !data.projects.is_empty(),
    }
}
