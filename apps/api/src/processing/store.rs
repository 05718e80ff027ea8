//! Persistence of processed resume reports.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::analysis::ats::AtsReport;
use crate::processing::models::ResumeData;

pub async fn insert_report(
    pool: &PgPool,
    filename: &str,
    data: &ResumeData,
    report: &AtsReport,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO resume_reports (id, filename, data, ats_breakdown, ats_score, word_count, uploaded_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(uuid::Uuid::new_v4())
    .bind(filename)
    .bind(Json(data))
    .bind(Json(&report.ats_breakdown))
    .bind(report.ats_score)
    .bind(report.word_count as i32)
    .bind(chrono::Utc::now())
    .execute(pool)
    .await?;
    Ok(())
}
