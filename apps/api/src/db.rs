use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the report table on startup if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS resume_reports (
            id UUID PRIMARY KEY,
            filename TEXT NOT NULL,
            data JSONB NOT NULL,
            ats_breakdown JSONB NOT NULL,
            ats_score DOUBLE PRECISION NOT NULL,
            word_count INTEGER NOT NULL,
            uploaded_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    info!("Database schema ready");
    Ok(())
}
