//! Relational sink — one row per completed session in `interview_results`.
//! Structured fields are stored as serialized JSON text blobs; the
//! timestamp column is normalized to whole seconds.

use chrono::{DateTime, Timelike};
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::store::SessionRecord;

/// Creates the results table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS interview_results (
            id BIGSERIAL PRIMARY KEY,
            job_description TEXT NOT NULL,
            resume_text TEXT NOT NULL,
            questions TEXT NOT NULL,
            answers TEXT NOT NULL,
            scores TEXT NOT NULL,
            explanations TEXT NOT NULL,
            timestamp TIMESTAMP NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Inserts one completed session.
pub async fn insert_result(pool: &PgPool, record: &SessionRecord) -> Result<(), AppError> {
    let timestamp = normalize_timestamp(&record.timestamp)?;

    sqlx::query(
        r#"
        INSERT INTO interview_results
            (job_description, resume_text, questions, answers, scores, explanations, timestamp)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(to_blob(&record.job_description)?)
    .bind(to_blob(&record.resume_text)?)
    .bind(to_blob(&record.questions)?)
    .bind(to_blob(&record.answers)?)
    .bind(to_blob(&record.scores)?)
    .bind(to_blob(&record.explanations)?)
    .bind(timestamp)
    .execute(pool)
    .await?;

    info!("Saved session to interview_results");
    Ok(())
}

/// Parses the record's ISO-8601 timestamp and normalizes it to whole
/// seconds for the `TIMESTAMP` column.
fn normalize_timestamp(iso: &str) -> Result<chrono::NaiveDateTime, AppError> {
    let parsed = DateTime::parse_from_rfc3339(iso)
        .map_err(|e| AppError::Persistence(format!("Invalid record timestamp: {e}")))?;
    let naive = parsed.naive_utc();
    Ok(naive.with_nanosecond(0).unwrap_or(naive))
}

fn to_blob<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string(value)
        .map_err(|e| AppError::Persistence(format!("Could not serialize field: {e}")))
}
