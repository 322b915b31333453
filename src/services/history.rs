//! History service — persisted summary records.
//!
//! The `summaries` table is append-only: rows are inserted once and never
//! updated. Reads are newest-first with an optional visitor filter.

use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("No summaries found for the given visitor ID.")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row shape returned to the boundary. The id serializes as a plain string.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SummaryRow {
    pub id: Uuid,
    pub visitor_id: String,
    pub input_text: String,
    pub summary_text: String,
    pub model: String,
    pub provider: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

type SummaryTuple = (Uuid, String, String, String, String, String, OffsetDateTime);

fn to_row(row: SummaryTuple) -> SummaryRow {
    SummaryRow {
        id: row.0,
        visitor_id: row.1,
        input_text: row.2,
        summary_text: row.3,
        model: row.4,
        provider: row.5,
        created_at: row.6,
    }
}

/// Persist one summary record. `created_at` is set by the database.
///
/// # Errors
///
/// Returns the underlying database error.
pub async fn insert_summary(
    pool: &PgPool,
    visitor_id: &str,
    input_text: &str,
    summary_text: &str,
    model: &str,
    provider: &str,
) -> Result<(), HistoryError> {
    sqlx::query(
        "INSERT INTO summaries (visitor_id, input_text, summary_text, model, provider)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(visitor_id)
    .bind(input_text)
    .bind(summary_text)
    .bind(model)
    .bind(provider)
    .execute(pool)
    .await?;
    Ok(())
}

/// Most recent summaries, optionally filtered by visitor, newest first.
///
/// # Errors
///
/// Returns the underlying database error.
pub async fn list_history(
    pool: &PgPool,
    visitor_id: Option<&str>,
    limit: i64,
) -> Result<Vec<SummaryRow>, HistoryError> {
    let rows: Vec<SummaryTuple> = match visitor_id {
        Some(visitor_id) => {
            sqlx::query_as(
                "SELECT id, visitor_id, input_text, summary_text, model, provider, created_at
                 FROM summaries WHERE visitor_id = $1
                 ORDER BY created_at DESC LIMIT $2",
            )
            .bind(visitor_id)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT id, visitor_id, input_text, summary_text, model, provider, created_at
                 FROM summaries
                 ORDER BY created_at DESC LIMIT $1",
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows.into_iter().map(to_row).collect())
}

/// Delete every summary record. Returns the number deleted (possibly 0).
///
/// # Errors
///
/// Returns the underlying database error.
pub async fn delete_all(pool: &PgPool) -> Result<u64, HistoryError> {
    let result = sqlx::query("DELETE FROM summaries").execute(pool).await?;
    Ok(result.rows_affected())
}

/// Delete all summaries for one visitor.
///
/// # Errors
///
/// [`HistoryError::NotFound`] when no rows matched, otherwise the exact
/// count deleted.
pub async fn delete_by_visitor(pool: &PgPool, visitor_id: &str) -> Result<u64, HistoryError> {
    let result = sqlx::query("DELETE FROM summaries WHERE visitor_id = $1")
        .bind(visitor_id)
        .execute(pool)
        .await?;

    let deleted = result.rows_affected();
    if deleted == 0 {
        return Err(HistoryError::NotFound);
    }
    Ok(deleted)
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
