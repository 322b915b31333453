//! Visitor tracking — anonymous visit registration and a global counter.
//!
//! A visitor row stores only the last-visited timestamp. The count of
//! distinct visitors ever seen lives in a single `visitor_stats` row and is
//! incremented exactly once per new visitor id, in the same transaction as
//! the insert.

use sqlx::PgPool;

/// Outcome of a visit registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitStatus {
    /// First time this visitor id was seen; the global counter advanced.
    Registered,
    /// Known visitor; only the timestamp moved.
    Updated,
}

impl VisitStatus {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Registered => "Visit registered",
            Self::Updated => "Visitor timestamp updated",
        }
    }
}

/// Register a visit: refresh the timestamp for a known visitor, or insert a
/// new row and bump the global counter.
///
/// # Errors
///
/// Returns the underlying database error.
pub async fn register_visit(pool: &PgPool, visitor_id: &str) -> Result<VisitStatus, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query("UPDATE visitors SET visited_at = now() WHERE id = $1")
        .bind(visitor_id)
        .execute(tx.as_mut())
        .await?;

    if updated.rows_affected() == 1 {
        tx.commit().await?;
        return Ok(VisitStatus::Updated);
    }

    let inserted = sqlx::query(
        "INSERT INTO visitors (id, visited_at) VALUES ($1, now()) ON CONFLICT (id) DO NOTHING",
    )
    .bind(visitor_id)
    .execute(tx.as_mut())
    .await?;

    // A concurrent first visit can land between the UPDATE and the INSERT;
    // the loser must not bump the counter.
    if inserted.rows_affected() == 0 {
        tx.commit().await?;
        return Ok(VisitStatus::Updated);
    }

    sqlx::query(
        "INSERT INTO visitor_stats (id, count) VALUES ('global', 1)
         ON CONFLICT (id) DO UPDATE SET count = visitor_stats.count + 1",
    )
    .execute(tx.as_mut())
    .await?;

    tx.commit().await?;
    Ok(VisitStatus::Registered)
}

/// Total distinct visitors ever registered. Zero before the first visit.
///
/// # Errors
///
/// Returns the underlying database error.
pub async fn visit_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT count FROM visitor_stats WHERE id = 'global'")
        .fetch_optional(pool)
        .await?;
    Ok(row.map_or(0, |r| r.0))
}

#[cfg(test)]
#[path = "visitor_test.rs"]
mod tests;
