//! Snippet persistence operations.

use crate::db::models::Snippet;
use crate::error::{AppError, AppResult};
use sqlx::SqlitePool;

/// Insert a new snippet that expires `expires_days` days from now.
/// Returns the id of the new row.
pub async fn insert(
    pool: &SqlitePool,
    title: &str,
    content: &str,
    expires_days: i64,
) -> AppResult<i64> {
    let result = sqlx::query(
        "INSERT INTO snippets (title, content, created, expires)
         VALUES (?, ?, datetime('now'), datetime('now', '+' || ? || ' days'))",
    )
    .bind(title)
    .bind(content)
    .bind(expires_days)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Fetch one unexpired snippet by id.
///
/// An expired snippet is indistinguishable from one that never existed:
/// both yield `AppError::NoRecord`.
pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<Snippet> {
    let snippet = sqlx::query_as::<_, Snippet>(
        "SELECT id, title, content, created, expires FROM snippets
         WHERE expires > datetime('now') AND id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NoRecord,
        _ => AppError::Database(e),
    })?;

    Ok(snippet)
}

/// Return the `n` most recently created unexpired snippets.
pub async fn latest(pool: &SqlitePool, n: i64) -> AppResult<Vec<Snippet>> {
    let snippets = sqlx::query_as::<_, Snippet>(
        "SELECT id, title, content, created, expires FROM snippets
         WHERE expires > datetime('now') ORDER BY id DESC LIMIT ?",
    )
    .bind(n)
    .fetch_all(pool)
    .await?;

    Ok(snippets)
}
