//! Data structures mapped from database rows.

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// A text snippet. Snippets are short-lived: `expires` is set at insert
/// time and queries never return rows past their expiry.
#[derive(Debug, Clone, FromRow)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: NaiveDateTime,
    pub expires: NaiveDateTime,
}
