//! User account persistence operations.
//!
//! Passwords are stored as bcrypt hashes (a slow adaptive hash) and only
//! ever compared via `bcrypt::verify`; plaintext never touches the
//! database.

use crate::error::{AppError, AppResult};
use sqlx::SqlitePool;

/// Create a new user account.
///
/// A violation of the unique constraint on `email` is reported as
/// `AppError::DuplicateEmail` so the signup handler can re-render the form
/// instead of failing the request.
pub async fn insert(pool: &SqlitePool, name: &str, email: &str, password: &str) -> AppResult<()> {
    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    sqlx::query(
        "INSERT INTO users (name, email, hashed_password, created)
         VALUES (?, ?, ?, datetime('now'))",
    )
    .bind(name)
    .bind(email)
    .bind(&hash)
    .execute(pool)
    .await
    .map_err(|e| {
        if e.as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation())
        {
            AppError::DuplicateEmail
        } else {
            AppError::Database(e)
        }
    })?;

    Ok(())
}

/// Verify an email/password pair, returning the user's id on success.
///
/// An unknown email and a wrong password both yield
/// `AppError::InvalidCredentials`: callers cannot tell which half failed.
pub async fn authenticate(pool: &SqlitePool, email: &str, password: &str) -> AppResult<i64> {
    let row: Option<(i64, String)> =
        sqlx::query_as("SELECT id, hashed_password FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await?;

    let (id, hashed_password) = row.ok_or(AppError::InvalidCredentials)?;

    if bcrypt::verify(password, &hashed_password)? {
        Ok(id)
    } else {
        Err(AppError::InvalidCredentials)
    }
}

/// Check whether a user with the given id exists.
pub async fn exists(pool: &SqlitePool, id: i64) -> AppResult<bool> {
    let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(exists != 0)
}
