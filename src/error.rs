//! # Error Handling
//!
//! This module defines the application error type and converts it into
//! HTTP responses.
//!
//! ## Error taxonomy
//! - Client errors (malformed input, CSRF mismatch) => 4xx, logged at debug
//! - Not-found domain errors (record absent or expired) => 404
//! - Infrastructure errors (storage, session store, hashing) => generic 500;
//!   full detail goes to the server log only, never to the client body
//!
//! Domain sentinels (`NoRecord`, `InvalidCredentials`, `DuplicateEmail`)
//! are normally translated at the handler boundary (404 / re-rendered form)
//! rather than reaching `IntoResponse`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-wide error type.
///
/// The `#[from]` attributes enable automatic conversion with the `?`
/// operator, so e.g. a `sqlx::Error` becomes `AppError::Database` at the
/// call site without explicit mapping.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database errors (SQLx library errors).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Session store errors (loading, serializing or persisting session
    /// state). These are infrastructure failures, never a logout.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Password hashing/verification errors.
    #[error("Password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// No matching record found (absent, or present but expired).
    #[error("No matching record found")]
    NoRecord,

    /// Email/password pair did not match a user.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A user with this email already exists.
    #[error("Duplicate email")]
    DuplicateEmail,

    /// Client sent a request we refuse to process (e.g. CSRF mismatch).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NoRecord => (StatusCode::NOT_FOUND, "Not Found"),

            AppError::BadRequest(reason) => {
                tracing::debug!(%reason, "rejecting client request");
                (StatusCode::BAD_REQUEST, "Bad Request")
            }

            // These are handled at the handler boundary (re-rendered form
            // with a message). If one leaks this far, the closest honest
            // answer is an unprocessable-entity status with no detail.
            AppError::InvalidCredentials | AppError::DuplicateEmail => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable Entity")
            }

            // Infrastructure failures: log the detail server-side, return
            // a generic body so nothing internal leaks to the client.
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            AppError::Session(e) => {
                tracing::error!("Session error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            AppError::Hash(e) => {
                tracing::error!("Password hash error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        (status, message).into_response()
    }
}

/// Convenience type alias for Results using AppError.
pub type AppResult<T> = Result<T, AppError>;
