//! # HTTP Request Handlers
//!
//! This module contains all the HTTP route handlers.
//!
//! ## Submodules
//! - `snippets`: home page, snippet viewing and creation
//! - `users`: signup, login and logout
//!
//! ## Handler Pattern
//! Handlers are async functions that:
//! 1. Extract data from the request (state, session, the typed extensions
//!    that the middleware chain attached, and finally the form body)
//! 2. Call business logic (validation, database operations)
//! 3. Return a response, translating domain sentinels into the right
//!    HTTP-level outcome (404 for missing records, a re-rendered 422 form
//!    for validation failures, a redirect on success)

pub mod snippets;
pub mod users;

/// Liveness endpoint. Never fails, so it skips the `AppResult` plumbing.
pub async fn ping() -> &'static str {
    "OK"
}
