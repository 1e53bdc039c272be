//! # Session Keys and Privilege-Boundary Helpers
//!
//! All session access goes through the named keys below; nothing else in
//! the codebase touches raw session key strings. Writes are buffered by
//! tower-sessions and persisted when the response completes, so everything
//! here stays cheap within a request.
//!
//! ## Token rotation
//! `login` and `logout` are the only privilege-boundary crossings, and both
//! rotate the session token via `cycle_id` in the same call that mutates
//! the authentication key. The old token is invalidated when the session is
//! persisted at the end of the same request, which prevents session
//! fixation: a token handed out before login never identifies a logged-in
//! session.
//!
//! ## Concurrency
//! tower-sessions serialises access to a single session record behind an
//! internal lock, so a token rotation is never interleaved with a plain
//! write to the same session. Requests bearing different tokens never
//! contend; duplicate-tab races on one token resolve as last-write-wins at
//! persist time.

use crate::error::AppResult;
use tower_sessions::Session;

/// The id of the logged-in user. Absent (or zero) means anonymous.
pub const AUTHENTICATED_USER_ID_KEY: &str = "authenticated_user_id";

/// One-shot message rendered into the next page and then discarded.
pub const FLASH_KEY: &str = "flash";

/// The anti-forgery token bound to this session.
pub const CSRF_TOKEN_KEY: &str = "csrf_token";

/// Mark the session as authenticated for `user_id`.
///
/// Token rotation happens in the same logical step as the privilege
/// change; callers must not insert the user id themselves.
pub async fn login(session: &Session, user_id: i64) -> AppResult<()> {
    session.cycle_id().await?;
    session.insert(AUTHENTICATED_USER_ID_KEY, user_id).await?;
    Ok(())
}

/// Clear the authenticated user id and rotate the token.
pub async fn logout(session: &Session) -> AppResult<()> {
    session.cycle_id().await?;
    session.remove::<i64>(AUTHENTICATED_USER_ID_KEY).await?;
    Ok(())
}

/// Read the authenticated user id, if any.
pub async fn user_id(session: &Session) -> AppResult<Option<i64>> {
    Ok(session.get(AUTHENTICATED_USER_ID_KEY).await?)
}

/// Stash a one-shot message for the next rendered page.
pub async fn set_flash(session: &Session, message: &str) -> AppResult<()> {
    session.insert(FLASH_KEY, message).await?;
    Ok(())
}

/// Take the pending flash message, clearing it from the session.
pub async fn pop_flash(session: &Session) -> AppResult<Option<String>> {
    Ok(session.remove(FLASH_KEY).await?)
}
