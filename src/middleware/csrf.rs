//! Anti-forgery protection.
//!
//! One token per session, stored under the session's `csrf_token` key and
//! therefore bound 1:1 to the session cookie: a token minted for session A
//! never validates against session B.
//!
//! Safe methods (GET/HEAD/OPTIONS/TRACE) mint the token if absent and make
//! it available to handlers for embedding in rendered forms. Unsafe
//! methods must echo the token back (in an `x-csrf-token` header or a
//! `csrf_token` form field) or the request is rejected with a 400 before
//! it reaches any handler or mutates the session.

use crate::error::AppError;
use crate::session;
use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;
use uuid::Uuid;

/// The session's CSRF token, attached to request extensions so handlers
/// can embed it in rendered forms.
#[derive(Debug, Clone)]
pub struct CsrfToken(pub String);

const FORM_FIELD: &str = "csrf_token";
const HEADER_NAME: &str = "x-csrf-token";

// Cap on how much request body the guard will buffer while looking for
// the token field. Matches axum's default request body limit.
const MAX_FORM_BYTES: usize = 2 * 1024 * 1024;

/// CSRF guard middleware. Runs after session load, before the auth
/// resolver and all handlers.
pub async fn csrf_guard(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let stored: Option<String> = session.get(session::CSRF_TOKEN_KEY).await?;

    let (token, request) = if request.method().is_safe() {
        let token = match stored {
            Some(token) => token,
            None => {
                let token = Uuid::new_v4().simple().to_string();
                session.insert(session::CSRF_TOKEN_KEY, &token).await?;
                token
            }
        };
        (token, request)
    } else {
        // No token bound to this session means nothing the client sends
        // can validate. Reject without minting: the session must not be
        // mutated by a request that is about to be refused.
        let Some(token) = stored else {
            return Err(AppError::BadRequest(
                "no CSRF token bound to session".to_string(),
            ));
        };

        let (request, submitted) = submitted_token(request).await?;
        if submitted.as_deref() != Some(token.as_str()) {
            return Err(AppError::BadRequest("CSRF token mismatch".to_string()));
        }
        (token, request)
    };

    let mut request = request;
    request.extensions_mut().insert(CsrfToken(token.clone()));

    let mut response = next.run(request).await;

    // Mirror the token to the client in its own cookie, distinct from the
    // session cookie. Forms still embed the token explicitly; the cookie
    // is the delivery channel, not the validation source.
    let cookie = format!("{FORM_FIELD}={token}; Path=/; HttpOnly; Secure; SameSite=Lax");
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }

    Ok(response)
}

/// Pull the submitted token out of the request, preferring the header.
///
/// For urlencoded forms the body is buffered, scanned for the token field
/// and then restored, so the handler's `Form` extractor still sees the
/// original bytes.
async fn submitted_token(request: Request) -> Result<(Request, Option<String>), AppError> {
    if let Some(value) = request.headers().get(HEADER_NAME) {
        let token = value.to_str().ok().map(str::to_string);
        return Ok((request, token));
    }

    let is_form = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    if !is_form {
        return Ok((request, None));
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|_| AppError::BadRequest("unreadable request body".to_string()))?;

    let token = serde_urlencoded::from_bytes::<Vec<(String, String)>>(&bytes)
        .ok()
        .and_then(|pairs| {
            pairs
                .into_iter()
                .find(|(key, _)| key == FORM_FIELD)
                .map(|(_, value)| value)
        });

    Ok((Request::from_parts(parts, Body::from(bytes)), token))
}
