//! Authentication-state resolution and the route authorization gate.
//!
//! `authenticate` runs on every dynamic route, after session load and the
//! CSRF guard, and attaches an `AuthState` to the request.
//! `require_authentication` is appended to the dynamic chain for protected
//! routes and consumes that state.

use crate::db;
use crate::error::AppError;
use crate::session;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Per-request authentication context.
///
/// Derived once per request and carried in the request extensions; never
/// persisted. Strongly typed so downstream code can't confuse it with any
/// other extension value.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user_id: Option<i64>,
}

/// Resolve the request's authentication state from the session.
///
/// The session saying "user N is logged in" is not enough on its own: the
/// account may have been deleted while the session was still live, so the
/// user's existence is re-checked against the store. A failed lookup is a
/// server error, not an anonymous fallback; masking infrastructure failure
/// as a logout would hide outages.
///
/// If the user record is gone the request proceeds anonymously but the
/// session is left untouched: this resolver is read-only, and only an
/// explicit logout or expiry clears session state.
pub async fn authenticate(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth = match session::user_id(&session).await? {
        // Fast path for anonymous traffic: no user id in the session means
        // no database work at all.
        None | Some(0) => AuthState::default(),
        Some(id) => {
            if db::users::exists(&state.db, id).await? {
                AuthState {
                    is_authenticated: true,
                    user_id: Some(id),
                }
            } else {
                AuthState::default()
            }
        }
    };

    request.extensions_mut().insert(auth);
    Ok(next.run(request).await)
}

/// Route authorization gate for protected routes.
///
/// Unauthenticated requests are redirected to the login page and the
/// wrapped handler never runs. Authenticated responses are stamped
/// `Cache-Control: no-store` so pages behind the gate are never cached.
///
/// A missing `AuthState` extension counts as unauthenticated: the gate
/// fails closed if it is ever composed without the resolver in front.
pub async fn require_authentication(request: Request, next: Next) -> Response {
    let authenticated = request
        .extensions()
        .get::<AuthState>()
        .is_some_and(|auth| auth.is_authenticated);

    if !authenticated {
        return Redirect::to("/user/login").into_response();
    }

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn gated_app() -> Router {
        Router::new()
            .route("/", get(|| async { "OK" }))
            .layer(axum::middleware::from_fn(require_authentication))
    }

    #[tokio::test]
    async fn gate_redirects_anonymous_requests() {
        let response = gated_app()
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/user/login"
        );
    }

    #[tokio::test]
    async fn gate_fails_closed_on_missing_resolver() {
        // Same as anonymous: no AuthState extension at all.
        let response = gated_app()
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn gate_passes_authenticated_requests_and_disables_caching() {
        let request = HttpRequest::builder()
            .uri("/")
            .extension(AuthState {
                is_authenticated: true,
                user_id: Some(1),
            })
            .body(Body::empty())
            .unwrap();

        let response = gated_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
    }
}
