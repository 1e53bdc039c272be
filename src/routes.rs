//! # Router Assembly and Middleware Chains
//!
//! The middleware pipeline is composed here as three named chain values,
//! built once at startup:
//!
//! - **standard**: security headers -> panic recovery -> access logging,
//!   wrapped around the entire router so every response carries the fixed
//!   header set, error responses included
//! - **dynamic**: session load/save -> CSRF guard -> auth resolver, for
//!   all application routes
//! - **protected**: the dynamic chain plus the authorization gate, for
//!   routes that require a logged-in user
//!
//! `tower::ServiceBuilder` gives true nesting (the first layer added is
//! outermost on both the enter and exit side) and value semantics:
//! deriving the protected chain clones the dynamic chain, so the public
//! routes keep using the unextended one.
//!
//! Note on ordering: the header injector sits *outside* the recovery
//! boundary. A tower layer only decorates responses that pass through it,
//! so putting the headers inside recovery would strip them from
//! panic-generated 500s.

use crate::handlers;
use crate::middleware::{auth, csrf, recover};
use crate::state::AppState;
use axum::http::{header, HeaderName, HeaderValue};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;

/// Build the application router. The session layer is passed in by the
/// caller so tests can configure the cookie differently (e.g. non-Secure
/// over the plain-HTTP test transport).
pub fn router(state: AppState, session_layer: SessionManagerLayer<SqliteStore>) -> Router {
    // Dynamic chain: session load/save (outermost) -> CSRF guard -> auth
    // resolver. The CSRF check runs before the resolver so a forged
    // request is rejected before any per-request work happens.
    let dynamic = ServiceBuilder::new()
        .layer(session_layer)
        .layer(from_fn(csrf::csrf_guard))
        .layer(from_fn_with_state(state.clone(), auth::authenticate));

    // Protected chain: dynamic plus the authorization gate. Cloning first
    // leaves the public routes' chain untouched.
    let protected = dynamic.clone().layer(from_fn(auth::require_authentication));

    let public = Router::new()
        .route("/", get(handlers::snippets::home))
        .route("/snippet/view/{id}", get(handlers::snippets::view))
        .route(
            "/user/signup",
            get(handlers::users::signup_form).post(handlers::users::signup_post),
        )
        .route(
            "/user/login",
            get(handlers::users::login_form).post(handlers::users::login_post),
        )
        .route_layer(dynamic);

    let gated = Router::new()
        .route(
            "/snippet/create",
            get(handlers::snippets::create_form).post(handlers::snippets::create_post),
        )
        .route("/user/logout", post(handlers::users::logout_post))
        .route_layer(protected);

    // Liveness and static files sit under the standard chain only.
    standard(
        Router::new()
            .merge(public)
            .merge(gated)
            .route("/ping", get(handlers::ping))
            .nest_service("/static", ServeDir::new("ui/static")),
    )
    .with_state(state)
}

/// Wrap a router in the standard chain: security headers (outermost),
/// panic recovery, access logging.
fn standard<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::overriding(
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static(
                    "default-src 'self'; style-src 'self' fonts.googleapis.com; font-src fonts.gstatic.com",
                ),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::REFERRER_POLICY,
                HeaderValue::from_static("origin-when-cross-origin"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("deny"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                HeaderName::from_static("x-xss-protection"),
                HeaderValue::from_static("0"),
            ))
            .layer(CatchPanicLayer::custom(recover::handle_panic))
            .layer(TraceLayer::new_for_http()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn panic_handler() {
        panic!("something went badly wrong");
    }

    fn test_app() -> Router {
        standard(
            Router::new()
                .route("/", get(|| async { "OK" }))
                .route("/panic", get(panic_handler)),
        )
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn standard_chain_sets_security_headers() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-security-policy").unwrap(),
            "default-src 'self'; style-src 'self' fonts.googleapis.com; font-src fonts.gstatic.com"
        );
        assert_eq!(
            response.headers().get("referrer-policy").unwrap(),
            "origin-when-cross-origin"
        );
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
        assert_eq!(response.headers().get("x-frame-options").unwrap(), "deny");
        assert_eq!(response.headers().get("x-xss-protection").unwrap(), "0");
        assert_eq!(body_string(response).await, "OK");
    }

    #[tokio::test]
    async fn panic_becomes_generic_500_with_headers() {
        let response = test_app()
            .oneshot(Request::builder().uri("/panic").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers().get("connection").unwrap(), "close");
        // The header injector sits outside the recovery boundary, so even
        // a panic response carries the security header set.
        assert_eq!(response.headers().get("x-frame-options").unwrap(), "deny");

        let body = body_string(response).await;
        assert_eq!(body, "Internal Server Error");
        assert!(!body.contains("something went badly wrong"));
    }

    #[tokio::test]
    async fn server_survives_a_panic() {
        let app = test_app();

        let first = app
            .clone()
            .oneshot(Request::builder().uri("/panic").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let second = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);
    }
}
