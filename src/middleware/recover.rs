//! Panic recovery boundary.
//!
//! Sits at the outer edge of the middleware stack (only the security
//! header injector is outside it) and converts an unwinding panic into a
//! generic 500 so one broken handler never takes the process down or
//! leaks its panic message to the client.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use std::any::Any;
use std::backtrace::Backtrace;

/// Build the response for a caught panic.
///
/// The panic payload and a captured backtrace go to the server log only.
/// The client sees the bare reason phrase and a `Connection: close` header
/// telling it not to reuse the connection.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(
        panic = %detail,
        backtrace = %Backtrace::force_capture(),
        "recovered from panic while handling request"
    );

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONNECTION, HeaderValue::from_static("close"))],
        "Internal Server Error",
    )
        .into_response()
}
