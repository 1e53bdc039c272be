//! # Snipbin
//!
//! A server-rendered web application for posting and viewing short-lived
//! text snippets, with user signup/login and ownership-gated creation.
//!
//! ## Key Concepts
//! - **Middleware pipeline**: every request passes through an ordered chain
//!   of cross-cutting handlers (panic recovery, logging, security headers,
//!   session load/save, CSRF validation, authentication resolution)
//! - **Sessions**: server-side state keyed by an opaque cookie token, with
//!   token rotation on every privilege boundary (login/logout)
//! - **Fail closed**: any security-relevant error short-circuits the chain
//!   before application handlers run

pub mod config;      // Configuration management (environment variables)
pub mod db;          // Database operations (snippets, users)
pub mod error;       // Error handling and custom error types
pub mod forms;       // Typed form values and their validation rules
pub mod handlers;    // HTTP request handlers (routes)
pub mod middleware;  // Request/response interceptors (auth, CSRF, recovery)
pub mod routes;      // Router assembly and middleware chain composition
pub mod session;     // Session keys and privilege-boundary helpers
pub mod state;       // Shared application state
pub mod templates;   // Page rendering collaborator
pub mod validator;   // Form validation error accumulator
