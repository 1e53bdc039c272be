//! # Middleware Module
//!
//! Middleware intercepts HTTP requests and responses for cross-cutting
//! concerns. Each wrapper fully surrounds the next: the declared order
//! holds on both the enter and exit side of a request.
//!
//! ## Our Middleware
//! - `auth`: resolves the request's authentication state from the session
//!   and gates protected routes behind it
//! - `csrf`: issues/validates the anti-forgery token bound to the session
//! - `recover`: converts panics into a generic 500 response
//!
//! Chain composition lives in `crate::routes`; the modules here only
//! provide the individual wrappers.

pub mod auth;
pub mod csrf;
pub mod recover;
