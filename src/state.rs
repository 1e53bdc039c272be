//! # Application State
//!
//! This module defines the shared state that's accessible to all request
//! handlers. In Axum, state is how you share resources (database
//! connections, configuration, etc.) across the application.
//!
//! ## The State Pattern
//! Instead of creating new database connections per request, we:
//! 1. Create a connection pool once at startup
//! 2. Store it in AppState
//! 3. Axum clones the state for each request (cheap: `SqlitePool` is
//!    itself a cloneable handle to the pool)

use crate::config::Config;
use anyhow::Result;
use sqlx::sqlite::SqlitePool;

/// Shared application state.
///
/// The `#[derive(Clone)]` is essential for Axum: each request handler gets
/// a clone of the state. Both the pool and anything wrapped in `Arc` are
/// thread-safe, so the state can be shared across async tasks freely.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    ///
    /// A pool maintains multiple reusable database connections, which is
    /// much more efficient than opening a new connection for each query.
    pub db: SqlitePool,
}

impl AppState {
    /// Initialize application state.
    ///
    /// Connects to the SQLite database and runs migrations (creating the
    /// snippets and users tables if they don't exist).
    ///
    /// # Errors
    /// Returns an error if the database connection or migrations fail.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = SqlitePool::connect(&config.database_url).await?;

        // The `sqlx::migrate!` macro embeds migrations from ./migrations.
        // Migrations are run in order and tracked to avoid re-running them.
        sqlx::migrate!("./migrations").run(&db).await?;

        Ok(AppState { db })
    }
}
