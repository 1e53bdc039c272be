//! # Snipbin Server
//!
//! Entry point for the snippet web application. Startup order matters:
//! logging first, then configuration, then the database pool and migrations,
//! then the session store, and finally the router with its middleware chains.

use snipbin::config::Config;
use snipbin::routes;
use snipbin::state::AppState;
use time::Duration;
use tower_sessions::{ExpiredDeletion, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing/logging system.
    // Default: info level for most crates, debug level for our app.
    // Can be overridden with the RUST_LOG environment variable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,snipbin=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables and .env file.
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    // Initialize application state: database connection pool + migrations.
    let app_state = AppState::new(&config).await?;
    tracing::info!("Application state initialized");

    // Configure the session store using SQLite. Session data (the
    // authenticated user id, flash messages, the CSRF token) lives
    // server-side; the client only ever holds the opaque session token.
    let session_store = SqliteStore::new(app_state.db.clone());
    session_store.migrate().await?;

    // Expired session records stay in the table until something removes
    // them, so sweep periodically in the background.
    let sweeper_store = session_store.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(600));
        loop {
            interval.tick().await;
            tracing::debug!("Running expired-session sweep");
            if let Err(e) = sweeper_store.delete_expired().await {
                tracing::error!("Expired-session sweep failed: {:?}", e);
            }
        }
    });

    // Sessions expire after 12 hours. The session cookie is HttpOnly by
    // default; Secure means it is only sent over HTTPS.
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(true)
        .with_expiry(Expiry::OnInactivity(Duration::hours(12)));

    // Build the router with its standard/dynamic/protected middleware chains.
    let app = routes::router(app_state, session_layer);

    let bind_addr = config.bind_address();
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
