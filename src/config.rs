//! # Configuration Management
//!
//! This module handles loading configuration from environment variables.
//! It uses the "12-factor app" methodology where configuration comes from
//! the environment.
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 4000)
//! - `DATABASE_URL`: SQLite database connection string

use anyhow::Result;
use std::env;

/// Application configuration.
///
/// All fields are public for easy access from other modules.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host/IP address to bind to.
    /// Examples: "127.0.0.1" (localhost only), "0.0.0.0" (all interfaces)
    pub host: String,

    /// Server port number (1-65535).
    pub port: u16,

    /// SQLite database connection URL.
    /// Format: "sqlite:filename.db?mode=rwc"
    /// The "mode=rwc" means: read, write, create if not exists.
    pub database_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Loads variables from a .env file if present (dotenvy doesn't error
    /// when the file is missing), falls back to sensible defaults, and
    /// returns an error if parsing fails (e.g. an invalid port number).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()?,

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:snipbin.db?mode=rwc".to_string()),
        })
    }

    /// Get the socket address to bind the server to.
    ///
    /// Combines host and port into the format required by
    /// `tokio::net::TcpListener::bind()`, e.g. "127.0.0.1:4000".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
