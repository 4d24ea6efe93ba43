//! # Configuration Management
//!
//! Configuration comes from the environment (a `.env` file is honoured for local
//! development).
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 3000)
//! - `DATABASE_URL`: SQLite connection string for users and sessions
//! - `SESSION_SECRET`: Secret used to sign the session cookie (required)
//! - `APP_ENV`: Set to `production` to only send the cookie over HTTPS

use anyhow::{Context, Result};
use std::env;
use std::fmt;

/// Application configuration
///
/// `Debug` is implemented by hand so the session secret never ends up in logs.
#[derive(Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    pub host: String,

    /// Server port number
    pub port: u16,

    /// SQLite database connection URL
    /// The "mode=rwc" suffix means: read, write, create if not exists
    pub database_url: String,

    /// Secret the session cookie signing key is derived from
    pub session_secret: String,

    /// Whether we run in production (secure cookies only)
    pub production: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Falls back to defaults for everything except `SESSION_SECRET`, which has no safe
    /// default. Fails if `PORT` is not a valid port number.
    ///
    /// ## Example .env file
    /// ```text
    /// PORT=3000
    /// DATABASE_URL=sqlite:secret_word.db?mode=rwc
    /// SESSION_SECRET=change-me-to-something-long-and-random
    /// APP_ENV=development
    /// ```
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid port number")?,

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:secret_word.db?mode=rwc".to_string()),

            session_secret: env::var("SESSION_SECRET")
                .context("SESSION_SECRET must be set")?,

            production: env::var("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        })
    }

    /// Socket address for `tokio::net::TcpListener::bind()`, e.g. "127.0.0.1:3000"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("session_secret", &"[redacted]")
            .field("production", &self.production)
            .finish()
    }
}
