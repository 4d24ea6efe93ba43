//! # Secret Word Server
//!
//! A small session-backed site: log on, then read and change a secret word that is
//! kept in your session. Demonstrates cookie sessions persisted to a database,
//! password logon, and flash messages that survive exactly one redirect.

mod app;
mod auth;
mod config;
mod db;
mod error;
mod flash;
mod handlers;
mod middleware;
mod password;
mod state;
mod validation;
mod views;

#[cfg(test)]
mod test_support;

use crate::config::Config;
use crate::state::AppState;
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often expired session records are purged
const SESSION_CLEANUP_INTERVAL_SECS: u64 = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default: info for dependencies, debug for this crate; RUST_LOG overrides
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,secret_word=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    let app_state = AppState::new(&config).await?;
    tracing::info!("Application state initialized");

    // Sessions share the pool with the user table
    let session_store = SqliteStore::new(app_state.db.clone());
    session_store.migrate().await?;

    // Store errors in the cleanup loop are logged; the server keeps running without it
    let cleanup_store = session_store.clone();
    tokio::spawn(async move {
        let period = tokio::time::Duration::from_secs(SESSION_CLEANUP_INTERVAL_SECS);
        if let Err(e) = cleanup_store.continuously_delete_expired(period).await {
            tracing::error!("Session cleanup stopped: {:?}", e);
        }
    });

    let app = app::router(app_state, session_store);

    let bind_addr = config.bind_address();
    tracing::info!("Server is listening on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
