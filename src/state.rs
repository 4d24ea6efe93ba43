//! # Application State
//!
//! Shared resources handed to every handler and middleware. The pool is cloned per
//! request, which only clones a handle.

use crate::config::Config;
use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the user table (the session store shares it)
    pub db: SqlitePool,

    /// Loaded configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Connect to the database and run the user table migrations.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = SqlitePool::connect(&config.database_url)
            .await
            .with_context(|| format!("failed to connect to {}", config.database_url))?;

        Self::from_pool(db, config.clone()).await
    }

    /// Build the state around an existing pool, running migrations on it.
    pub async fn from_pool(db: SqlitePool, config: Config) -> Result<Self> {
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("failed to run migrations")?;

        Ok(AppState {
            db,
            config: Arc::new(config),
        })
    }
}
