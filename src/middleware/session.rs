//! # Session bootstrap
//!
//! Runs directly inside the session layer and before every other stage, so that
//! `attach_user`, `inject_locals` and the handlers always see a session that exists
//! in the store.

use crate::error::AppResult;
use axum::{extract::Request, middleware::Next, response::Response};
use time::OffsetDateTime;
use tower_sessions::Session;

/// Marker written into every new session
pub const STARTED_AT_KEY: &str = "started_at";

/// Make sure every visitor has a persisted session and therefore a cookie.
///
/// The session layer only saves sessions holding data, so a fresh session gets a
/// start timestamp and is saved right away. Loading or saving here means a store
/// failure stops the request with a 500 before any handler sees it.
pub async fn bootstrap_session(
    session: Session,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    if session.get::<i64>(STARTED_AT_KEY).await?.is_none() {
        session
            .insert(STARTED_AT_KEY, OffsetDateTime::now_utc().unix_timestamp())
            .await?;
        session.save().await?;
        tracing::debug!("started new session");
    }

    Ok(next.run(request).await)
}
