//! # Error Handling
//!
//! Every failure a handler or middleware cannot recover from ends up as an [`AppError`].
//! Recoverable failures (bad credentials, invalid forms) never get here: they are
//! flashed or re-rendered by the handler itself.
//!
//! All errors answer with `500 Internal Server Error` and the error message as plain
//! text, after being logged server-side.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::any::Any;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// User table errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Session store errors (load or save of the session record failed)
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// View rendering errors
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Hashing a new password failed, or a stored hash is malformed
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Anything else that shouldn't normally happen
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self, "request failed");
        plain_text_error(self.to_string())
    }
}

/// Turns a panic raised anywhere below `CatchPanicLayer` into the same response shape
/// as an [`AppError`].
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    tracing::error!(%message, "handler panicked");
    plain_text_error(message)
}

fn plain_text_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        message,
    )
        .into_response()
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
