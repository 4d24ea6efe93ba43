//! # Secret Word Handlers
//!
//! The word lives in the visitor's session only, so every session sees its own copy.

use crate::error::AppResult;
use crate::flash::{self, Category};
use crate::middleware::locals::Locals;
use crate::views::{self, SecretWordView};
use axum::{
    response::{Html, Redirect},
    Extension, Form,
};
use serde::Deserialize;
use tower_sessions::Session;

const SECRET_WORD_KEY: &str = "secretWord";

/// Value shown to a session that never set one
pub const DEFAULT_SECRET_WORD: &str = "syzygy";

#[derive(Debug, Deserialize)]
pub struct SecretWordForm {
    #[serde(rename = "secretWord", default)]
    pub secret_word: String,
}

/// GET /secretWord
///
/// An unset or empty word is replaced by [`DEFAULT_SECRET_WORD`] before rendering.
pub async fn show(
    session: Session,
    Extension(locals): Extension<Locals>,
) -> AppResult<Html<String>> {
    let secret_word = match session.get::<String>(SECRET_WORD_KEY).await? {
        Some(word) if !word.is_empty() => word,
        _ => {
            session.insert(SECRET_WORD_KEY, DEFAULT_SECRET_WORD).await?;
            DEFAULT_SECRET_WORD.to_string()
        }
    };

    views::render(&SecretWordView {
        locals: &locals,
        secret_word: &secret_word,
    })
}

/// POST /secretWord
pub async fn update(session: Session, Form(form): Form<SecretWordForm>) -> AppResult<Redirect> {
    session.insert(SECRET_WORD_KEY, &form.secret_word).await?;
    flash::push(&session, Category::Info, "Secret word updated successfully!").await?;

    Ok(Redirect::to("/secretWord"))
}
