//! # Session Handlers
//!
//! Logon, logoff and registration. Credential failures are flashed and redirected;
//! registration form errors are rendered back into the form.

use crate::auth;
use crate::db::users;
use crate::error::AppResult;
use crate::flash::{self, Category};
use crate::middleware::{auth::LOGON_PATH, locals::Locals};
use crate::password;
use crate::state::AppState;
use crate::validation;
use crate::views::{self, LogonView, RegisterView};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use tower_sessions::Session;
use validator::Validate;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LogonForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Please provide a username of at most 50 characters."
    ))]
    pub username: String,

    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters."
    ))]
    pub password: String,

    #[validate(must_match(other = "password", message = "The passwords entered do not match."))]
    pub password1: String,
}

/// GET /session
pub async fn logon_form(Extension(locals): Extension<Locals>) -> AppResult<Html<String>> {
    views::render(&LogonView { locals: &locals })
}

/// POST /session
pub async fn logon(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LogonForm>,
) -> AppResult<Redirect> {
    let username = form.username.trim();

    match auth::verify_credentials(&state.db, username, &form.password).await? {
        Some(user) => {
            auth::log_in(&session, &user).await?;
            tracing::info!(user_id = %user.id, "user logged on");
            Ok(Redirect::to("/"))
        }
        None => {
            tracing::info!(%username, "logon rejected");
            flash::push(&session, Category::Error, "Incorrect credentials.").await?;
            Ok(Redirect::to(LOGON_PATH))
        }
    }
}

/// POST /session/logoff
pub async fn logoff(session: Session) -> AppResult<Redirect> {
    auth::log_out(&session).await?;
    Ok(Redirect::to("/"))
}

/// GET /session/register
pub async fn register_form(Extension(locals): Extension<Locals>) -> AppResult<Html<String>> {
    views::render(&RegisterView {
        locals: &locals,
        username: "",
        field_errors: &BTreeMap::new(),
    })
}

/// POST /session/register
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Extension(locals): Extension<Locals>,
    Form(mut form): Form<RegisterForm>,
) -> AppResult<Response> {
    form.username = form.username.trim().to_string();

    let mut field_errors = match form.validate() {
        Ok(()) => BTreeMap::new(),
        Err(errors) => validation::field_messages(&errors),
    };

    if field_errors.is_empty() {
        let hash = password::hash_password_blocking(form.password.clone()).await?;

        match users::create_user(&state.db, &form.username, &hash).await? {
            Some(user) => {
                tracing::info!(user_id = %user.id, username = %user.username, "user registered");
                flash::push(&session, Category::Info, "Account created, please log on.").await?;
                return Ok(Redirect::to(LOGON_PATH).into_response());
            }
            None => {
                field_errors.insert(
                    "username".to_string(),
                    "That username is already taken.".to_string(),
                );
            }
        }
    }

    let page = views::render(&RegisterView {
        locals: &locals,
        username: &form.username,
        field_errors: &field_errors,
    })?;

    Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
}
