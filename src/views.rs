//! # Views
//!
//! Askama templates live in `templates/`. All of them extend `layout.html`, which
//! renders the navigation and the flash messages carried by [`Locals`].

use crate::error::AppResult;
use crate::middleware::locals::Locals;
use askama::Template;
use axum::response::Html;
use std::collections::BTreeMap;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexView<'a> {
    pub locals: &'a Locals,
}

#[derive(Template)]
#[template(path = "logon.html")]
pub struct LogonView<'a> {
    pub locals: &'a Locals,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterView<'a> {
    pub locals: &'a Locals,
    pub username: &'a str,
    pub field_errors: &'a BTreeMap<String, String>,
}

#[derive(Template)]
#[template(path = "secret_word.html")]
pub struct SecretWordView<'a> {
    pub locals: &'a Locals,
    pub secret_word: &'a str,
}

pub fn render(view: &impl Template) -> AppResult<Html<String>> {
    Ok(Html(view.render()?))
}
