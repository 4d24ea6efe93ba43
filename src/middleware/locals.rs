//! # View context
//!
//! Applied per route group, inside `require_auth`, so unmatched requests and
//! rejected visitors never consume flash messages. Expects `attach_user` to have run.

use crate::auth::CurrentUser;
use crate::error::AppResult;
use crate::flash::{self, Category};
use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

/// Per-request view context, available to page handlers as `Extension<Locals>`.
#[derive(Debug, Clone, Default)]
pub struct Locals {
    pub user: Option<CurrentUser>,
    pub info: Vec<String>,
    pub errors: Vec<String>,
}

impl Locals {
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}

/// Build [`Locals`] for matched routes.
///
/// Flash messages are consumed only by GET requests: POST handlers redirect, and the
/// messages belong to the page rendered after the redirect.
pub async fn inject_locals(
    session: Session,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let mut locals = Locals {
        user: request.extensions().get::<CurrentUser>().cloned(),
        ..Locals::default()
    };

    if request.method() == Method::GET {
        locals.info = flash::take(&session, Category::Info).await?;
        locals.errors = flash::take(&session, Category::Error).await?;
    }

    request.extensions_mut().insert(locals);
    Ok(next.run(request).await)
}
