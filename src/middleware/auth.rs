//! Identity stages. `attach_user` runs for every request after the session bootstrap;
//! `require_auth` is a route layer on the protected group only.

use crate::auth::{self, CurrentUser};
use crate::error::AppResult;
use crate::flash::{self, Category};
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Where unauthenticated visitors of protected pages are sent
pub const LOGON_PATH: &str = "/session";

/// Attach [`CurrentUser`] to the request when the session holds a valid identity.
///
/// Runs on every request; anonymous requests pass through untouched.
pub async fn attach_user(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    if let Some(user) = auth::current_user(&session, &state.db).await? {
        request.extensions_mut().insert(user);
    }

    Ok(next.run(request).await)
}

/// Gate for protected routes: requires [`attach_user`] to have found an identity.
pub async fn require_auth(session: Session, request: Request, next: Next) -> AppResult<Response> {
    if request.extensions().get::<CurrentUser>().is_some() {
        return Ok(next.run(request).await);
    }

    tracing::debug!(path = %request.uri().path(), "unauthenticated access to protected route");
    flash::push(
        &session,
        Category::Error,
        "You can't access that page before logon.",
    )
    .await?;

    Ok(Redirect::to(LOGON_PATH).into_response())
}
