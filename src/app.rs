//! # Router and request pipeline
//!
//! Every request passes through these stages, outermost first:
//!
//! 1. security headers: added to every response
//! 2. tracing: one span per request
//! 3. panic catcher: a panic below this point becomes a 500 carrying its message
//! 4. session layer: loads the session lazily by cookie and saves it (plus cookie)
//!    on the way out when it holds data
//! 5. `bootstrap_session`: new visitors get a saved session; store failures stop here
//! 6. `attach_user`: inserts `CurrentUser` when the session names an existing user
//! 7. `require_auth` (protected routes only): no `CurrentUser` means flash + redirect
//!    to the logon page
//! 8. `inject_locals` (matched routes only): inserts `Locals`, consuming flashes on GET
//! 9. handler, or the 404 fallback when no route (or no method on a route) matches

use crate::error::handle_panic;
use crate::handlers::{home, not_found::not_found, secret_word, session};
use crate::middleware::{
    auth::{attach_user, require_auth},
    locals::inject_locals,
    session::bootstrap_session,
};
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sha2::{Digest, Sha512};
use time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tower_sessions::{
    cookie::{Key, SameSite},
    Expiry, SessionManagerLayer,
};
use tower_sessions_sqlx_store::SqliteStore;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "sid";

/// Sessions idle for longer than this are discarded
const SESSION_IDLE_HOURS: i64 = 24;

/// Build the application router on top of `store`.
pub fn router(state: AppState, store: SqliteStore) -> Router {
    // The cookie key needs 64 bytes; SHA-512 turns any secret into exactly that.
    let key = Key::from(Sha512::digest(state.config.session_secret.as_bytes()).as_slice());

    let session_layer = SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE)
        .with_secure(state.config.production)
        .with_same_site(SameSite::Strict)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::hours(SESSION_IDLE_HOURS)))
        .with_signed(key);

    let protected_routes = Router::new()
        .route("/secretWord", get(secret_word::show).post(secret_word::update))
        .route_layer(axum_middleware::from_fn(inject_locals))
        .route_layer(axum_middleware::from_fn(require_auth));

    let public_routes = Router::new()
        .route("/", get(home::index))
        .route("/session", get(session::logon_form).post(session::logon))
        .route("/session/logoff", post(session::logoff))
        .route(
            "/session/register",
            get(session::register_form).post(session::register),
        )
        .route_layer(axum_middleware::from_fn(inject_locals));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        // Known path, unsupported method: also a 404. Declared after the merges so the
        // route layers don't wrap it, and before the stage layers so they do.
        .method_not_allowed_fallback(not_found)
        // Layers run in reverse order of declaration
        .layer(axum_middleware::from_fn_with_state(state.clone(), attach_user))
        .layer(axum_middleware::from_fn(bootstrap_session))
        .layer(session_layer)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("same-origin"),
        ))
        .with_state(state)
}
