//! # Middleware Module
//!
//! Request stages that run around the route handlers. Their order is fixed in
//! [`crate::app::router`].
//!
//! - `session`: persists a session for every visitor
//! - `auth`: attaches the logged-on user, and gates protected routes
//! - `locals`: builds the view context (user + flash messages)

pub mod auth;
pub mod locals;
pub mod session;
