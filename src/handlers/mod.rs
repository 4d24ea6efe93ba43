//! # HTTP Request Handlers
//!
//! - `home`: landing page
//! - `session`: logon, logoff and registration
//! - `secret_word`: the protected secret word page
//! - `not_found`: fallback for unmatched routes
//!
//! Page handlers read their view context from `Extension<Locals>`, which the locals
//! stage inserts before they run.

pub mod home;
pub mod not_found;
pub mod secret_word;
pub mod session;
