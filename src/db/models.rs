//! # Database Models
//!
//! Rows of the `users` table. Sessions live in the table owned by the session store
//! and have no model here.

use chrono::Utc;
use uuid::Uuid;

/// User account
///
/// Timestamps are RFC 3339 strings since SQLite stores them as text.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique identifier (UUID v4), the only thing kept in the session after logon
    pub id: String,

    /// Unique username used to log on
    pub username: String,

    /// Argon2id PHC string, e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`
    pub password_hash: String,

    /// When the account was created
    pub created_at: String,
}

impl User {
    /// Create a new user with a generated ID and creation timestamp
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}
