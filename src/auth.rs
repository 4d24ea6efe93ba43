//! # Authentication
//!
//! Credential verification plus (de)serialization of the logged-on identity. Only the
//! user id is stored in the session; the rest of [`CurrentUser`] is reloaded from the
//! user table on every request.

use crate::db::{models::User, users};
use crate::error::AppResult;
use crate::password;
use sqlx::SqlitePool;
use tower_sessions::Session;

/// Session key holding the identity reference
pub const USER_ID_KEY: &str = "user_id";

/// Identity attached to requests whose session holds a valid user id
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// Check `username`/`password` against the user table.
///
/// Unknown users and wrong passwords both return `Ok(None)`.
pub async fn verify_credentials(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> AppResult<Option<User>> {
    let Some(user) = users::find_by_username(pool, username).await? else {
        return Ok(None);
    };

    let matches =
        password::verify_password_blocking(password.to_string(), user.password_hash.clone())
            .await?;

    Ok(matches.then_some(user))
}

/// Bind the session to `user`, issuing a fresh session id first so a token planted
/// before logon is useless afterwards.
pub async fn log_in(session: &Session, user: &User) -> AppResult<()> {
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, &user.id).await?;
    Ok(())
}

/// Destroy the session, identity included.
pub async fn log_out(session: &Session) -> AppResult<()> {
    session.flush().await?;
    Ok(())
}

/// Resolve the identity stored in the session, if any.
///
/// A reference to a user that no longer exists is dropped from the session.
pub async fn current_user(session: &Session, pool: &SqlitePool) -> AppResult<Option<CurrentUser>> {
    let Some(user_id) = session.get::<String>(USER_ID_KEY).await? else {
        return Ok(None);
    };

    match users::find_by_id(pool, &user_id).await? {
        Some(user) => Ok(Some(user.into())),
        None => {
            tracing::debug!(%user_id, "session refers to a missing user, dropping identity");
            session.remove::<String>(USER_ID_KEY).await?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn credentials_are_checked_against_the_hash() {
        let pool = test_support::memory_pool().await;
        test_support::create_user(&pool, "alice", "password123").await;

        let ok = verify_credentials(&pool, "alice", "password123").await.unwrap();
        assert_eq!(ok.map(|u| u.username), Some("alice".to_string()));

        assert!(verify_credentials(&pool, "alice", "wrong-password")
            .await
            .unwrap()
            .is_none());
        assert!(verify_credentials(&pool, "mallory", "password123")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn logged_in_session_resolves_to_the_user() {
        let pool = test_support::memory_pool().await;
        let user = test_support::create_user(&pool, "alice", "password123").await;
        let session = session();

        assert!(current_user(&session, &pool).await.unwrap().is_none());

        log_in(&session, &user).await.unwrap();
        let current = current_user(&session, &pool).await.unwrap().unwrap();
        assert_eq!(current.id, user.id);
        assert_eq!(current.username, "alice");

        log_out(&session).await.unwrap();
        assert!(current_user(&session, &pool).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn dangling_identity_is_dropped() {
        let pool = test_support::memory_pool().await;
        let session = session();
        session.insert(USER_ID_KEY, "no-such-user").await.unwrap();

        assert!(current_user(&session, &pool).await.unwrap().is_none());
        assert!(session.get::<String>(USER_ID_KEY).await.unwrap().is_none());
    }
}
