use crate::db::models::User;
use crate::error::AppResult;
use sqlx::SqlitePool;

/// Insert a new user. Returns `None` when the username is already taken.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> AppResult<Option<User>> {
    let user = User::new(username.to_string(), password_hash.to_string());

    let result = sqlx::query(
        "INSERT INTO users (id, username, password_hash, created_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.created_at)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(Some(user)),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, user_id: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn usernames_are_unique() {
        let pool = test_support::memory_pool().await;

        let alice = create_user(&pool, "alice", "hash").await.unwrap();
        assert!(alice.is_some());

        let again = create_user(&pool, "alice", "other").await.unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn users_can_be_found_by_name_and_id() {
        let pool = test_support::memory_pool().await;
        let created = create_user(&pool, "bob", "hash").await.unwrap().unwrap();

        let by_name = find_by_username(&pool, "bob").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);

        let by_id = find_by_id(&pool, &created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "bob");

        assert!(find_by_username(&pool, "nobody").await.unwrap().is_none());
        assert!(find_by_id(&pool, "missing").await.unwrap().is_none());
    }
}
