//! Helpers shared by unit and router tests: an in-memory database, a fully wired
//! router, and a tiny cookie-carrying client.

use crate::app;
use crate::config::Config;
use crate::db::{models::User, users};
use crate::password;
use crate::state::AppState;
use axum::{
    body::{to_bytes, Body},
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        HeaderMap, Request, StatusCode,
    },
    Router,
};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;
use tower_sessions_sqlx_store::SqliteStore;

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: "sqlite::memory:".into(),
        session_secret: "test-secret-that-is-only-used-in-tests".into(),
        production: false,
    }
}

/// A migrated in-memory database.
///
/// Every connection to `sqlite::memory:` opens a different database, so the pool is
/// pinned to a single connection that is never recycled.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should open");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations should apply");

    pool
}

pub async fn create_user(pool: &SqlitePool, username: &str, password: &str) -> User {
    let hash = password::hash_password(password).expect("hashing should succeed");
    users::create_user(pool, username, &hash)
        .await
        .expect("insert should succeed")
        .expect("username should be free")
}

/// The full application on an in-memory database. The pool is returned so tests can
/// seed users or break the store.
pub async fn test_app() -> (Router, SqlitePool) {
    let pool = memory_pool().await;
    let state = AppState::from_pool(pool.clone(), test_config())
        .await
        .expect("state should build");

    let store = SqliteStore::new(pool.clone());
    store.migrate().await.expect("session table should be created");

    (app::router(state, store), pool)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    pub fn set_cookie(&self) -> Option<&str> {
        self.headers.get(SET_COOKIE).and_then(|v| v.to_str().ok())
    }
}

/// Sends requests through the router like a browser would, remembering the session
/// cookie between them.
pub struct TestClient {
    app: Router,
    pub cookie: Option<String>,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = Request::builder().method("GET").uri(path);
        self.send(request, Body::empty()).await
    }

    /// Send a bodiless request with any method.
    pub async fn send_method(&mut self, method: &str, path: &str) -> TestResponse {
        let request = Request::builder().method(method).uri(path);
        self.send(request, Body::empty()).await
    }

    pub async fn post_form(&mut self, path: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request, Body::from(form.to_string())).await
    }

    /// Log on as an existing user.
    pub async fn log_on(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form(
            "/session",
            &format!("username={username}&password={password}"),
        )
        .await
    }

    async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = self
            .app
            .clone()
            .oneshot(request.body(body).expect("request should build"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");

        let response = TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        };

        if let Some(set_cookie) = response.set_cookie() {
            let pair = set_cookie.split(';').next().unwrap_or_default().trim();
            let has_value = pair.split_once('=').is_some_and(|(_, v)| !v.is_empty());
            self.cookie = has_value.then(|| pair.to_string());
        }

        response
    }
}
