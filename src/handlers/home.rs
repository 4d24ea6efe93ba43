use crate::error::AppResult;
use crate::middleware::locals::Locals;
use crate::views::{self, IndexView};
use axum::{response::Html, Extension};

/// GET /
pub async fn index(Extension(locals): Extension<Locals>) -> AppResult<Html<String>> {
    views::render(&IndexView { locals: &locals })
}
