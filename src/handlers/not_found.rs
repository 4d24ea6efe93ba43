use axum::http::{StatusCode, Uri};

/// Fallback for every unmatched route. Echoes the requested path and query.
pub async fn not_found(uri: Uri) -> (StatusCode, String) {
    tracing::debug!(%uri, "no route matched");
    (
        StatusCode::NOT_FOUND,
        format!("That page ({uri}) was not found."),
    )
}
