use axum::{http::Uri, response::Response};

use crate::presentation::views::render_not_found;

/// Fallback for every path no route matches
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "No route matched");
    render_not_found(Some(uri.path().to_string()))
}
