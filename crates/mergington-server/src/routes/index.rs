use axum::http::Uri;
use axum::response::Redirect;

use crate::error::AppError;

/// Where the browser lands when it opens the site root.
pub const INDEX_PATH: &str = "/static/index.html";

/// GET / — temporary (307) redirect to the frontend.
pub async fn root() -> Redirect {
    Redirect::temporary(INDEX_PATH)
}

/// Any unmatched route.
pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = uri.path(), "no route");
    AppError::not_found("Not Found")
}

/// A known route hit with a method it does not serve.
pub async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}
