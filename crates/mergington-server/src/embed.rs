use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

use crate::error::AppError;

#[derive(Embed)]
#[folder = "../../static/"]
struct StaticAssets;

/// GET /static/{*path} — serve an embedded frontend asset.
pub async fn static_handler(Path(path): Path<String>) -> Result<Response, AppError> {
    let path = path.trim_start_matches('/');

    match <StaticAssets as Embed>::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Ok((
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response())
        }
        None => {
            tracing::debug!(path, "static asset not found");
            Err(AppError::not_found("Not Found"))
        }
    }
}
