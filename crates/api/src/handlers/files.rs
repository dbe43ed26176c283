//! Serve worker-written images from the allow-listed storage roots.

use std::path::Path;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use studionova_core::file_access::resolve_storage_file;

use crate::error::{AppError, AppResult};
use crate::extract::ApiQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FileQuery {
    pub path: Option<String>,
}

/// Guess a Content-Type from a file extension.
fn content_type_for_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// GET /api/assets/file?path=
///
/// The path is checked before any filesystem access: `..` is rejected and
/// the resolved path must sit under `<worker_root>/storage` or
/// `<worker_root>/datasets`.
pub async fn serve_file(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FileQuery>,
) -> AppResult<Response> {
    let path = resolve_storage_file(
        query.path.as_deref(),
        &state.config.worker_root,
        &state.config.allowed_file_roots(),
    )?;

    let data = tokio::fs::read(&path).await.map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "Storage file unreadable");
        AppError::NotFound("File not found.".to_string())
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for_extension(&path)),
            (header::CACHE_CONTROL, "public, max-age=60"),
        ],
        data,
    )
        .into_response())
}
