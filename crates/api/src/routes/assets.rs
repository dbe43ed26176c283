//! Route definitions for the `/assets` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{assets, files};
use crate::state::AppState;

/// Routes mounted at `/assets`.
///
/// ```text
/// GET    /                 -> list_assets
/// GET    /file             -> serve_file
/// POST   /{id}/upscale     -> upscale_asset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets))
        .route("/file", get(files::serve_file))
        .route("/{id}/upscale", post(assets::upscale_asset))
}
