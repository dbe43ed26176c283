//! Route definitions for `/generate`.

use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Routes mounted at `/generate`.
///
/// ```text
/// POST   /image    -> generate_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/image", post(generation::generate_image))
}
