//! Route definitions for the `/jobs` proxy.

use axum::routing::get;
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// GET    /{id}     -> get_job
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(jobs::get_job))
}
