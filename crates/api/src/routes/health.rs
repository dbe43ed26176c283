use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when both dependencies answer, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the store is reachable.
    pub db_healthy: bool,
    /// Whether the worker answered on its root route.
    pub worker_reachable: bool,
}

/// GET /health -- returns service, store and worker health.
///
/// Always 200; an unreachable dependency only degrades the status.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db, worker) = tokio::join!(state.store.health_check(), state.worker.health());
    let db_healthy = db.is_ok();
    let worker_reachable = worker.is_ok();

    let status = if db_healthy && worker_reachable {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        worker_reachable,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
