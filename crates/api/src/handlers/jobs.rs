//! Worker job status proxy.

use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::extract::ApiPath;
use crate::state::AppState;

/// GET /api/jobs/{id}
///
/// Returns the worker's job document unchanged. Nothing local is read or
/// written; job rows recorded here are never updated from it.
pub async fn get_job(
    State(state): State<AppState>,
    ApiPath(job_id): ApiPath<String>,
) -> AppResult<Json<serde_json::Value>> {
    let job = state.worker.fetch_job(&job_id).await?;
    tracing::debug!(%job_id, "Fetched worker job");
    Ok(Json(job))
}
