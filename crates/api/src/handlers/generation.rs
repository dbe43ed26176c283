//! Image generation and previews.
//!
//! Both endpoints always record one generation job. A worker failure is
//! recorded as `failed` before the error is returned.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use studionova_core::error::CoreError;
use studionova_core::generation::{
    preview_status, SamplerOverrides, KIND_IMAGE, STATUS_FAILED, STATUS_QUEUED,
};
use studionova_core::model::trimmed_non_empty;
use studionova_core::types::DbId;
use studionova_db::models::asset::NewAsset;
use studionova_db::models::generation_job::{GenerationJob, NewGenerationJob};
use studionova_worker::messages::GenerationRequest;
use studionova_worker::WorkerApiError;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, LenientJson};
use crate::handlers::models::load_model;
use crate::state::AppState;

/// Request body for `POST /api/generate/image`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageBody {
    /// Numeric id, as a number or a numeric string.
    pub model_id: Option<serde_json::Value>,
    pub prompt: Option<String>,
    pub negative_prompt: Option<String>,
    #[serde(flatten)]
    pub sampler: SamplerOverrides,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResult {
    pub job_id: String,
    pub status: String,
    pub image_path: Option<String>,
    pub asset_id: Option<DbId>,
    pub generation_job_id: DbId,
}

/// Request body for `POST /api/models/{id}/generate`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePreviewsBody {
    pub prompt: Option<String>,
    pub negative_prompt: Option<String>,
    #[serde(flatten)]
    pub sampler: SamplerOverrides,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewView {
    pub id: String,
    pub image_path: String,
    pub preview_url: String,
    pub is_mock: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePreviewsResult {
    pub previews: Vec<PreviewView>,
    pub status: String,
    pub generation_job_id: DbId,
}

/// Accept `modelId` as a JSON number or a numeric string.
fn parse_model_id(value: Option<&serde_json::Value>) -> AppResult<DbId> {
    let id = match value {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
            s.trim().parse::<DbId>().ok()
        }
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "modelId is required.".to_string(),
            )))
        }
    };
    id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "modelId must be numeric.".to_string(),
        ))
    })
}

fn require_prompt(prompt: Option<&str>) -> AppResult<String> {
    trimmed_non_empty(prompt)
        .ok_or_else(|| AppError::Core(CoreError::Validation("prompt is required.".to_string())))
}

/// URL the dashboard loads a worker-written image from.
pub fn preview_url(image_path: &str) -> String {
    format!("/api/assets/file?path={}", urlencoding::encode(image_path))
}

/// Record a failed job for a worker error, then hand the error back.
async fn record_worker_failure(
    state: &AppState,
    job: NewGenerationJob,
    err: WorkerApiError,
) -> AppError {
    if let Err(record_err) = state.store.record_generation(None, &job).await {
        tracing::error!(
            model_id = job.model_id,
            error = %record_err,
            "Failed to record failed generation job"
        );
    }
    tracing::warn!(model_id = job.model_id, error = %err, "Generation failed at worker");
    AppError::Worker(err)
}

/// POST /api/generate/image
pub async fn generate_image(
    State(state): State<AppState>,
    LenientJson(body): LenientJson<GenerateImageBody>,
) -> AppResult<Json<GenerateImageResult>> {
    let model_id = parse_model_id(body.model_id.as_ref())?;
    let prompt = require_prompt(body.prompt.as_deref())?;
    let negative_prompt = body
        .negative_prompt
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let model = load_model(&state, model_id).await?;

    let params = body.sampler.resolve();
    let request = GenerationRequest::new(
        model.id,
        prompt.clone(),
        negative_prompt.clone(),
        model.lora_path.clone(),
        &params,
    );

    let mut job = NewGenerationJob {
        user_id: state.owner_id,
        model_id: model.id,
        kind: KIND_IMAGE.to_string(),
        prompt,
        negative_prompt: Some(negative_prompt),
        settings_json: params.settings_json(),
        status: STATUS_FAILED.to_string(),
    };

    let response = match state.worker.generate_image(&request).await {
        Ok(response) => response,
        Err(err) => return Err(record_worker_failure(&state, job, err).await),
    };

    let status = response
        .status
        .clone()
        .unwrap_or_else(|| STATUS_QUEUED.to_string());
    let image_path = trimmed_non_empty(response.image_path.as_deref());
    let asset = image_path.as_ref().map(|path| NewAsset {
        user_id: state.owner_id,
        model_id: model.id,
        kind: KIND_IMAGE.to_string(),
        file_path: path.clone(),
        width: None,
        height: None,
    });

    job.status = status.clone();
    let recorded = state.store.record_generation(asset.as_ref(), &job).await?;
    let asset_id = recorded.asset.as_ref().map(|a| a.id);

    tracing::info!(
        model_id = model.id,
        job_id = %response.job_id,
        %status,
        asset_id = ?asset_id,
        "Image generation recorded"
    );

    Ok(Json(GenerateImageResult {
        job_id: response.job_id,
        status,
        image_path,
        asset_id,
        generation_job_id: recorded.job.id,
    }))
}

/// POST /api/models/{id}/generate
///
/// Previews are ephemeral worker files; no assets are created. The job is
/// `completed` when at least one preview came back, `failed` otherwise.
pub async fn generate_previews(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    LenientJson(body): LenientJson<GeneratePreviewsBody>,
) -> AppResult<Json<GeneratePreviewsResult>> {
    let prompt = require_prompt(body.prompt.as_deref())?;
    let negative_prompt = body
        .negative_prompt
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let model = load_model(&state, id).await?;

    let params = body.sampler.resolve_preview();
    let request = GenerationRequest::new(
        model.id,
        prompt.clone(),
        negative_prompt.clone(),
        model.lora_path.clone(),
        &params,
    );

    let mut job = NewGenerationJob {
        user_id: state.owner_id,
        model_id: model.id,
        kind: KIND_IMAGE.to_string(),
        prompt,
        negative_prompt: Some(negative_prompt),
        settings_json: params.preview_settings_json(),
        status: STATUS_FAILED.to_string(),
    };

    let response = match state.worker.generate_previews(&request).await {
        Ok(response) => response,
        Err(err) => return Err(record_worker_failure(&state, job, err).await),
    };

    let previews: Vec<PreviewView> = response
        .previews
        .into_iter()
        .map(|preview| PreviewView {
            preview_url: preview_url(&preview.image_path),
            id: preview.id,
            image_path: preview.image_path,
            is_mock: preview.is_mock,
        })
        .collect();

    job.status = preview_status(previews.len()).to_string();
    let recorded = state.store.record_generation(None, &job).await?;

    tracing::info!(
        model_id = model.id,
        count = previews.len(),
        status = %job.status,
        "Preview generation recorded"
    );

    Ok(Json(GeneratePreviewsResult {
        previews,
        status: job.status,
        generation_job_id: recorded.job.id,
    }))
}

/// GET /api/models/{id}/generation-jobs
pub async fn list_generation_jobs(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<Vec<GenerationJob>>> {
    load_model(&state, id).await?;
    let jobs = state.store.list_generation_jobs(id).await?;
    Ok(Json(jobs))
}
