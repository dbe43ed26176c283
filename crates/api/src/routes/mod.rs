pub mod assets;
pub mod generation;
pub mod health;
pub mod jobs;
pub mod models;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /models                                list, create
/// /models/{id}                           get
/// /models/{id}/train-lora                queue LoRA training (POST)
/// /models/{id}/training-jobs             recorded training jobs
/// /models/{id}/generate                  preview generation (POST)
/// /models/{id}/generation-jobs           recorded generation jobs
/// /models/{id}/dataset/add               add image to dataset (POST)
///
/// /generate/image                        one-shot image generation (POST)
///
/// /assets                                list (?model_id=)
/// /assets/file                           serve a storage file (?path=)
/// /assets/{id}/upscale                   upscale (POST)
///
/// /jobs/{id}                             worker job status
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/models", models::router())
        .nest("/generate", generation::router())
        .nest("/assets", assets::router())
        .nest("/jobs", jobs::router())
}
