//! Route definitions for the `/models` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{datasets, generation, models, training};
use crate::state::AppState;

/// Routes mounted at `/models`.
///
/// ```text
/// GET    /                        -> list_models
/// POST   /                        -> create_model
/// GET    /{id}                    -> get_model
/// POST   /{id}/train-lora         -> train_lora
/// GET    /{id}/training-jobs      -> list_training_jobs
/// POST   /{id}/generate           -> generate_previews
/// GET    /{id}/generation-jobs    -> list_generation_jobs
/// POST   /{id}/dataset/add        -> add_to_dataset (32 MiB body limit)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(models::list_models).post(models::create_model))
        .route("/{id}", get(models::get_model))
        .route("/{id}/train-lora", post(training::train_lora))
        .route("/{id}/training-jobs", get(training::list_training_jobs))
        .route("/{id}/generate", post(generation::generate_previews))
        .route("/{id}/generation-jobs", get(generation::list_generation_jobs))
        .route(
            "/{id}/dataset/add",
            post(datasets::add_to_dataset)
                .layer(DefaultBodyLimit::max(datasets::DATASET_ADD_BODY_LIMIT)),
        )
}
