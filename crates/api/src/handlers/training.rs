//! LoRA training: forward to the worker, then record what it reported.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use studionova_core::model::trimmed_non_empty;
use studionova_core::types::DbId;
use studionova_db::models::training_job::{NewTrainingJob, TrainingJob};
use studionova_worker::messages::TrainLoraRequest;

use crate::error::AppResult;
use crate::extract::{ApiPath, LenientJson};
use crate::handlers::models::{derived_dataset_path, load_model};
use crate::state::AppState;

const DEFAULT_TRAIN_MESSAGE: &str = "LoRA training job queued for model.";

/// Request body for `POST /api/models/{id}/train-lora`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainLoraBody {
    /// Overrides the model's derived dataset path.
    pub dataset_path: Option<String>,
    pub base_model: Option<String>,
    pub output_dir: Option<String>,
    pub output_name: Option<String>,
    pub network_dim: Option<i32>,
    pub max_train_steps: Option<i32>,
    pub learning_rate: Option<f64>,
    pub additional_args: Option<Vec<String>>,
}

/// Response for a queued training run.
#[derive(Debug, Serialize)]
pub struct TrainLoraResult {
    pub status: String,
    pub job_id: String,
    pub message: String,
    pub model_id: DbId,
    pub log_path: Option<String>,
    pub output_dir: Option<String>,
    pub output_weight: Option<String>,
    pub command: Option<serde_json::Value>,
    pub dataset_path: String,
    /// The recorded row; `None` when the model does not exist locally.
    pub training_job: Option<TrainingJob>,
}

/// POST /api/models/{id}/train-lora
///
/// Without `datasetPath` the model must exist so its dataset path can be
/// derived. With an explicit path the worker is called even for an unknown
/// model, but nothing is recorded locally.
pub async fn train_lora(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    LenientJson(body): LenientJson<TrainLoraBody>,
) -> AppResult<Json<TrainLoraResult>> {
    let (model, dataset_path) = match trimmed_non_empty(body.dataset_path.as_deref()) {
        Some(path) => (state.store.find_model(id).await?, path),
        None => {
            let model = load_model(&state, id).await?;
            let path = derived_dataset_path(&state.config, &model);
            (Some(model), path)
        }
    };

    let output_name = trimmed_non_empty(body.output_name.as_deref()).unwrap_or_else(|| {
        model
            .as_ref()
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.to_string())
    });

    let mut request = TrainLoraRequest::new(id, dataset_path.clone());
    request.base_model = trimmed_non_empty(body.base_model.as_deref());
    request.output_dir = trimmed_non_empty(body.output_dir.as_deref());
    request.output_name = Some(output_name);
    request.network_dim = body.network_dim;
    request.max_train_steps = body.max_train_steps;
    request.learning_rate = body.learning_rate;
    request.additional_args = body.additional_args;

    let response = state.worker.train_lora(&request).await?;
    let output_path = response.output_path().map(str::to_string);

    let training_job = match model {
        Some(_) => {
            let job = state
                .store
                .record_training_job(
                    &NewTrainingJob {
                        user_id: state.owner_id,
                        model_id: id,
                        status: response.status.clone(),
                        dataset_path: dataset_path.clone(),
                        lora_output_path: output_path.clone(),
                        log_path: response.log_path.clone(),
                    },
                    output_path.as_deref(),
                )
                .await?;
            Some(job)
        }
        None => {
            tracing::warn!(
                model_id = id,
                job_id = %response.job_id,
                "Training queued for unknown model, not recorded"
            );
            None
        }
    };

    tracing::info!(
        model_id = id,
        job_id = %response.job_id,
        status = %response.status,
        lora_path = ?output_path,
        "LoRA training submitted"
    );

    Ok(Json(TrainLoraResult {
        status: response.status,
        job_id: response.job_id,
        message: response
            .message
            .unwrap_or_else(|| DEFAULT_TRAIN_MESSAGE.to_string()),
        model_id: id,
        log_path: response.log_path,
        output_dir: response.output_dir,
        output_weight: response.output_weight,
        command: response.command,
        dataset_path,
        training_job,
    }))
}

/// GET /api/models/{id}/training-jobs
pub async fn list_training_jobs(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<Vec<TrainingJob>>> {
    load_model(&state, id).await?;
    let jobs = state.store.list_training_jobs(id).await?;
    Ok(Json(jobs))
}
