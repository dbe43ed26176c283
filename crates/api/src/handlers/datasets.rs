//! Add an image to a model's training dataset via the worker.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use studionova_core::model::trimmed_non_empty;
use studionova_core::types::DbId;
use studionova_worker::messages::{DatasetAddRequest, DatasetAddResponse};

use crate::error::AppResult;
use crate::extract::{ApiPath, LenientJson};
use crate::handlers::models::{derived_dataset_path, load_model};
use crate::state::AppState;

/// Body limit for dataset uploads; base64 `imageData` of a full-size image
/// exceeds axum's 2 MB default.
pub const DATASET_ADD_BODY_LIMIT: usize = 32 * 1024 * 1024;

/// Request body for `POST /api/models/{id}/dataset/add`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetAddBody {
    /// Defaults to the model's derived dataset path.
    pub dataset_path: Option<String>,
    pub image_path: Option<String>,
    /// Base64 image payload, used when there is no worker-side path.
    pub image_data: Option<String>,
    pub source: Option<String>,
}

/// POST /api/models/{id}/dataset/add
///
/// Nothing is persisted locally; the worker owns dataset folders.
pub async fn add_to_dataset(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    LenientJson(body): LenientJson<DatasetAddBody>,
) -> AppResult<Json<DatasetAddResponse>> {
    let model = load_model(&state, id).await?;
    let dataset_path = trimmed_non_empty(body.dataset_path.as_deref())
        .unwrap_or_else(|| derived_dataset_path(&state.config, &model));

    let request = DatasetAddRequest::new(
        model.id,
        dataset_path,
        trimmed_non_empty(body.image_path.as_deref()),
        trimmed_non_empty(body.image_data.as_deref()),
        trimmed_non_empty(body.source.as_deref()),
    );
    let response = state.worker.add_dataset_image(&request).await?;

    tracing::info!(
        model_id = id,
        dataset_path = %response.dataset_path,
        file_name = %response.file_name,
        count = response.count,
        "Image added to dataset"
    );

    Ok(Json(response))
}
