//! Handlers for the `/models` resource.
//!
//! Every model in a response is decorated with its slug, its default
//! dataset path, and the number of files currently in that dataset.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use studionova_core::dataset::{count_dataset_items, resolve_dataset_dir};
use studionova_core::error::CoreError;
use studionova_core::model::{default_dataset_path, model_slug, validate_model_fields};
use studionova_core::types::DbId;
use studionova_db::models::model::Model;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, LenientJson};
use crate::state::AppState;

/// A model row plus the values derived from its name and token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelView {
    #[serde(flatten)]
    pub model: Model,
    pub slug: String,
    pub dataset_path: String,
    pub dataset_count: usize,
}

impl ModelView {
    async fn build(config: &ServerConfig, model: Model) -> Self {
        let slug = model_slug(&model.name, &model.token);
        let dataset_path = default_dataset_path(&slug, &config.dataset_root);
        let dataset_count =
            count_dataset_items(&resolve_dataset_dir(&dataset_path, &config.dataset_base_dir))
                .await;
        Self {
            model,
            slug,
            dataset_path,
            dataset_count,
        }
    }
}

/// Request body for creating a model.
#[derive(Debug, Default, Deserialize)]
pub struct CreateModelBody {
    pub name: Option<String>,
    pub token: Option<String>,
    pub description: Option<String>,
}

/// Fetch a model or fail with 404.
pub(crate) async fn load_model(state: &AppState, id: DbId) -> AppResult<Model> {
    state
        .store
        .find_model(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Model",
            id,
        }))
}

/// The dataset path a model trains from when none is given explicitly.
pub(crate) fn derived_dataset_path(config: &ServerConfig, model: &Model) -> String {
    default_dataset_path(&model_slug(&model.name, &model.token), &config.dataset_root)
}

/// GET /api/models
pub async fn list_models(State(state): State<AppState>) -> AppResult<Json<Vec<ModelView>>> {
    let models = state.store.list_models().await?;
    let mut views = Vec::with_capacity(models.len());
    for model in models {
        views.push(ModelView::build(&state.config, model).await);
    }
    Ok(Json(views))
}

/// POST /api/models
pub async fn create_model(
    State(state): State<AppState>,
    LenientJson(body): LenientJson<CreateModelBody>,
) -> AppResult<(StatusCode, Json<ModelView>)> {
    let fields = validate_model_fields(
        body.name.as_deref(),
        body.token.as_deref(),
        body.description.as_deref(),
    )?;

    let model = state.store.create_model(state.owner_id, &fields).await?;
    tracing::info!(model_id = model.id, name = %model.name, "Model created");

    Ok((
        StatusCode::CREATED,
        Json(ModelView::build(&state.config, model).await),
    ))
}

/// GET /api/models/{id}
pub async fn get_model(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ModelView>> {
    let model = load_model(&state, id).await?;
    Ok(Json(ModelView::build(&state.config, model).await))
}
