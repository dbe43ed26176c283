//! Handlers for the `/assets` resource.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use studionova_core::error::CoreError;
use studionova_core::model::trimmed_non_empty;
use studionova_core::types::DbId;
use studionova_db::models::asset::{Asset, AssetFilter};
use studionova_worker::messages::UpscaleRequest;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery, LenientJson};
use crate::state::AppState;

/// Optional upscaler settings; the worker client fills in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpscaleBody {
    pub model_name: Option<String>,
    pub tile_size: Option<i32>,
    pub upscale_factor: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpscaleResult {
    pub job_id: String,
    pub status: String,
    pub image_path: Option<String>,
    /// The asset after the call; unchanged when the worker returned no path.
    pub asset: Asset,
}

fn asset_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Asset", id })
}

/// GET /api/assets
pub async fn list_assets(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<AssetFilter>,
) -> AppResult<Json<Vec<Asset>>> {
    let assets = state.store.list_assets(&filter).await?;
    Ok(Json(assets))
}

/// POST /api/assets/{id}/upscale
///
/// Always calls the worker, including for assets already upscaled.
pub async fn upscale_asset(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    LenientJson(body): LenientJson<UpscaleBody>,
) -> AppResult<Json<UpscaleResult>> {
    let asset = state
        .store
        .find_asset(id)
        .await?
        .ok_or_else(|| asset_not_found(id))?;

    let request = UpscaleRequest::new(
        asset.id,
        asset.file_path.clone(),
        trimmed_non_empty(body.model_name.as_deref()),
        body.tile_size,
        body.upscale_factor,
    );
    let response = state.worker.upscale(&request).await?;

    let image_path = trimmed_non_empty(response.image_path.as_deref());
    let asset = match &image_path {
        Some(path) => state
            .store
            .mark_asset_upscaled(id, path)
            .await?
            .ok_or_else(|| asset_not_found(id))?,
        None => asset,
    };

    tracing::info!(
        asset_id = id,
        job_id = %response.job_id,
        status = %response.status,
        upscaled = image_path.is_some(),
        "Upscale completed"
    );

    Ok(Json(UpscaleResult {
        job_id: response.job_id,
        status: response.status,
        image_path,
        asset,
    }))
}
