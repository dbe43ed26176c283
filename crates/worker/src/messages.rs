//! Request and response bodies for the worker's JSON API.
//!
//! Field names match the worker's snake_case contract. Optional response
//! fields are `Option`s; callers decide what an absent field means.

use serde::{Deserialize, Serialize};
use studionova_core::generation::SamplerParams;
use studionova_core::types::DbId;

/// Upscaler used when the client does not pick one.
pub const DEFAULT_UPSCALE_MODEL: &str = "4x-UltraSharp.pth";
/// `0` lets the worker process the image untiled.
pub const DEFAULT_TILE_SIZE: i32 = 0;
pub const DEFAULT_UPSCALE_FACTOR: f64 = 2.0;
/// Source tag for images added to a dataset.
pub const DEFAULT_DATASET_SOURCE: &str = "comfyui";

// ---------------------------------------------------------------------------
// Training
// ---------------------------------------------------------------------------

/// `POST /api/train-lora`
///
/// The model id is sent under both `model_id` and `character_id` so either
/// generation of the worker accepts it. Unset hyperparameters are omitted so
/// the worker's own defaults apply.
#[derive(Debug, Clone, Serialize)]
pub struct TrainLoraRequest {
    pub model_id: String,
    pub character_id: String,
    pub dataset_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_dim: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_train_steps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_args: Option<Vec<String>>,
}

impl TrainLoraRequest {
    /// Request with no hyperparameter overrides. `dataset_path` must already
    /// be resolved by the caller.
    pub fn new(model_id: DbId, dataset_path: impl Into<String>) -> Self {
        Self {
            model_id: model_id.to_string(),
            character_id: model_id.to_string(),
            dataset_path: dataset_path.into(),
            base_model: None,
            output_dir: None,
            output_name: None,
            network_dim: None,
            max_train_steps: None,
            learning_rate: None,
            additional_args: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainLoraResponse {
    pub job_id: String,
    pub status: String,
    pub output_dir: Option<String>,
    pub output_weight: Option<String>,
    pub log_path: Option<String>,
    /// Launch command as reported by the worker (string or argv list).
    pub command: Option<serde_json::Value>,
    pub message: Option<String>,
}

impl TrainLoraResponse {
    /// The produced artifact: the weight file if reported, else the output
    /// directory.
    pub fn output_path(&self) -> Option<&str> {
        self.output_weight
            .as_deref()
            .or(self.output_dir.as_deref())
            .filter(|p| !p.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Body shared by `POST /api/generate-image` and `POST /api/generate/comfy`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub model_id: String,
    pub character_id: String,
    pub prompt: String,
    pub negative_prompt: String,
    pub lora_path: Option<String>,
    pub cfg_scale: f64,
    pub steps: i32,
    pub seed: Option<i64>,
    pub sampler: String,
    pub scheduler: String,
    pub width: i32,
    pub height: i32,
    pub base_model: Option<String>,
}

impl GenerationRequest {
    pub fn new(
        model_id: DbId,
        prompt: impl Into<String>,
        negative_prompt: impl Into<String>,
        lora_path: Option<String>,
        params: &SamplerParams,
    ) -> Self {
        Self {
            model_id: model_id.to_string(),
            character_id: model_id.to_string(),
            prompt: prompt.into(),
            negative_prompt: negative_prompt.into(),
            lora_path,
            cfg_scale: params.cfg_scale,
            steps: params.steps,
            seed: params.seed,
            sampler: params.sampler.clone(),
            scheduler: params.scheduler.clone(),
            width: params.width,
            height: params.height,
            base_model: params.base_model.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateImageResponse {
    pub job_id: String,
    pub status: Option<String>,
    pub image_path: Option<String>,
    pub asset_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Preview {
    pub id: String,
    pub image_path: String,
    #[serde(default)]
    pub is_mock: bool,
}

/// An empty `previews` list is a valid response.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewResponse {
    #[serde(default)]
    pub previews: Vec<Preview>,
}

// ---------------------------------------------------------------------------
// Upscale
// ---------------------------------------------------------------------------

/// `POST /api/upscale`
#[derive(Debug, Clone, Serialize)]
pub struct UpscaleRequest {
    pub asset_id: String,
    pub image_path: String,
    pub model_name: String,
    pub tile_size: i32,
    pub upscale_factor: f64,
}

impl UpscaleRequest {
    pub fn new(
        asset_id: DbId,
        image_path: impl Into<String>,
        model_name: Option<String>,
        tile_size: Option<i32>,
        upscale_factor: Option<f64>,
    ) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            image_path: image_path.into(),
            model_name: model_name.unwrap_or_else(|| DEFAULT_UPSCALE_MODEL.to_string()),
            tile_size: tile_size.unwrap_or(DEFAULT_TILE_SIZE),
            upscale_factor: upscale_factor.unwrap_or(DEFAULT_UPSCALE_FACTOR),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpscaleResponse {
    pub job_id: String,
    pub status: String,
    pub image_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Datasets
// ---------------------------------------------------------------------------

/// `POST /api/models/{id}/dataset/add`. Supply either `image_path` (a file
/// the worker can read) or `image_data` (base64).
#[derive(Debug, Clone, Serialize)]
pub struct DatasetAddRequest {
    pub model_id: String,
    pub dataset_path: String,
    pub image_path: Option<String>,
    pub image_data: Option<String>,
    pub source: String,
}

impl DatasetAddRequest {
    pub fn new(
        model_id: DbId,
        dataset_path: impl Into<String>,
        image_path: Option<String>,
        image_data: Option<String>,
        source: Option<String>,
    ) -> Self {
        Self {
            model_id: model_id.to_string(),
            dataset_path: dataset_path.into(),
            image_path,
            image_data,
            source: source.unwrap_or_else(|| DEFAULT_DATASET_SOURCE.to_string()),
        }
    }
}

/// Relayed to the dashboard as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetAddResponse {
    pub status: String,
    pub dataset_path: String,
    pub file_name: String,
    pub count: u64,
}
