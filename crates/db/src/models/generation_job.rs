//! Generation job entity and insert DTO.

use serde::Serialize;
use sqlx::FromRow;
use studionova_core::types::{DbId, Timestamp};

use crate::models::asset::Asset;

/// A row from the `generation_jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GenerationJob {
    pub id: DbId,
    pub user_id: DbId,
    pub model_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub settings_json: serde_json::Value,
    pub status: String,
    pub asset_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields for a new generation job row. The asset reference is filled in by
/// the store when an asset is recorded alongside the job.
#[derive(Debug, Clone)]
pub struct NewGenerationJob {
    pub user_id: DbId,
    pub model_id: DbId,
    pub kind: String,
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub settings_json: serde_json::Value,
    pub status: String,
}

/// Result of recording a generation: the job plus the asset it produced,
/// if any.
#[derive(Debug, Clone)]
pub struct RecordedGeneration {
    pub asset: Option<Asset>,
    pub job: GenerationJob,
}
