//! Training job entity and insert DTO.

use serde::Serialize;
use sqlx::FromRow;
use studionova_core::types::{DbId, Timestamp};

/// A row from the `training_jobs` table.
///
/// `status` is whatever the worker reported when the job was submitted; the
/// row is not updated afterwards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingJob {
    pub id: DbId,
    pub user_id: DbId,
    pub model_id: DbId,
    pub status: String,
    pub dataset_path: String,
    pub lora_output_path: Option<String>,
    pub log_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields for a new training job row.
#[derive(Debug, Clone)]
pub struct NewTrainingJob {
    pub user_id: DbId,
    pub model_id: DbId,
    pub status: String,
    pub dataset_path: String,
    pub lora_output_path: Option<String>,
    pub log_path: Option<String>,
}
