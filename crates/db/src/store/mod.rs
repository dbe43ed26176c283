//! The store interface the HTTP layer depends on.
//!
//! Handlers never see SQL. They call [`StudioStore`] methods, which
//! [`PgStore`] forwards to the repositories and [`MemoryStore`] answers
//! from in-process tables.

mod memory;
mod pg;

use async_trait::async_trait;
use studionova_core::model::ModelFields;
use studionova_core::types::DbId;

pub use memory::MemoryStore;
pub use pg::PgStore;

use crate::models::asset::{Asset, AssetFilter, NewAsset};
use crate::models::generation_job::{GenerationJob, NewGenerationJob, RecordedGeneration};
use crate::models::model::Model;
use crate::models::training_job::{NewTrainingJob, TrainingJob};
use crate::models::user::User;

/// Errors produced by a [`StudioStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A referenced row does not exist.
    #[error("{entity} with id {id} does not exist")]
    MissingParent { entity: &'static str, id: DbId },
}

/// Persistence operations used by the route handlers.
///
/// Multi-row writes (`record_training_job`, `record_generation`) are atomic.
/// No method is ever called while a worker request is in flight.
#[async_trait]
pub trait StudioStore: Send + Sync {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;

    /// Return the user with `email`, creating it if needed.
    async fn ensure_user(&self, email: &str) -> Result<User, StoreError>;

    /// All models, newest first.
    async fn list_models(&self) -> Result<Vec<Model>, StoreError>;

    async fn find_model(&self, id: DbId) -> Result<Option<Model>, StoreError>;

    async fn create_model(&self, user_id: DbId, input: &ModelFields) -> Result<Model, StoreError>;

    /// Insert a training job; when `lora_path` is `Some`, also set the
    /// model's `lora_path`.
    async fn record_training_job(
        &self,
        input: &NewTrainingJob,
        lora_path: Option<&str>,
    ) -> Result<TrainingJob, StoreError>;

    async fn list_training_jobs(&self, model_id: DbId) -> Result<Vec<TrainingJob>, StoreError>;

    /// Insert `asset` (if any) and then `job` referencing it.
    async fn record_generation(
        &self,
        asset: Option<&NewAsset>,
        job: &NewGenerationJob,
    ) -> Result<RecordedGeneration, StoreError>;

    async fn list_generation_jobs(&self, model_id: DbId)
        -> Result<Vec<GenerationJob>, StoreError>;

    /// Assets newest first, optionally filtered by model.
    async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>, StoreError>;

    async fn find_asset(&self, id: DbId) -> Result<Option<Asset>, StoreError>;

    /// Replace the asset's file path and set `is_upscaled`. Returns `None`
    /// when the asset does not exist.
    async fn mark_asset_upscaled(
        &self,
        id: DbId,
        file_path: &str,
    ) -> Result<Option<Asset>, StoreError>;
}
