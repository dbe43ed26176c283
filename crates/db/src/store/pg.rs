use async_trait::async_trait;
use studionova_core::model::ModelFields;
use studionova_core::types::DbId;

use super::{StoreError, StudioStore};
use crate::models::asset::{Asset, AssetFilter, NewAsset};
use crate::models::generation_job::{GenerationJob, NewGenerationJob, RecordedGeneration};
use crate::models::model::Model;
use crate::models::training_job::{NewTrainingJob, TrainingJob};
use crate::models::user::User;
use crate::repositories::{AssetRepo, GenerationJobRepo, ModelRepo, TrainingJobRepo, UserRepo};
use crate::DbPool;

/// [`StudioStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl StudioStore for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn ensure_user(&self, email: &str) -> Result<User, StoreError> {
        Ok(UserRepo::ensure(&self.pool, email).await?)
    }

    async fn list_models(&self) -> Result<Vec<Model>, StoreError> {
        Ok(ModelRepo::list(&self.pool).await?)
    }

    async fn find_model(&self, id: DbId) -> Result<Option<Model>, StoreError> {
        Ok(ModelRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_model(&self, user_id: DbId, input: &ModelFields) -> Result<Model, StoreError> {
        Ok(ModelRepo::create(&self.pool, user_id, input).await?)
    }

    async fn record_training_job(
        &self,
        input: &NewTrainingJob,
        lora_path: Option<&str>,
    ) -> Result<TrainingJob, StoreError> {
        Ok(TrainingJobRepo::record(&self.pool, input, lora_path).await?)
    }

    async fn list_training_jobs(&self, model_id: DbId) -> Result<Vec<TrainingJob>, StoreError> {
        Ok(TrainingJobRepo::list_by_model(&self.pool, model_id).await?)
    }

    async fn record_generation(
        &self,
        asset: Option<&NewAsset>,
        job: &NewGenerationJob,
    ) -> Result<RecordedGeneration, StoreError> {
        Ok(GenerationJobRepo::record(&self.pool, asset, job).await?)
    }

    async fn list_generation_jobs(
        &self,
        model_id: DbId,
    ) -> Result<Vec<GenerationJob>, StoreError> {
        Ok(GenerationJobRepo::list_by_model(&self.pool, model_id).await?)
    }

    async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>, StoreError> {
        Ok(AssetRepo::list(&self.pool, filter).await?)
    }

    async fn find_asset(&self, id: DbId) -> Result<Option<Asset>, StoreError> {
        Ok(AssetRepo::find_by_id(&self.pool, id).await?)
    }

    async fn mark_asset_upscaled(
        &self,
        id: DbId,
        file_path: &str,
    ) -> Result<Option<Asset>, StoreError> {
        Ok(AssetRepo::mark_upscaled(&self.pool, id, file_path).await?)
    }
}
