use async_trait::async_trait;
use chrono::Utc;
use studionova_core::model::ModelFields;
use studionova_core::types::DbId;
use tokio::sync::Mutex;

use super::{StoreError, StudioStore};
use crate::models::asset::{Asset, AssetFilter, NewAsset};
use crate::models::generation_job::{GenerationJob, NewGenerationJob, RecordedGeneration};
use crate::models::model::Model;
use crate::models::training_job::{NewTrainingJob, TrainingJob};
use crate::models::user::User;

/// Per-table rows plus BIGSERIAL-style sequences.
#[derive(Default)]
struct Tables {
    users: Vec<User>,
    models: Vec<Model>,
    training_jobs: Vec<TrainingJob>,
    generation_jobs: Vec<GenerationJob>,
    assets: Vec<Asset>,
    user_seq: DbId,
    model_seq: DbId,
    training_job_seq: DbId,
    generation_job_seq: DbId,
    asset_seq: DbId,
}

fn next_id(seq: &mut DbId) -> DbId {
    *seq += 1;
    *seq
}

/// Sort rows newest first, breaking timestamp ties by descending id.
macro_rules! newest_first {
    ($rows:expr) => {{
        let mut rows = $rows;
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows
    }};
}

impl Tables {
    fn require_model(&self, id: DbId) -> Result<(), StoreError> {
        if self.models.iter().any(|m| m.id == id) {
            Ok(())
        } else {
            Err(StoreError::MissingParent { entity: "Model", id })
        }
    }

    fn require_user(&self, id: DbId) -> Result<(), StoreError> {
        if self.users.iter().any(|u| u.id == id) {
            Ok(())
        } else {
            Err(StoreError::MissingParent { entity: "User", id })
        }
    }
}

/// In-process [`StudioStore`] used when no `DATABASE_URL` is configured and
/// by the integration tests. Data lives only as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudioStore for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn ensure_user(&self, email: &str) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().await;
        if let Some(user) = tables.users.iter().find(|u| u.email == email) {
            return Ok(user.clone());
        }
        let user = User {
            id: next_id(&mut tables.user_seq),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn list_models(&self) -> Result<Vec<Model>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(newest_first!(tables.models.clone()))
    }

    async fn find_model(&self, id: DbId) -> Result<Option<Model>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.models.iter().find(|m| m.id == id).cloned())
    }

    async fn create_model(&self, user_id: DbId, input: &ModelFields) -> Result<Model, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.require_user(user_id)?;
        let now = Utc::now();
        let model = Model {
            id: next_id(&mut tables.model_seq),
            user_id,
            name: input.name.clone(),
            token: input.token.clone(),
            description: input.description.clone(),
            lora_path: None,
            created_at: now,
            updated_at: now,
        };
        tables.models.push(model.clone());
        Ok(model)
    }

    async fn record_training_job(
        &self,
        input: &NewTrainingJob,
        lora_path: Option<&str>,
    ) -> Result<TrainingJob, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.require_model(input.model_id)?;

        let now = Utc::now();
        let job = TrainingJob {
            id: next_id(&mut tables.training_job_seq),
            user_id: input.user_id,
            model_id: input.model_id,
            status: input.status.clone(),
            dataset_path: input.dataset_path.clone(),
            lora_output_path: input.lora_output_path.clone(),
            log_path: input.log_path.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.training_jobs.push(job.clone());

        if let Some(path) = lora_path {
            if let Some(model) = tables.models.iter_mut().find(|m| m.id == input.model_id) {
                model.lora_path = Some(path.to_string());
                model.updated_at = now;
            }
        }

        Ok(job)
    }

    async fn list_training_jobs(&self, model_id: DbId) -> Result<Vec<TrainingJob>, StoreError> {
        let tables = self.tables.lock().await;
        let rows: Vec<TrainingJob> = tables
            .training_jobs
            .iter()
            .filter(|j| j.model_id == model_id)
            .cloned()
            .collect();
        Ok(newest_first!(rows))
    }

    async fn record_generation(
        &self,
        asset: Option<&NewAsset>,
        job: &NewGenerationJob,
    ) -> Result<RecordedGeneration, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.require_model(job.model_id)?;
        if let Some(new_asset) = asset {
            tables.require_model(new_asset.model_id)?;
        }

        let now = Utc::now();
        let asset = asset.map(|new_asset| {
            let row = Asset {
                id: next_id(&mut tables.asset_seq),
                user_id: new_asset.user_id,
                model_id: new_asset.model_id,
                kind: new_asset.kind.clone(),
                file_path: new_asset.file_path.clone(),
                width: new_asset.width,
                height: new_asset.height,
                is_upscaled: false,
                created_at: now,
            };
            tables.assets.push(row.clone());
            row
        });

        let row = GenerationJob {
            id: next_id(&mut tables.generation_job_seq),
            user_id: job.user_id,
            model_id: job.model_id,
            kind: job.kind.clone(),
            prompt: job.prompt.clone(),
            negative_prompt: job.negative_prompt.clone(),
            settings_json: job.settings_json.clone(),
            status: job.status.clone(),
            asset_id: asset.as_ref().map(|a| a.id),
            created_at: now,
            updated_at: now,
        };
        tables.generation_jobs.push(row.clone());

        Ok(RecordedGeneration { asset, job: row })
    }

    async fn list_generation_jobs(
        &self,
        model_id: DbId,
    ) -> Result<Vec<GenerationJob>, StoreError> {
        let tables = self.tables.lock().await;
        let rows: Vec<GenerationJob> = tables
            .generation_jobs
            .iter()
            .filter(|j| j.model_id == model_id)
            .cloned()
            .collect();
        Ok(newest_first!(rows))
    }

    async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>, StoreError> {
        let tables = self.tables.lock().await;
        let rows: Vec<Asset> = tables
            .assets
            .iter()
            .filter(|a| filter.model_id.map_or(true, |id| a.model_id == id))
            .cloned()
            .collect();
        Ok(newest_first!(rows))
    }

    async fn find_asset(&self, id: DbId) -> Result<Option<Asset>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.assets.iter().find(|a| a.id == id).cloned())
    }

    async fn mark_asset_upscaled(
        &self,
        id: DbId,
        file_path: &str,
    ) -> Result<Option<Asset>, StoreError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.assets.iter_mut().find(|a| a.id == id).map(|asset| {
            asset.file_path = file_path.to_string();
            asset.is_upscaled = true;
            asset.clone()
        }))
    }
}
