//! Repository for the `generation_jobs` table.

use sqlx::PgPool;
use studionova_core::types::DbId;

use crate::models::asset::NewAsset;
use crate::models::generation_job::{GenerationJob, NewGenerationJob, RecordedGeneration};
use crate::repositories::AssetRepo;

const COLUMNS: &str = "id, user_id, model_id, type, prompt, negative_prompt, settings_json, \
                       status, asset_id, created_at, updated_at";

/// Provides insert and listing for generation jobs.
pub struct GenerationJobRepo;

impl GenerationJobRepo {
    /// Insert the produced asset (if any) and then the job referencing it,
    /// in one transaction.
    pub async fn record(
        pool: &PgPool,
        asset: Option<&NewAsset>,
        input: &NewGenerationJob,
    ) -> Result<RecordedGeneration, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let asset = match asset {
            Some(new_asset) => Some(AssetRepo::create(&mut tx, new_asset).await?),
            None => None,
        };

        let query = format!(
            "INSERT INTO generation_jobs \
                (user_id, model_id, type, prompt, negative_prompt, settings_json, status, asset_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let job = sqlx::query_as::<_, GenerationJob>(&query)
            .bind(input.user_id)
            .bind(input.model_id)
            .bind(&input.kind)
            .bind(&input.prompt)
            .bind(input.negative_prompt.as_deref())
            .bind(&input.settings_json)
            .bind(&input.status)
            .bind(asset.as_ref().map(|a| a.id))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(RecordedGeneration { asset, job })
    }

    /// List generation jobs for a model, newest first.
    pub async fn list_by_model(
        pool: &PgPool,
        model_id: DbId,
    ) -> Result<Vec<GenerationJob>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generation_jobs \
             WHERE model_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, GenerationJob>(&query)
            .bind(model_id)
            .fetch_all(pool)
            .await
    }
}
