//! Repository for the `training_jobs` table.

use sqlx::PgPool;
use studionova_core::types::DbId;

use crate::models::training_job::{NewTrainingJob, TrainingJob};

const COLUMNS: &str = "id, user_id, model_id, status, dataset_path, lora_output_path, \
                       log_path, created_at, updated_at";

/// Provides insert and listing for training jobs.
pub struct TrainingJobRepo;

impl TrainingJobRepo {
    /// Insert a training job and, when `lora_path` is given, point the
    /// model's `lora_path` at it. Both writes share one transaction.
    pub async fn record(
        pool: &PgPool,
        input: &NewTrainingJob,
        lora_path: Option<&str>,
    ) -> Result<TrainingJob, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO training_jobs \
                (user_id, model_id, status, dataset_path, lora_output_path, log_path) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let job = sqlx::query_as::<_, TrainingJob>(&query)
            .bind(input.user_id)
            .bind(input.model_id)
            .bind(&input.status)
            .bind(&input.dataset_path)
            .bind(input.lora_output_path.as_deref())
            .bind(input.log_path.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        if let Some(path) = lora_path {
            sqlx::query("UPDATE models SET lora_path = $1 WHERE id = $2")
                .bind(path)
                .bind(input.model_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(job)
    }

    /// List training jobs for a model, newest first.
    pub async fn list_by_model(
        pool: &PgPool,
        model_id: DbId,
    ) -> Result<Vec<TrainingJob>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM training_jobs \
             WHERE model_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, TrainingJob>(&query)
            .bind(model_id)
            .fetch_all(pool)
            .await
    }
}
