//! Repository for the `models` table.

use sqlx::PgPool;
use studionova_core::model::ModelFields;
use studionova_core::types::DbId;

use crate::models::model::Model;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, user_id, name, token, description, lora_path, created_at, updated_at";

/// Provides CRUD operations for models.
pub struct ModelRepo;

impl ModelRepo {
    /// Insert a new model owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &ModelFields,
    ) -> Result<Model, sqlx::Error> {
        let query = format!(
            "INSERT INTO models (user_id, name, token, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Model>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.token)
            .bind(input.description.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Find a model by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Model>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM models WHERE id = $1");
        sqlx::query_as::<_, Model>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all models, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Model>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM models ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Model>(&query).fetch_all(pool).await
    }
}
