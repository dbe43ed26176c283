//! Repository for the `assets` table.

use sqlx::{PgConnection, PgPool};
use studionova_core::types::DbId;

use crate::models::asset::{Asset, AssetFilter, NewAsset};

/// Column list for `assets` queries.
const COLUMNS: &str = "\
    id, user_id, model_id, type, file_path, \
    width, height, is_upscaled, created_at";

/// Provides insert, lookup and upscale bookkeeping for assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Insert an asset on an open connection (usually a transaction).
    pub async fn create(conn: &mut PgConnection, input: &NewAsset) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (user_id, model_id, type, file_path, width, height, is_upscaled) \
             VALUES ($1, $2, $3, $4, $5, $6, FALSE) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(input.user_id)
            .bind(input.model_id)
            .bind(&input.kind)
            .bind(&input.file_path)
            .bind(input.width)
            .bind(input.height)
            .fetch_one(conn)
            .await
    }

    /// Find an asset by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List assets newest first, optionally restricted to one model.
    pub async fn list(pool: &PgPool, filter: &AssetFilter) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets \
             WHERE ($1::BIGINT IS NULL OR model_id = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(filter.model_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the asset's file with its upscaled version.
    ///
    /// Returns `None` if no asset with `id` exists.
    pub async fn mark_upscaled(
        pool: &PgPool,
        id: DbId,
        file_path: &str,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET file_path = $1, is_upscaled = TRUE \
             WHERE id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(file_path)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
