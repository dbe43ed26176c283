//! Asset entity, insert DTO and list filter.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studionova_core::types::{DbId, Timestamp};

/// A row from the `assets` table.
///
/// `file_path` is relative to the worker's storage root. Upscaling replaces
/// it in place and sets `is_upscaled`; the flag is never cleared.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub user_id: DbId,
    pub model_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub file_path: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub is_upscaled: bool,
    pub created_at: Timestamp,
}

/// Fields for a new asset row.
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub user_id: DbId,
    pub model_id: DbId,
    pub kind: String,
    pub file_path: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// Query parameters for listing assets (`?model_id=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetFilter {
    pub model_id: Option<DbId>,
}
