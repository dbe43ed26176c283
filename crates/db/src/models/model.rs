//! Model (persona) entity.

use serde::Serialize;
use sqlx::FromRow;
use studionova_core::types::{DbId, Timestamp};

/// A row from the `models` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Model {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub token: String,
    pub description: Option<String>,
    /// Set only when a training job reports a produced weight file.
    pub lora_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
