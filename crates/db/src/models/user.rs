//! User entity model.

use serde::Serialize;
use sqlx::FromRow;
use studionova_core::types::{DbId, Timestamp};

/// A row from the `users` table. The password hash is never selected.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub created_at: Timestamp,
}
