//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::User;

const COLUMNS: &str = "id, email, created_at";

/// Provides lookup and seeding for users.
pub struct UserRepo;

impl UserRepo {
    /// Return the user with `email`, inserting it with an empty password hash
    /// if it does not exist yet.
    pub async fn ensure(pool: &PgPool, email: &str) -> Result<User, sqlx::Error> {
        // The no-op update makes RETURNING yield the row on conflict too.
        let query = format!(
            "INSERT INTO users (email, password_hash) VALUES ($1, '') \
             ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_one(pool)
            .await
    }
}
