/// User model and database operations
///
/// Users are created once at registration and never mutated or deleted.
/// Only the Argon2id hash of the password is stored; the plaintext never
/// reaches the database.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     user_name TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User account
///
/// `user_name` is unique and case-sensitive.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// Unique, case-sensitive username
    pub user_name: String,

    /// Argon2id password hash (PHC string format)
    ///
    /// Never store plaintext passwords
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Username (must not already exist)
    pub user_name: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,
}

impl User {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the username already exists (unique
    /// constraint violation) or the database write fails.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_name, password_hash)
            VALUES ($1, $2)
            RETURNING id, user_name, password_hash, created_at
            "#,
        )
        .bind(data.user_name)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by username (exact, case-sensitive match).
    pub async fn find_by_user_name(
        pool: &PgPool,
        user_name: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, password_hash, created_at
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
