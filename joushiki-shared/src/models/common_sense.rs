/// Common-sense fact model and database operations
///
/// A fact carries a short title, its body text, an optional ordered list
/// of genre tags, and a `level` weight used by the user-level
/// aggregation. Facts are immutable after creation: there are no update
/// or delete operations.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE common_sense (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     content TEXT NOT NULL,
///     genres TEXT[],
///     level INTEGER NOT NULL DEFAULT 0 CHECK (level >= 0)
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A common-sense fact
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommonSense {
    /// Unique fact ID
    pub id: i64,

    /// Short title shown in lists
    pub title: String,

    /// Full fact text
    pub content: String,

    /// Genre tags, in authoring order (None when untagged)
    pub genres: Option<Vec<String>>,

    /// Level weight; sums into a user's level when recognized
    pub level: i32,
}

/// Input for creating a new fact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommonSense {
    pub title: String,
    pub content: String,
    pub genres: Option<Vec<String>>,
    pub level: i32,
}

impl CommonSense {
    /// Creates a new fact and returns it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn create(pool: &PgPool, data: CreateCommonSense) -> Result<Self, sqlx::Error> {
        let fact = sqlx::query_as::<_, CommonSense>(
            r#"
            INSERT INTO common_sense (title, content, genres, level)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, genres, level
            "#,
        )
        .bind(data.title)
        .bind(data.content)
        .bind(data.genres)
        .bind(data.level)
        .fetch_one(pool)
        .await?;

        Ok(fact)
    }

    /// Finds a fact by ID, returning None when absent.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let fact = sqlx::query_as::<_, CommonSense>(
            r#"
            SELECT id, title, content, genres, level
            FROM common_sense
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(fact)
    }

    /// Lists facts with offset/limit pagination, ordered by ID so pages
    /// are stable across requests.
    pub async fn list(pool: &PgPool, skip: i64, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        let facts = sqlx::query_as::<_, CommonSense>(
            r#"
            SELECT id, title, content, genres, level
            FROM common_sense
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await?;

        Ok(facts)
    }
}
