/// Startup schema creation
///
/// The schema is created at startup with idempotent
/// `CREATE TABLE IF NOT EXISTS` statements; there is no migration
/// tooling. Three tables:
///
/// ```sql
/// CREATE TABLE common_sense (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     content TEXT NOT NULL,
///     genres TEXT[],
///     level INTEGER NOT NULL DEFAULT 0 CHECK (level >= 0)
/// );
///
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     user_name TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE votes (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     common_sense_id BIGINT NOT NULL REFERENCES common_sense(id),
///     recognized BOOLEAN NOT NULL,
///     UNIQUE (user_id, common_sense_id)
/// );
/// ```
///
/// The composite unique constraint on `(user_id, common_sense_id)` is
/// what makes the vote upsert race-free: concurrent writers for the
/// same pair are serialized by `ON CONFLICT` on this key.

use sqlx::PgPool;
use tracing::info;

const CREATE_COMMON_SENSE: &str = r#"
CREATE TABLE IF NOT EXISTS common_sense (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    genres TEXT[],
    level INTEGER NOT NULL DEFAULT 0 CHECK (level >= 0)
)
"#;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    user_name TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_VOTES: &str = r#"
CREATE TABLE IF NOT EXISTS votes (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL REFERENCES users(id),
    common_sense_id BIGINT NOT NULL REFERENCES common_sense(id),
    recognized BOOLEAN NOT NULL,
    CONSTRAINT votes_user_common_sense_key UNIQUE (user_id, common_sense_id)
)
"#;

/// Creates all tables if they do not exist yet.
///
/// Safe to run on every startup. Statements run inside a single
/// transaction so a partially created schema never persists.
///
/// # Errors
///
/// Returns an error if any DDL statement fails or the connection is
/// lost mid-transaction.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring database schema exists");

    let mut tx = pool.begin().await?;

    sqlx::query(CREATE_COMMON_SENSE).execute(&mut *tx).await?;
    sqlx::query(CREATE_USERS).execute(&mut *tx).await?;
    sqlx::query(CREATE_VOTES).execute(&mut *tx).await?;

    tx.commit().await?;

    info!("Database schema is up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ddl_is_idempotent() {
        // Every statement must be safe to re-run at startup
        assert!(CREATE_COMMON_SENSE.contains("IF NOT EXISTS"));
        assert!(CREATE_USERS.contains("IF NOT EXISTS"));
        assert!(CREATE_VOTES.contains("IF NOT EXISTS"));
    }

    #[test]
    fn test_votes_have_composite_unique_key() {
        assert!(CREATE_VOTES.contains("UNIQUE (user_id, common_sense_id)"));
    }
}
