/// Database models for joushiki
///
/// This module contains all database models and their query operations.
///
/// # Models
///
/// - `common_sense`: common-sense facts with genres and a level weight
/// - `user`: user accounts (hashed credentials only)
/// - `vote`: per-user known/unknown votes, one row per (user, fact)
///
/// # Example
///
/// ```no_run
/// use joushiki_shared::models::vote::{CreateVote, Vote};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let vote = Vote::upsert(
///     &pool,
///     CreateVote {
///         user_id: 1,
///         common_sense_id: 42,
///         recognized: true,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod common_sense;
pub mod user;
pub mod vote;
