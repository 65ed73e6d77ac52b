/// Vote model, upsert, statistics and level aggregation
///
/// A vote records whether one user recognized one common-sense fact.
/// The `(user_id, common_sense_id)` pair is unique: the first
/// submission inserts a row and every later submission for the same
/// pair overwrites `recognized` in place. Votes are never deleted.
///
/// The write path is a single atomic `INSERT ... ON CONFLICT DO
/// UPDATE`, not a read-then-write sequence. Concurrent submissions for
/// the same pair are serialized by PostgreSQL on the unique key, so a
/// duplicate-row error can never escape to the caller and the final
/// value is the last committed one.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE votes (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     common_sense_id BIGINT NOT NULL REFERENCES common_sense(id),
///     recognized BOOLEAN NOT NULL,
///     UNIQUE (user_id, common_sense_id)
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::common_sense::CommonSense;

/// A user's vote on a single fact
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vote {
    /// Unique vote ID
    pub id: i64,

    /// Voting user
    pub user_id: i64,

    /// Fact being voted on
    pub common_sense_id: i64,

    /// true = "knew it", false = "didn't know it"
    pub recognized: bool,
}

/// Input for submitting a vote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVote {
    pub user_id: i64,
    pub common_sense_id: i64,
    pub recognized: bool,
}

/// Vote counts for one fact, split by recognized/unrecognized
///
/// `known + unknown` always equals the total number of votes for the
/// fact; both are 0 when nobody has voted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteStats {
    pub common_sense_id: i64,
    pub known: i64,
    pub unknown: i64,
}

/// Derived experience level for a user
///
/// `level_sum` is the sum of `level` over every fact the user voted
/// `recognized = true` on; `user_level` rises by one per 10 points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLevel {
    pub level_sum: i64,
    pub user_level: i64,
}

impl UserLevel {
    /// Points of summed fact level per user level
    const POINTS_PER_LEVEL: i64 = 10;

    /// Buckets a level sum into a user level with floor division.
    pub fn from_sum(level_sum: i64) -> Self {
        Self {
            level_sum,
            user_level: level_sum / Self::POINTS_PER_LEVEL,
        }
    }
}

/// One entry of a user's vote history, enriched with the fact text
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserVoteDetail {
    pub common_sense_id: i64,
    pub title: String,
    pub content: String,
    pub recognized: bool,
}

impl Vote {
    /// Inserts a vote, or overwrites `recognized` when the user already
    /// voted on this fact.
    ///
    /// One atomic conditional write; the unique key conflict is the
    /// expected update path, not an error. Returns the post-write row.
    ///
    /// # Errors
    ///
    /// Returns an error if `user_id` or `common_sense_id` does not
    /// reference an existing row (foreign key violation) or the write
    /// fails for any other reason. Nothing is partially applied.
    pub async fn upsert(pool: &PgPool, data: CreateVote) -> Result<Self, sqlx::Error> {
        let vote = sqlx::query_as::<_, Vote>(
            r#"
            INSERT INTO votes (user_id, common_sense_id, recognized)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, common_sense_id)
            DO UPDATE SET recognized = EXCLUDED.recognized
            RETURNING id, user_id, common_sense_id, recognized
            "#,
        )
        .bind(data.user_id)
        .bind(data.common_sense_id)
        .bind(data.recognized)
        .fetch_one(pool)
        .await?;

        Ok(vote)
    }

    /// Finds the vote for one (user, fact) pair, if any.
    pub async fn find_by_pair(
        pool: &PgPool,
        user_id: i64,
        common_sense_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let vote = sqlx::query_as::<_, Vote>(
            r#"
            SELECT id, user_id, common_sense_id, recognized
            FROM votes
            WHERE user_id = $1 AND common_sense_id = $2
            "#,
        )
        .bind(user_id)
        .bind(common_sense_id)
        .fetch_optional(pool)
        .await?;

        Ok(vote)
    }

    /// Counts a fact's votes split by recognized/unrecognized.
    ///
    /// Does not check that the fact exists; an unknown ID yields
    /// `{0, 0}`.
    pub async fn stats(pool: &PgPool, common_sense_id: i64) -> Result<VoteStats, sqlx::Error> {
        let (known, unknown): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE recognized),
                COUNT(*) FILTER (WHERE NOT recognized)
            FROM votes
            WHERE common_sense_id = $1
            "#,
        )
        .bind(common_sense_id)
        .fetch_one(pool)
        .await?;

        Ok(VoteStats {
            common_sense_id,
            known,
            unknown,
        })
    }

    /// Computes a user's derived level from their recognized votes.
    ///
    /// Sums `level` over facts the user voted `recognized = true` on.
    /// An unknown user (or one with no recognized votes) gets
    /// `{level_sum: 0, user_level: 0}` rather than an error; user
    /// existence is not validated here.
    pub async fn user_level(pool: &PgPool, user_id: i64) -> Result<UserLevel, sqlx::Error> {
        let (level_sum,): (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(cs.level), 0)::BIGINT
            FROM votes v
            JOIN common_sense cs ON cs.id = v.common_sense_id
            WHERE v.user_id = $1 AND v.recognized
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(UserLevel::from_sum(level_sum))
    }

    /// Lists the facts a user has voted on, any `recognized` value.
    ///
    /// No duplicates per (user, fact) pair — guaranteed by the unique
    /// index. Ordered by fact ID.
    pub async fn facts_for_user(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Vec<CommonSense>, sqlx::Error> {
        let facts = sqlx::query_as::<_, CommonSense>(
            r#"
            SELECT cs.id, cs.title, cs.content, cs.genres, cs.level
            FROM votes v
            JOIN common_sense cs ON cs.id = v.common_sense_id
            WHERE v.user_id = $1
            ORDER BY cs.id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(facts)
    }

    /// Lists a user's votes enriched with fact title and content.
    pub async fn details_for_user(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Vec<UserVoteDetail>, sqlx::Error> {
        let details = sqlx::query_as::<_, UserVoteDetail>(
            r#"
            SELECT cs.id AS common_sense_id, cs.title, cs.content, v.recognized
            FROM votes v
            JOIN common_sense cs ON cs.id = v.common_sense_id
            WHERE v.user_id = $1
            ORDER BY cs.id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(details)
    }
}
