/// Vote endpoints
///
/// # Endpoints
///
/// - `POST /vote/` - Submit (upsert) a vote
/// - `GET /vote/check?user_id&common_sense_id` - Vote for one pair
/// - `GET /vote/stats/:common_sense_id` - Known/unknown counts
/// - `GET /vote/user/:user_id` - Facts the user voted on
/// - `GET /vote/user/details/:user_id` - Votes with fact text

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use joushiki_shared::models::{
    common_sense::CommonSense,
    vote::{CreateVote, UserVoteDetail, Vote, VoteStats},
};
use serde::Deserialize;

/// Submits a vote: insert on first submission for the (user, fact)
/// pair, overwrite `recognized` on resubmission.
///
/// The whole write is one atomic upsert, so concurrent submissions for
/// the same pair cannot produce a duplicate row.
///
/// # Endpoint
///
/// ```text
/// POST /vote/
/// Content-Type: application/json
///
/// { "user_id": 1, "common_sense_id": 42, "recognized": true }
/// ```
///
/// # Errors
///
/// - `500 Internal Server Error`: storage failure, including votes
///   referencing a missing user or fact (foreign key violation)
pub async fn submit_vote(
    State(state): State<AppState>,
    Json(req): Json<CreateVote>,
) -> ApiResult<(StatusCode, Json<Vote>)> {
    let vote = Vote::upsert(&state.db, req).await.map_err(|e| {
        // The upsert key conflict never reaches here; anything that
        // does is a real storage failure
        ApiError::InternalError(format!("Failed to save vote: {}", e))
    })?;

    Ok((StatusCode::CREATED, Json(vote)))
}

/// Query parameters identifying one (user, fact) pair
#[derive(Debug, Deserialize)]
pub struct CheckParams {
    pub user_id: i64,
    pub common_sense_id: i64,
}

/// Returns the vote for one (user, fact) pair, or 404 when the user
/// has not voted on that fact.
///
/// # Endpoint
///
/// ```text
/// GET /vote/check?user_id=1&common_sense_id=42
/// ```
pub async fn check_vote(
    State(state): State<AppState>,
    Query(params): Query<CheckParams>,
) -> ApiResult<Json<Vote>> {
    let vote = Vote::find_by_pair(&state.db, params.user_id, params.common_sense_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Vote not found".to_string()))?;

    Ok(Json(vote))
}

/// Returns known/unknown vote counts for a fact.
///
/// No existence check: an unvoted or unknown fact yields both counts 0.
///
/// # Endpoint
///
/// ```text
/// GET /vote/stats/:common_sense_id
/// ```
///
/// # Response
///
/// ```json
/// { "common_sense_id": 42, "known": 10, "unknown": 3 }
/// ```
pub async fn vote_stats(
    State(state): State<AppState>,
    Path(common_sense_id): Path<i64>,
) -> ApiResult<Json<VoteStats>> {
    let stats = Vote::stats(&state.db, common_sense_id).await?;
    Ok(Json(stats))
}

/// Lists the facts a user has voted on, any recognized value.
///
/// # Endpoint
///
/// ```text
/// GET /vote/user/:user_id
/// ```
pub async fn user_votes(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<CommonSense>>> {
    let facts = Vote::facts_for_user(&state.db, user_id).await?;
    Ok(Json(facts))
}

/// Lists a user's votes enriched with fact title and content.
///
/// # Endpoint
///
/// ```text
/// GET /vote/user/details/:user_id
/// ```
pub async fn user_vote_details(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<UserVoteDetail>>> {
    let details = Vote::details_for_user(&state.db, user_id).await?;
    Ok(Json(details))
}
