/// Common-sense fact endpoints
///
/// # Endpoints
///
/// - `GET /common_sense/?skip&limit` - List facts
/// - `GET /common_sense/:id` - Single fact

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use joushiki_shared::models::common_sense::CommonSense;
use serde::Deserialize;

/// Pagination query parameters for the fact listing
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Number of facts to skip
    #[serde(default)]
    pub skip: i64,

    /// Maximum number of facts to return
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// Lists facts with offset/limit pagination.
///
/// # Endpoint
///
/// ```text
/// GET /common_sense/?skip=0&limit=100
/// ```
pub async fn list_common_sense(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<CommonSense>>> {
    if params.skip < 0 || params.limit < 0 {
        return Err(ApiError::BadRequest(
            "skip and limit must be non-negative".to_string(),
        ));
    }

    let facts = CommonSense::list(&state.db, params.skip, params.limit).await?;
    Ok(Json(facts))
}

/// Returns a single fact, or 404 when absent.
///
/// # Endpoint
///
/// ```text
/// GET /common_sense/:id
/// ```
pub async fn get_common_sense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CommonSense>> {
    let fact = CommonSense::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Common sense {} not found", id)))?;

    Ok(Json(fact))
}
