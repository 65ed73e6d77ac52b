/// Health check endpoint
///
/// Reports database reachability through the shared pool health check
/// and exposes the pool's current size/idle gauges, which is usually
/// enough to tell a dead database from an exhausted pool.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "pool_size": 3,
///   "idle_connections": 2
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use joushiki_shared::db::pool;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" when the database answers, "degraded" otherwise
    pub status: String,

    /// Application version
    pub version: String,

    /// "connected" or "disconnected"
    pub database: String,

    /// Total connections currently in the pool
    pub pool_size: u32,

    /// Idle connections available for the next request
    pub idle_connections: usize,
}

/// Returns service health including database connectivity and pool state.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_reachable = pool::health_check(&state.db).await.is_ok();

    Ok(Json(HealthResponse {
        status: if database_reachable {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database_reachable {
            "connected".to_string()
        } else {
            "disconnected".to_string()
        },
        pool_size: state.db.size(),
        idle_connections: state.db.num_idle(),
    }))
}
