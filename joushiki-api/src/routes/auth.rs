/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /auth/register` - Register a new user
/// - `POST /auth/login` - Verify credentials
/// - `GET /auth/level/:user_id` - Derived user level
///
/// There are no tokens or sessions; login simply verifies the stored
/// Argon2id hash and returns the user.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use joushiki_shared::{
    auth::password,
    models::{
        user::{CreateUser, User},
        vote::{UserLevel, Vote},
    },
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username (unique, case-sensitive)
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub user_name: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub user_name: String,

    /// Password
    pub password: String,
}

/// User as returned to clients (no password hash)
#[derive(Debug, Serialize)]
pub struct UserOut {
    /// User ID
    pub id: i64,

    /// Username
    pub user_name: String,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
        }
    }
}

/// Registers a new user.
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// { "user_name": "taro", "password": "shinkansen8" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: username already taken
/// - `409 Conflict`: a concurrent registration won the unique constraint
/// - `422 Unprocessable Entity`: validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserOut>)> {
    req.validate()?;

    // Pre-check for a friendly message; the unique constraint is the
    // real guard against a concurrent duplicate
    if User::find_by_user_name(&state.db, &req.user_name)
        .await?
        .is_some()
    {
        return Err(ApiError::BadRequest("Username already taken".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            user_name: req.user_name,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Registered new user");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Verifies credentials and returns the user.
///
/// Unknown username and wrong password produce the same 401 response,
/// so the endpoint does not leak which usernames exist.
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// { "user_name": "taro", "password": "shinkansen8" }
/// ```
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<UserOut>> {
    req.validate()?;

    let user = User::find_by_user_name(&state.db, &req.user_name)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    Ok(Json(user.into()))
}

/// Returns a user's derived level.
///
/// Sums the `level` of every fact the user recognized; the level rises
/// by one per 10 points. An unknown user gets `{0, 0}`.
///
/// # Endpoint
///
/// ```text
/// GET /auth/level/:user_id
/// ```
///
/// # Response
///
/// ```json
/// { "level_sum": 12, "user_level": 1 }
/// ```
pub async fn user_level(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserLevel>> {
    let level = Vote::user_level(&state.db, user_id).await?;
    Ok(Json(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_rejects_short_password() {
        let req = RegisterRequest {
            user_name: "taro".to_string(),
            password: "short".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_empty_username() {
        let req = RegisterRequest {
            user_name: String::new(),
            password: "long-enough-password".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_user_out_hides_password_hash() {
        let user = User {
            id: 7,
            user_name: "taro".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: chrono::Utc::now(),
        };

        let out: UserOut = user.into();
        let json = serde_json::to_string(&out).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("taro"));
    }
}
