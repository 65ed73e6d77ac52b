/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with
/// all routes and middleware.
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                          # Health check
/// ├── /auth/
/// │   ├── POST /register               # Create user
/// │   ├── POST /login                  # Verify credentials
/// │   └── GET  /level/:user_id         # Derived user level
/// ├── /common_sense/
/// │   ├── GET  /                       # List facts (skip/limit)
/// │   └── GET  /:id                    # Single fact
/// └── /vote/
///     ├── POST /                       # Upsert a vote
///     ├── GET  /check                  # Vote for one (user, fact) pair
///     ├── GET  /stats/:common_sense_id # Known/unknown counts
///     ├── GET  /user/:user_id          # Facts the user voted on
///     └── GET  /user/details/:user_id  # Votes with fact text
/// ```
///
/// # Middleware Stack
///
/// 1. Request logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer, configured from environment)
///
/// Handlers are stateless; the pool inside `AppState` is the only
/// shared resource.

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/level/:user_id", get(routes::auth::user_level));

    let common_sense_routes = Router::new()
        .route("/", get(routes::common_sense::list_common_sense))
        .route("/:id", get(routes::common_sense::get_common_sense));

    let vote_routes = Router::new()
        .route("/", post(routes::votes::submit_vote))
        .route("/check", get(routes::votes::check_vote))
        .route("/stats/:common_sense_id", get(routes::votes::vote_stats))
        .route("/user/:user_id", get(routes::votes::user_votes))
        .route(
            "/user/details/:user_id",
            get(routes::votes::user_vote_details),
        );

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .nest("/common_sense", common_sense_routes)
        .nest("/vote", vote_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
