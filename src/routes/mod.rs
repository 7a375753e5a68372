use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};
use crate::state::AppState;

pub mod collections;
pub mod sessions;
pub mod titles;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(sessions::create))
        .route("/sessions/:session_id/genres", put(sessions::submit_genres))
        .route("/sessions/:session_id/next", post(sessions::next_candidate))
        .route("/sessions/:session_id/votes", post(sessions::vote))
        .route("/sessions/:session_id/matches", get(sessions::matches))
        .route("/collections/:user_id/titles", post(collections::add_title))
        .route("/collections/:user_id", get(collections::get_collection))
        .route("/titles/search", get(titles::search))
        .route("/titles/by-genre", get(titles::by_genre))
        .route("/titles/by-actor", get(titles::by_actor))
        .route("/titles/random-movie", get(titles::random_movie))
        .route("/titles/random-series", get(titles::random_series))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
