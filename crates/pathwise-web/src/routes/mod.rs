//! HTTP routes for the learning path API.

pub mod api;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/api/health", get(api::health))
        .route("/api/get-learning-path", post(api::get_learning_path))
        .route("/api/topics", get(api::get_topics))
        .route("/api/search", post(api::search))
        // CORS for browser front-ends
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
