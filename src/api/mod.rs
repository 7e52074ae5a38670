use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::query_engine::QueryEngine;
use crate::suggestions::SuggestionGenerator;

pub mod handlers;
pub mod models;

/// Shared, read-only handles the handlers search with.
#[derive(Clone)]
pub struct AppState {
    pub query_engine: Arc<QueryEngine>,
    pub suggestions: SuggestionGenerator,
}

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/search", post(handlers::search_handler))
        .route("/api/suggestions", get(handlers::suggestions_handler))
        .route("/api/filters", get(handlers::filters_handler))
        .with_state(state)
        .layer(cors)
}
