//! HTTP routes for the evidence graph.

mod api;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

/// Create the main router with all routes.
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/graph", get(api::get_graph))
        .route("/search", get(api::search_nodes))
        .route("/node/:id", get(api::get_node))
        .route("/api/subgraph", get(api::get_subgraph))
        .route("/api/neighbors/:id", get(api::get_neighbors))
        .route("/api/recommend", post(api::recommend_foods))
        .route("/api/stats", get(api::get_stats))
        .route("/api/groups", get(api::get_groups))
        .route("/api/papers", get(api::get_papers))
        .route("/api/foods/:id/evidence", get(api::get_food_evidence))
        .route("/api/biomarkers/quick", get(api::get_quick_biomarkers))
        .route("/api/biomarkers/:id/evidence", get(api::get_biomarker_evidence))
        .layer(cors)
        .with_state(state)
}
