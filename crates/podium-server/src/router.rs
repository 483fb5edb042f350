use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all Podium endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/all", get(handler::list_all))
        .route("/recent", get(handler::list_recent))
        .route("/top", get(handler::list_top))
        .route("/add", post(handler::add))
        .route("/vote", post(handler::vote))
        .route("/similar", get(handler::similar))
        .route("/sentiment", get(handler::sentiment))
        .route("/health", get(handler::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
