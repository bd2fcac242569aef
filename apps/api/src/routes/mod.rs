pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::keywords::handlers as keyword_handlers;
use crate::optimization::handlers as optimization_handlers;
use crate::presentation::handlers as presentation_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/optimize",
            post(optimization_handlers::handle_optimize),
        )
        .route(
            "/api/v1/keywords/accept",
            post(keyword_handlers::handle_accept),
        )
        .route(
            "/api/v1/keywords/history",
            get(keyword_handlers::handle_get_history).delete(keyword_handlers::handle_clear_history),
        )
        .route(
            "/api/v1/images/download",
            post(presentation_handlers::handle_download_image),
        )
        .with_state(state)
}
