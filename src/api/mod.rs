use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod models;

pub use models::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // One path segment per command, e.g. POST /wiki
        .route("/:command", post(handlers::command_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
