pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::paper::handlers as papers;
use crate::questions::handlers as questions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Questions API
        .route("/api/v1/questions/sample", get(questions::handle_sample))
        .route(
            "/api/v1/questions/generate",
            post(questions::handle_generate),
        )
        // Papers API
        .route("/api/v1/papers", post(papers::handle_render))
        .route("/api/v1/papers/layout", post(papers::handle_layout))
        .with_state(state)
}
