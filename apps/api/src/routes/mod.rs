pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::grading::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Grading API
        .route("/api/v1/rubric", get(handlers::handle_get_rubric))
        .route("/api/v1/grade", post(handlers::handle_grade))
        .with_state(state)
}
