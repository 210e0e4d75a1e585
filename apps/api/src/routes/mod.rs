pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::learning_path::handlers::handle_learning_path;
use crate::resume::handlers::handle_upload_resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/resume/upload", post(handle_upload_resume))
        .route("/learning-path", post(handle_learning_path))
        .route("/learning-path/", post(handle_learning_path))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
