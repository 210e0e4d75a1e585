use axum::Json;

use crate::learning_path::service::{generate_learning_path, LearningPathRequest, LearningPathResponse};

/// POST /learning-path
pub async fn handle_learning_path(Json(req): Json<LearningPathRequest>) -> Json<LearningPathResponse> {
    Json(generate_learning_path(&req))
}
