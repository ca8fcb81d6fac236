/*
 * Responsibility
 * - GET /health (liveness, not behind the gate)
 * - GET / (welcome message)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

pub async fn welcome() -> impl IntoResponse {
    Json(json!({"message": "Welcome to Choremonsta - the world's best chore organizer!"}))
}
