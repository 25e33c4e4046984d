//! Health check handler.

use axum::response::IntoResponse;
use axum::Json;

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
