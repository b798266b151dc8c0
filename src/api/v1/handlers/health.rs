/*
 * Responsibility
 * - GET /health (疎通用)
 * - route gate を通さない。directory / identity provider には触れない
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
