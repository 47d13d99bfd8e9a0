use axum::{Json, response::IntoResponse};
use http::StatusCode;
use serde::Serialize;

#[derive(Serialize)]
struct Status {
    status: &'static str,
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Root handler reporting that the service is up
pub async fn root_handler() -> impl IntoResponse {
    Json(Status { status: "running" })
}
