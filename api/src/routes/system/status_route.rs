//! Liveness endpoints.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub timestamp: String,
}

/// GET /test
pub async fn test_route() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "server working",
        message: Some("Hello from KV Bolarum"),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// GET /api/status
pub async fn status_route() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running",
        message: None,
        timestamp: Utc::now().to_rfc3339(),
    })
}
