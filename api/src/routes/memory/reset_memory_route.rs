//! POST /api/memory/reset
//!
//! History lives on the client, so there is nothing to clear here. The
//! endpoint exists for clients that call it and always succeeds.

use axum::Json;
use tracing::info;

use crate::{
    core::json_body::JsonBody,
    error_handler::AppError,
    routes::memory::reset_memory_request::{ResetMemoryRequest, ResetMemoryResponse},
};

pub async fn reset_memory_route(
    payload: Result<JsonBody<ResetMemoryRequest>, AppError>,
) -> Json<ResetMemoryResponse> {
    let body = payload.map(|JsonBody(b)| b).unwrap_or_default();
    info!(user_id = body.user_id.as_deref().unwrap_or("-"), "memory reset requested");

    Json(ResetMemoryResponse {
        status: "success",
        message: "Conversation history cleared",
        user_id: body.user_id,
    })
}
