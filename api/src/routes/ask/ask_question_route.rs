//! POST /api/ask: answers one question about the school.

use std::sync::Arc;

use answer_pipeline::ConversationContext;
use axum::{Json, extract::State};
use tracing::{info, instrument};

use crate::{
    core::{app_state::AppState, json_body::JsonBody},
    error_handler::{AppError, AppResult},
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /api/ask
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:5000/api/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"Who is the principal?","chat_text":"User: hi\nKENVI: Hello!"}'
/// ```
#[instrument(name = "ask_question_route", skip_all)]
pub async fn ask_question_route(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<AskRequest>,
) -> AppResult<Json<AskResponse>> {
    let question = body.question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest("Empty question".into()));
    }

    let context = ConversationContext::new(body.chat_text);
    info!(
        user_id = body.user_id.as_deref().unwrap_or("default"),
        question,
        context_lines = context.lines(),
        history_items = body
            .conversation_history
            .as_ref()
            .and_then(|h| h.as_array())
            .map_or(0, Vec::len),
        remember = body.remember.unwrap_or(false),
        "question received"
    );

    let answer = state.pipeline.answer(question, &context).await?;
    info!(source = ?answer.source, "answer ready");

    Ok(Json(AskResponse {
        answer: answer.text,
    }))
}
