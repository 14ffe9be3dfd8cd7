//! POST /chat — answers a question from retrieved CV context.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::chat::chat_request::{ChatRequest, ChatResponse},
};

/// Handler: POST /chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/chat \
///   -H 'content-type: application/json' \
///   -d '{"question":"What did he do at Orange?"}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let answer = state.engine.answer_question(&body.question).await?;

    Ok(Json(ChatResponse {
        answer,
        source: "RAG-CV",
    }))
}
