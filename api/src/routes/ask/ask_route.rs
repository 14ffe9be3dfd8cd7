//! POST /ask — guarded question answering.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::ask::ask_request::{AskRequest, AskResponse, STATUS_BLOCKED, STATUS_SUCCESS},
};

/// Handler: POST /ask
///
/// Runs the relevance guardrail first; an off-topic question gets the
/// fixed refusal and `blocked_by_guardrail` without a model call.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/ask \
///   -H 'content-type: application/json' \
///   -d '{"text":"Which frontend frameworks has he used?"}'
/// ```
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> AppResult<Json<AskResponse>> {
    let guarded = state.engine.ask_guarded(&body.text).await?;

    Ok(Json(AskResponse {
        answer: guarded.answer,
        status: if guarded.passed {
            STATUS_SUCCESS
        } else {
            STATUS_BLOCKED
        },
        relevance_score: guarded.relevance_score,
    }))
}
