//! Offer analysis endpoints: /analyze, /analyze-offer, /match-report.

use std::sync::Arc;

use axum::{Json, extract::State};
use qa_engine::MatchReport;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::analyze::offer_request::{AnalyzeOfferResponse, MatchReportResponse, OfferRequest},
};

/// Handler: POST /analyze
///
/// Full two-stage analysis; CV context is retrieved with the raw offer
/// text. Returns the structured report directly.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(body): Json<OfferRequest>,
) -> AppResult<Json<MatchReport>> {
    let report = state.engine.analyze(&body.text).await?;
    Ok(Json(report))
}

/// Handler: POST /analyze-offer
///
/// First stage only: extracts the skill list from the offer.
pub async fn analyze_offer(
    State(state): State<Arc<AppState>>,
    Json(body): Json<OfferRequest>,
) -> AppResult<Json<AnalyzeOfferResponse>> {
    let extracted_skills = state.engine.extract_skills(&body.text).await?;
    Ok(Json(AnalyzeOfferResponse {
        status: "success",
        extracted_skills,
    }))
}

/// Handler: POST /match-report
///
/// Full analysis with context retrieved by the extracted skills; the
/// report is returned serialized under `analysis`.
pub async fn match_report(
    State(state): State<Arc<AppState>>,
    Json(body): Json<OfferRequest>,
) -> AppResult<Json<MatchReportResponse>> {
    let report = state.engine.match_report(&body.text).await?;
    let analysis = serde_json::to_string(&report)
        .map_err(|e| AppError::Internal(format!("report serialization failed: {e}")))?;
    Ok(Json(MatchReportResponse {
        status: "success",
        analysis,
    }))
}
