//! Application error type and its HTTP mapping.
//!
//! Every internal failure maps to a 500 `{detail: <message>}` body.
//! Malformed request bodies never reach this type: axum rejects them
//! before the handler runs and the `json_extractor` middleware reshapes
//! that rejection. The guardrail rejection path never comes through here
//! either: it is a designed 200 response, not an error.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use qa_engine::EngineError;
use serde::Serialize;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot ---
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("server error: {0}")]
    Server(#[source] std::io::Error),

    /// Startup precondition or config failure (index missing, bad env).
    #[error("startup error: {0}")]
    Startup(String),

    /// Any pipeline failure: embedding, index, generation, malformed output.
    #[error("{0}")]
    Engine(#[from] EngineError),

    /// Unexpected internal failure with no better classification.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Startup(_)
            | AppError::Engine(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Wire shape of every error response.
#[derive(Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        tracing::error!("request failed: {} -> {}", body.detail, status);
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_map_to_500() {
        let err = AppError::Engine(EngineError::MalformedOutput("not json".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_errors_map_to_500() {
        let err = AppError::Internal("response serialization failed".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_serializes_with_detail_field() {
        let body = serde_json::to_value(ErrorBody {
            detail: "boom".into(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"detail": "boom"}));
    }
}
