//! GET / — liveness probe.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

/// Handler: GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "online",
        message: "CV assistant backend is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn liveness_reports_online_with_version() {
        let Json(body) = root().await;
        assert_eq!(body.status, "online");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }
}
