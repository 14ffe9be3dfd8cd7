//! Rewrites body-deserialization failures into a 422 `{detail}` response
//! and stamps an `X-Request-Id` header on them.

use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

fn ensure_request_id(parts: &mut axum::http::response::Parts) {
    if let Some(h) = parts.headers.get("X-Request-Id") {
        if h.to_str().map(|v| !v.trim().is_empty()).unwrap_or(false) {
            return;
        }
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(value) = HeaderValue::from_str(&id) {
        parts.headers.insert("X-Request-Id", value);
    }
}

/// Axum splits body rejections across two statuses: 400 for JSON syntax
/// errors, 422 for schema mismatches. The API contract exposes one code
/// for both.
fn unify_rejection_status(status: StatusCode) -> StatusCode {
    if status == StatusCode::BAD_REQUEST {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        status
    }
}

/// Rejection bodies from axum are plain text; ours are already `{detail}`
/// JSON. Wraps whichever came through.
fn detail_body(bytes: &Bytes) -> Vec<u8> {
    let original = String::from_utf8_lossy(bytes);
    if original.trim_start().starts_with('{') {
        bytes.to_vec()
    } else {
        serde_json::to_vec(&serde_json::json!({ "detail": original.trim() }))
            .unwrap_or_else(|_| bytes.to_vec())
    }
}

/// Only 400/422 responses are rewritten; everything else passes through.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    if !(status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY) {
        return res;
    }

    let (mut parts, bytes) = take_body(res).await;
    parts.status = unify_rejection_status(parts.status);
    ensure_request_id(&mut parts);

    let body = detail_body(&bytes);

    parts.headers.insert(
        axum::http::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Response::from_parts(parts, body.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_status_becomes_422() {
        assert_eq!(
            unify_rejection_status(StatusCode::BAD_REQUEST),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn schema_error_status_stays_422() {
        assert_eq!(
            unify_rejection_status(StatusCode::UNPROCESSABLE_ENTITY),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn plain_text_rejection_is_wrapped_as_detail() {
        let bytes = Bytes::from_static(b"Failed to parse the request body as JSON");
        let body: serde_json::Value = serde_json::from_slice(&detail_body(&bytes)).unwrap();
        assert_eq!(
            body["detail"],
            "Failed to parse the request body as JSON"
        );
    }

    #[test]
    fn existing_json_body_passes_through_unchanged() {
        let bytes = Bytes::from_static(br#"{"detail":"already shaped"}"#);
        assert_eq!(detail_body(&bytes), bytes.to_vec());
    }
}
