use serde::{Deserialize, Serialize};

/// Request payload for /ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural language question.
    pub text: String,
}

/// Response payload for /ask. The guardrail rejection is a 200 with
/// `status: "blocked_by_guardrail"`, never an error.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub status: &'static str,
    pub relevance_score: f32,
}

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_BLOCKED: &str = "blocked_by_guardrail";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_response_wire_shape() {
        let body = serde_json::to_value(AskResponse {
            answer: "refusal".into(),
            status: STATUS_BLOCKED,
            relevance_score: 0.02,
        })
        .unwrap();
        assert_eq!(body["status"], "blocked_by_guardrail");
        assert!(body["relevance_score"].is_number());
    }
}
