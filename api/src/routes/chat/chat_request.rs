use serde::{Deserialize, Serialize};

/// Request payload for /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Natural language question about the candidate.
    pub question: String,
}

/// Response payload for /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Final model answer (markdown).
    pub answer: String,
    /// Fixed origin tag for the chat widget.
    pub source: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_wire_shape() {
        let body = serde_json::to_value(ChatResponse {
            answer: "He cut deployment time by 60%.".into(),
            source: "RAG-CV",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"answer": "He cut deployment time by 60%.", "source": "RAG-CV"})
        );
    }
}
