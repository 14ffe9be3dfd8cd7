use serde::{Deserialize, Serialize};

/// Request payload shared by /analyze, /analyze-offer, and /match-report.
#[derive(Debug, Deserialize)]
pub struct OfferRequest {
    /// Raw job-offer text.
    pub text: String,
}

/// Response payload for /analyze-offer.
#[derive(Debug, Serialize)]
pub struct AnalyzeOfferResponse {
    pub status: &'static str,
    /// Plain-text skill list extracted from the offer.
    pub extracted_skills: String,
}

/// Response payload for /match-report.
#[derive(Debug, Serialize)]
pub struct MatchReportResponse {
    pub status: &'static str,
    /// Serialized compatibility report (JSON as a string).
    pub analysis: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_offer_wire_shape() {
        let body = serde_json::to_value(AnalyzeOfferResponse {
            status: "success",
            extracted_skills: "- Python\n- Docker".into(),
        })
        .unwrap();
        assert_eq!(body["status"], "success");
        assert!(body["extracted_skills"].as_str().unwrap().contains("Python"));
    }
}
