//! Schema-validated parsing of model output for compatibility reports.
//!
//! Models regularly wrap JSON in markdown code fences despite being told
//! not to; stripping those is plain string trimming. Parsing is strict
//! beyond that: field presence and types are validated, the percentage is
//! clamped to [0, 100], and gap entries with empty strings are rejected.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// A missing skill with the argument that mitigates it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Gap {
    pub missing_skill: String,
    pub mitigation: String,
}

/// Structured candidate-vs-offer evaluation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    pub match_percentage: i64,
    pub strengths: Vec<String>,
    pub gaps: Vec<Gap>,
    pub recommendation: String,
}

/// Parses raw model output into a validated [`MatchReport`].
///
/// # Errors
/// [`EngineError::MalformedOutput`] when the text is not valid JSON for
/// the schema or a gap entry carries an empty field.
pub fn parse_match_report(raw: &str) -> Result<MatchReport, EngineError> {
    let cleaned = strip_code_fences(raw);

    let mut report: MatchReport = serde_json::from_str(cleaned)
        .map_err(|e| EngineError::MalformedOutput(format!("{e}: {}", snippet(cleaned))))?;

    report.match_percentage = report.match_percentage.clamp(0, 100);

    for (i, gap) in report.gaps.iter().enumerate() {
        if gap.missing_skill.trim().is_empty() || gap.mitigation.trim().is_empty() {
            return Err(EngineError::MalformedOutput(format!(
                "gap entry {i} has an empty missing_skill or mitigation"
            )));
        }
    }

    Ok(report)
}

/// Strips a leading/trailing markdown code fence (``` or ```json).
fn strip_code_fences(raw: &str) -> &str {
    let s = raw.trim();
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    // Drop an optional language tag on the fence line.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start_matches(['\r', '\n']);
    rest.strip_suffix("```").map(str::trim).unwrap_or(rest)
}

fn snippet(s: &str) -> String {
    const MAX: usize = 120;
    if s.len() <= MAX {
        s.to_string()
    } else {
        let mut end = MAX;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_json() -> String {
        serde_json::json!({
            "match_percentage": 82,
            "strengths": ["Angular", "Java"],
            "gaps": [{"missing_skill": "Kubernetes", "mitigation": "Docker experience transfers"}],
            "recommendation": "Strong fit for the frontend role."
        })
        .to_string()
    }

    #[test]
    fn parses_plain_json() {
        let report = parse_match_report(&valid_json()).unwrap();
        assert_eq!(report.match_percentage, 82);
        assert_eq!(report.strengths.len(), 2);
        assert_eq!(report.gaps[0].missing_skill, "Kubernetes");
    }

    #[test]
    fn strips_fenced_json() {
        let fenced = format!("```json\n{}\n```", valid_json());
        assert!(parse_match_report(&fenced).is_ok());
        let fenced_plain = format!("```\n{}\n```", valid_json());
        assert!(parse_match_report(&fenced_plain).is_ok());
    }

    #[test]
    fn clamps_percentage_into_range() {
        let high = valid_json().replace("82", "140");
        assert_eq!(parse_match_report(&high).unwrap().match_percentage, 100);
        let low = valid_json().replace("82", "-5");
        assert_eq!(parse_match_report(&low).unwrap().match_percentage, 0);
    }

    #[test]
    fn rejects_empty_gap_fields() {
        let bad = valid_json().replace("Kubernetes", "  ");
        let err = parse_match_report(&bad).unwrap_err();
        assert!(matches!(err, EngineError::MalformedOutput(_)));
    }

    #[test]
    fn rejects_prose_instead_of_json() {
        let err = parse_match_report("The candidate looks great!").unwrap_err();
        assert!(matches!(err, EngineError::MalformedOutput(_)));
    }

    #[test]
    fn rejects_missing_fields() {
        let err = parse_match_report(r#"{"match_percentage": 50}"#).unwrap_err();
        assert!(matches!(err, EngineError::MalformedOutput(_)));
    }
}
