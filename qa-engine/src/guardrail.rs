//! Relevance guardrail: similarity-threshold pre-filter.
//!
//! A cheap local similarity search decides whether a question overlaps the
//! indexed corpus at all before a paid model call is made. The threshold is
//! deliberately permissive (default 0.1): only questions with near-zero
//! semantic overlap get rejected.

use tracing::debug;

/// Number of hits inspected by the guardrail.
pub const GUARDRAIL_TOP_K: u64 = 2;

/// Outcome of the guardrail decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelevanceVerdict {
    pub relevant: bool,
    /// Highest similarity score among the inspected hits (0 when the
    /// index returned nothing).
    pub score: f32,
}

/// Pure decision rule over retrieved scores.
///
/// Zero hits → `(false, 0.0)`. Otherwise the maximum score is compared to
/// the threshold: relevant iff `score >= threshold`.
pub fn decide(scores: &[f32], threshold: f32) -> RelevanceVerdict {
    let Some(top) = scores.iter().cloned().fold(None::<f32>, |acc, s| {
        Some(acc.map_or(s, |m| m.max(s)))
    }) else {
        return RelevanceVerdict {
            relevant: false,
            score: 0.0,
        };
    };

    let verdict = RelevanceVerdict {
        relevant: top >= threshold,
        score: top,
    };
    debug!(
        "guardrail: top_score={:.4} threshold={:.4} relevant={}",
        top, threshold, verdict.relevant
    );
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_index_is_never_relevant() {
        let v = decide(&[], 0.1);
        assert!(!v.relevant);
        assert_eq!(v.score, 0.0);
    }

    #[test]
    fn relevant_iff_top_score_meets_threshold() {
        assert!(decide(&[0.35, 0.2], 0.1).relevant);
        assert!(!decide(&[0.05, 0.02], 0.1).relevant);
        // Boundary: score equal to threshold passes.
        assert!(decide(&[0.1], 0.1).relevant);
    }

    #[test]
    fn takes_the_maximum_not_the_first_score() {
        let v = decide(&[0.02, 0.4], 0.1);
        assert!(v.relevant);
        assert!((v.score - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn negative_scores_fall_below_any_threshold_in_range() {
        let v = decide(&[-0.2, -0.5], 0.0);
        assert!(!v.relevant);
    }
}
