//! Question pipeline over the CV index.
//!
//! Public API: [`QaEngine`], a facade owning shared handles to the vector
//! index and the LLM service. Operations:
//!
//! - [`QaEngine::answer_question`] — retrieve context, render the chat
//!   template, call the chat model (`/chat`).
//! - [`QaEngine::ask_guarded`] — run the relevance guardrail first and
//!   return the fixed refusal without a model call when it fails (`/ask`).
//! - [`QaEngine::extract_skills`] — job offer → plain-text skill list
//!   (`/analyze-offer`).
//! - [`QaEngine::analyze`] / [`QaEngine::match_report`] — two-stage offer
//!   analysis ending in a schema-validated [`structured::MatchReport`]
//!   (`/analyze`, `/match-report`).

pub mod config;
pub mod context;
pub mod error;
pub mod guardrail;
pub mod structured;
pub mod templates;

pub use config::EngineConfig;
pub use error::EngineError;
pub use guardrail::RelevanceVerdict;
pub use structured::{Gap, MatchReport};

use crate::guardrail::GUARDRAIL_TOP_K;

use cv_index::CvIndex;
use llm_service::service_profiles::LlmServiceProfiles;
use std::sync::Arc;
use tracing::{debug, info};

/// Fixed refusal returned when the guardrail rejects a question.
pub const REFUSAL_TEXT: &str =
    "I can only answer questions about the candidate's professional background. \
     Please ask about their experience, skills, or projects.";

/// Outcome of a guarded question (`/ask`).
#[derive(Clone, Debug)]
pub struct GuardedAnswer {
    pub answer: String,
    /// False means the guardrail refused without calling the model.
    pub passed: bool,
    pub relevance_score: f32,
}

/// Which text queries the index during offer analysis.
enum AnalysisQuery {
    /// Raw offer text (`/analyze`).
    OfferText,
    /// Extracted skill list (`/match-report`).
    ExtractedSkills,
}

/// Engine facade; construct once at startup and share via `Arc`.
pub struct QaEngine {
    index: Arc<CvIndex>,
    svc: Arc<LlmServiceProfiles>,
    cfg: EngineConfig,
}

impl QaEngine {
    pub fn new(index: Arc<CvIndex>, svc: Arc<LlmServiceProfiles>, cfg: EngineConfig) -> Self {
        Self { index, svc, cfg }
    }

    /// Answers a question from retrieved CV context (no guardrail).
    pub async fn answer_question(&self, question: &str) -> Result<String, EngineError> {
        let hits = self.index.query(question, self.cfg.chat_top_k).await?;
        debug!("chat retrieval: {} hits", hits.len());

        let context = context::build_context_block(&hits, self.cfg.context_max_chars);
        let prompt =
            templates::CHAT.render(&[("context", &context), ("question", question)])?;

        let answer = self.svc.generate_chat(&prompt, None).await?;
        Ok(answer)
    }

    /// Runs the guardrail, then answers only if the question is in-domain.
    ///
    /// A rejected question is a successful outcome, not an error: the
    /// fixed refusal text comes back with `passed = false`.
    pub async fn ask_guarded(&self, question: &str) -> Result<GuardedAnswer, EngineError> {
        let verdict = self.is_relevant(question).await?;
        if !verdict.relevant {
            info!(
                "guardrail blocked question (score={:.4})",
                verdict.score
            );
            return Ok(GuardedAnswer {
                answer: REFUSAL_TEXT.to_string(),
                passed: false,
                relevance_score: verdict.score,
            });
        }

        let answer = self.answer_question(question).await?;
        Ok(GuardedAnswer {
            answer,
            passed: true,
            relevance_score: verdict.score,
        })
    }

    /// Similarity-threshold relevance check over the top guardrail hits.
    pub async fn is_relevant(&self, question: &str) -> Result<RelevanceVerdict, EngineError> {
        let hits = self.index.query(question, GUARDRAIL_TOP_K).await?;
        let scores: Vec<f32> = hits.iter().map(|h| h.score).collect();
        Ok(guardrail::decide(&scores, self.cfg.guardrail_threshold))
    }

    /// Extracts the skill list from a job offer as plain text.
    pub async fn extract_skills(&self, offer_text: &str) -> Result<String, EngineError> {
        let prompt = templates::SKILL_EXTRACTION.render(&[("offer_text", offer_text)])?;
        let skills = self.svc.generate_chat(&prompt, None).await?;
        Ok(skills)
    }

    /// Offer analysis for `/analyze`: CV context is retrieved with the raw
    /// offer text.
    pub async fn analyze(&self, offer_text: &str) -> Result<MatchReport, EngineError> {
        self.run_analysis(offer_text, AnalysisQuery::OfferText).await
    }

    /// Offer analysis for `/match-report`: CV context is retrieved with
    /// the extracted skill list.
    pub async fn match_report(&self, offer_text: &str) -> Result<MatchReport, EngineError> {
        self.run_analysis(offer_text, AnalysisQuery::ExtractedSkills)
            .await
    }

    /// Two-stage pipeline: extract skills → retrieve context → structured
    /// report through the analysis profile.
    async fn run_analysis(
        &self,
        offer_text: &str,
        query: AnalysisQuery,
    ) -> Result<MatchReport, EngineError> {
        let skills = self.extract_skills(offer_text).await?;
        debug!("extracted skills:\n{}", skills);

        let query_text = match query {
            AnalysisQuery::OfferText => offer_text,
            AnalysisQuery::ExtractedSkills => skills.as_str(),
        };
        let hits = self
            .index
            .query(query_text, self.cfg.analyze_top_k)
            .await?;
        let context = context::build_context_block(&hits, self.cfg.context_max_chars);

        let prompt = templates::COMPATIBILITY_REPORT
            .render(&[("context", &context), ("skills", &skills)])?;
        let raw = self.svc.generate_analysis(&prompt, None).await?;

        structured::parse_match_report(&raw)
    }
}
