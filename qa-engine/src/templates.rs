//! Prompt templates with declared variable contracts.
//!
//! Each template is a named record carrying the set of variables its body
//! requires. Rendering validates the variable set before any substitution,
//! so a missing or unknown variable fails fast — long before a model call
//! spends money on a broken prompt.

use crate::error::EngineError;

/// A named prompt template with its required variables.
pub struct PromptTemplate {
    pub id: &'static str,
    pub required_variables: &'static [&'static str],
    body: &'static str,
}

impl PromptTemplate {
    /// Substitutes every `{variable}` marker and returns the final prompt.
    ///
    /// # Errors
    /// - [`EngineError::MissingVariable`] when a required variable is absent.
    /// - [`EngineError::UnknownVariable`] when a supplied variable is not
    ///   declared by the template.
    pub fn render(&self, variables: &[(&str, &str)]) -> Result<String, EngineError> {
        for (name, _) in variables {
            if !self.required_variables.iter().any(|r| r == name) {
                return Err(EngineError::UnknownVariable {
                    template: self.id,
                    variable: (*name).to_string(),
                });
            }
        }

        let mut out = self.body.to_string();
        for &required in self.required_variables {
            let Some((_, value)) = variables.iter().find(|(name, _)| *name == required) else {
                return Err(EngineError::MissingVariable {
                    template: self.id,
                    variable: required,
                });
            };
            out = out.replace(&format!("{{{required}}}"), value);
        }
        Ok(out)
    }
}

/// Chat template: answers recruiter questions from retrieved CV context.
pub const CHAT: PromptTemplate = PromptTemplate {
    id: "chat",
    required_variables: &["context", "question"],
    body: r#"You are the professional virtual assistant of the candidate whose CV is indexed below. You answer questions from recruiters and hiring managers on the candidate's behalf.

Rules:
- Answer only from the CV context below. Never invent experience, employers, dates, or figures.
- If the context does not contain the information, say so explicitly and offer to pass the question on to the candidate.
- If the question is unrelated to the candidate's career, decline politely in one sentence.
- Share contact details only if they appear in the context.
- Answer in the language the question was asked in.
- Format: markdown, short paragraphs, bullet lists for enumerations, no headings deeper than ###.

CV context:
{context}

Question:
{question}"#,
};

/// Skill-extraction template: distils a job offer into a skill list.
pub const SKILL_EXTRACTION: PromptTemplate = PromptTemplate {
    id: "skill_extraction",
    required_variables: &["offer_text"],
    body: r#"You are a senior technical recruiter. Extract the skills required by the job offer below.

Output contract:
- A markdown bullet list under exactly two headings: "Hard skills" and "Soft skills".
- One skill per bullet, named as in the offer (keep technology names verbatim).
- No commentary, no introduction, no closing remarks.

Job offer:
{offer_text}"#,
};

/// Compatibility-report template: candidate-vs-offer evaluation as JSON.
pub const COMPATIBILITY_REPORT: PromptTemplate = PromptTemplate {
    id: "compatibility_report",
    required_variables: &["context", "skills"],
    body: r#"You are a senior headhunter evaluating how well a candidate matches a job offer. Use only the CV context as evidence of the candidate's experience.

Scoring bands for match_percentage:
- 90-100: ideal fit, nearly every required skill is evidenced in the CV.
- 70-89: strong fit, core skills covered with minor gaps.
- 50-69: partial fit, several required skills missing.
- below 50: weak fit.
Apply a penalty when the offer's sector clearly does not match the candidate's experience.

Return ONLY a JSON object, no code fences, no prose, with exactly these fields:
{
  "match_percentage": <integer 0-100>,
  "strengths": [<string>, ...],
  "gaps": [{"missing_skill": <string>, "mitigation": <string>}, ...],
  "recommendation": <string>
}
Every gap must name the missing skill and a concrete mitigation argument.

CV context:
{context}

Required skills:
{skills}"#,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_substitutes_both_variables() {
        let out = CHAT
            .render(&[("context", "CTX-BLOCK"), ("question", "What about Orange?")])
            .unwrap();
        assert!(out.contains("CTX-BLOCK"));
        assert!(out.contains("What about Orange?"));
        assert!(!out.contains("{context}"));
        assert!(!out.contains("{question}"));
    }

    #[test]
    fn missing_variable_fails_fast() {
        let err = CHAT.render(&[("context", "CTX")]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingVariable {
                template: "chat",
                variable: "question"
            }
        ));
    }

    #[test]
    fn unknown_variable_is_rejected() {
        let err = SKILL_EXTRACTION
            .render(&[("offer_text", "x"), ("mood", "sunny")])
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownVariable { .. }));
    }

    #[test]
    fn report_template_keeps_json_schema_braces() {
        let out = COMPATIBILITY_REPORT
            .render(&[("context", "CTX"), ("skills", "- Python")])
            .unwrap();
        // The literal schema braces in the body must survive rendering.
        assert!(out.contains("\"match_percentage\""));
        assert!(out.contains("\"missing_skill\""));
        assert!(out.contains("- Python"));
    }
}
