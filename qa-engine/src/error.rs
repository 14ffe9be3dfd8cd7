//! Typed error for the qa-engine crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Errors from the underlying cv-index crate (store, embeddings).
    #[error("index error: {0}")]
    Index(#[from] cv_index::IndexError),

    /// Generation failure from the LLM provider layer.
    #[error("generation error: {0}")]
    Generation(#[from] llm_service::error_handler::LlmError),

    /// Model output did not parse against the expected schema.
    #[error("malformed model output: {0}")]
    MalformedOutput(String),

    /// A template was rendered without one of its required variables.
    /// Caller programming error; fails fast before any model call.
    #[error("template '{template}' is missing required variable '{variable}'")]
    MissingVariable {
        template: &'static str,
        variable: &'static str,
    },

    /// A template was given a variable it does not declare.
    #[error("template '{template}' does not accept variable '{variable}'")]
    UnknownVariable {
        template: &'static str,
        variable: String,
    },

    /// Invalid engine configuration.
    #[error("config error: {0}")]
    Config(String),
}
