//! Default LLM configs loaded from environment variables.
//!
//! This module provides convenience constructors for [`LlmModelConfig`],
//! grouped by role:
//!
//! - **Chat**      → conversational answers and skill extraction
//! - **Analysis**  → structured compatibility reports (optional; falls back to chat)
//! - **Embedding** → embedding generator for ingest and retrieval
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TEMPERATURE`  = chat sampling temperature (default 0.7)
//! - `LLM_TIMEOUT_SECS` = request timeout in seconds (default 120)
//!
//! Chat:
//! - `CHAT_PROVIDER` = `openai` (default) or `ollama`
//! - `OPENAI_URL`    = API base (default `https://api.openai.com`)
//! - `OPENAI_API_KEY` (mandatory when the provider is OpenAI)
//! - `OPENAI_MODEL`  = chat model (default `gpt-4o`)
//! - `OLLAMA_URL`    = Ollama base (default `http://localhost:11434`)
//! - `OLLAMA_MODEL`  = chat model when the provider is Ollama (default `llama3.1`)
//!
//! Analysis (optional, structured reports):
//! - `ANALYSIS_MODEL` = dedicated model id; unset means reuse the chat profile
//!
//! Embedding:
//! - `EMBEDDING_PROVIDER` = `ollama` (default) or `openai`
//! - `EMBEDDING_MODEL`    = embedding model (default `nomic-embed-text`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        LlmError, env_opt_f32, env_opt_u32, env_opt_u64, env_or, must_env, validate_http_endpoint,
        validate_range_f32,
    },
};

const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "llama3.1";
const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";
const DEFAULT_CHAT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Resolves the endpoint for a provider, validating the scheme.
fn endpoint_for(provider: LlmProvider) -> Result<String, LlmError> {
    let (var, url) = match provider {
        LlmProvider::OpenAi => ("OPENAI_URL", env_or("OPENAI_URL", DEFAULT_OPENAI_URL)),
        LlmProvider::Ollama => ("OLLAMA_URL", env_or("OLLAMA_URL", DEFAULT_OLLAMA_URL)),
    };
    validate_http_endpoint(var, &url)?;
    Ok(url)
}

/// Constructs the **chat** profile config from the environment.
///
/// Used for conversational answers and plain-text skill extraction.
///
/// # Errors
/// - [`LlmError::Config`] if `CHAT_PROVIDER` names an unknown provider,
///   `OPENAI_API_KEY` is missing for the OpenAI provider, or a numeric
///   variable fails to parse/validate.
pub fn config_chat() -> Result<LlmModelConfig, LlmError> {
    let provider = LlmProvider::parse(&env_or("CHAT_PROVIDER", "openai"))?;
    let endpoint = endpoint_for(provider)?;

    let (model, api_key) = match provider {
        LlmProvider::OpenAi => (
            env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            Some(must_env("OPENAI_API_KEY")?),
        ),
        LlmProvider::Ollama => (env_or("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL), None),
    };

    let temperature = env_opt_f32("LLM_TEMPERATURE")?.unwrap_or(DEFAULT_CHAT_TEMPERATURE);
    validate_range_f32("temperature", temperature, 0.0, 2.0)?;

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: Some(temperature),
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}

/// Constructs the optional **analysis** profile config from the environment.
///
/// Returns `Ok(None)` when `ANALYSIS_MODEL` is unset, in which case the
/// service falls back to the chat profile. A dedicated analysis model runs
/// at temperature 0.2 so report output stays stable.
///
/// # Errors
/// Propagates the same config errors as [`config_chat`].
pub fn config_analysis() -> Result<Option<LlmModelConfig>, LlmError> {
    let model = match std::env::var("ANALYSIS_MODEL") {
        Ok(v) if !v.trim().is_empty() => v,
        _ => return Ok(None),
    };

    let base = config_chat()?;
    Ok(Some(LlmModelConfig {
        model,
        temperature: Some(0.2),
        ..base
    }))
}

/// Constructs the **embedding** profile config from the environment.
///
/// Defaults to a local Ollama embedding model so ingest stays free and
/// private; any OpenAI-compatible embeddings endpoint works as well.
///
/// # Errors
/// - [`LlmError::Config`] if `EMBEDDING_PROVIDER` names an unknown provider
///   or `OPENAI_API_KEY` is missing for the OpenAI provider.
pub fn config_embedding() -> Result<LlmModelConfig, LlmError> {
    let provider = LlmProvider::parse(&env_or("EMBEDDING_PROVIDER", "ollama"))?;
    let endpoint = endpoint_for(provider)?;

    let api_key = match provider {
        LlmProvider::OpenAi => Some(must_env("OPENAI_API_KEY")?),
        LlmProvider::Ollama => None,
    };

    Ok(LlmModelConfig {
        provider,
        model: env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
        endpoint,
        api_key,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(30)),
    })
}
