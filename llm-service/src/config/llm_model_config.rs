use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// This struct contains both general and provider-specific parameters.
/// It can be extended as needed to support new backends or features.
///
/// # Examples
///
/// ```no_run
/// use llm_service::config::llm_model_config::LlmModelConfig;
/// use llm_service::config::llm_provider::LlmProvider;
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::OpenAi,
///     model: "gpt-4o".to_string(),
///     endpoint: "https://api.openai.com".to_string(),
///     api_key: Some("sk-...".to_string()),
///     max_tokens: Some(1024),
///     temperature: Some(0.7),
///     top_p: None,
///     timeout_secs: Some(120),
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend (Ollama or an OpenAI-compatible API).
    pub provider: LlmProvider,

    /// Model identifier string (e.g., `"gpt-4o"`, `"llama3.1"`).
    pub model: String,

    /// Inference endpoint base URL (local server or remote API).
    pub endpoint: String,

    /// Optional API key for authentication (required by OpenAI).
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 = deterministic, higher = more random).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
