use crate::error_handler::{ConfigError, LlmError};

/// Represents the provider (backend) used for large language model inference.
///
/// This enum distinguishes between the local Ollama runtime and any
/// OpenAI-compatible HTTP API. Adding more providers later (e.g., Anthropic,
/// Mistral API) means extending this enum and the matching service client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
    /// OpenAI-compatible chat-completions API.
    OpenAi,
}

impl LlmProvider {
    /// Parses a provider name from configuration (case-insensitive).
    ///
    /// Accepted values: `ollama`, `openai`.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedProvider`] for anything else.
    pub fn parse(name: &str) -> Result<Self, LlmError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(LlmProvider::Ollama),
            "openai" => Ok(LlmProvider::OpenAi),
            other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_providers() {
        assert_eq!(LlmProvider::parse("ollama").unwrap(), LlmProvider::Ollama);
        assert_eq!(LlmProvider::parse("OpenAI").unwrap(), LlmProvider::OpenAi);
        assert_eq!(LlmProvider::parse(" openai ").unwrap(), LlmProvider::OpenAi);
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!(LlmProvider::parse("bedrock").is_err());
    }
}
