//! Client for OpenAI-compatible chat and embeddings APIs.
//!
//! Both operations go through one `POST + status check + decode` path:
//! - `POST {endpoint}/v1/chat/completions` — non-streaming chat completion
//! - `POST {endpoint}/v1/embeddings`       — single embedding vector
//!
//! Request bodies are assembled as JSON maps so unset sampling options are
//! simply absent instead of `null`. Errors are normalized through
//! `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        HttpError, LlmError, Provider, ProviderError, ProviderErrorKind, make_snippet,
    },
};

/// Client for an OpenAI-compatible API.
///
/// Validates provider, API key, and endpoint scheme at construction and
/// keeps a preconfigured `reqwest::Client` with Bearer auth headers.
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    base: String,
}

impl OpenAiService {
    /// # Errors
    /// - [`ProviderErrorKind::InvalidProvider`] if `cfg.provider` is not OpenAI
    /// - [`ProviderErrorKind::MissingApiKey`] if `cfg.api_key` is `None`
    /// - [`ProviderErrorKind::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`LlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, LlmError> {
        if cfg.provider != LlmProvider::OpenAi {
            return Err(
                ProviderError::new(Provider::OpenAi, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let api_key = cfg
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::new(Provider::OpenAi, ProviderErrorKind::MissingApiKey))?;

        let endpoint = cfg.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ProviderError::new(
                Provider::OpenAi,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }
        let base = endpoint.trim_end_matches('/').to_string();

        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(60));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(bearer_headers(api_key)?)
            .build()?;

        info!(
            provider = "OpenAI",
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "OpenAiService initialized"
        );

        Ok(Self { client, cfg, base })
    }

    /// Non-streaming chat completion.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::HttpStatus`] for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client/network failures
    /// - [`ProviderErrorKind::Decode`] if the JSON cannot be parsed
    /// - [`ProviderErrorKind::EmptyChoices`] if no choices carry content
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        let body = chat_payload(&self.cfg, prompt, system);
        let out: ChatCompletion = self
            .post_json(
                "/v1/chat/completions",
                &body,
                "`choices[0].message.content`",
            )
            .await?;

        out.choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or_else(|| {
                ProviderError::new(Provider::OpenAi, ProviderErrorKind::EmptyChoices).into()
            })
    }

    /// Retrieves one embedding vector for `input` via `/v1/embeddings`.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::HttpStatus`] for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client/network failures
    /// - [`ProviderErrorKind::Decode`] if the JSON cannot be parsed or
    ///   `data` is empty
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>, LlmError> {
        let body = embeddings_payload(&self.cfg, input);
        let out: EmbeddingList = self
            .post_json("/v1/embeddings", &body, "`data[0].embedding`")
            .await?;

        out.data
            .into_iter()
            .next()
            .map(|row| row.embedding)
            .ok_or_else(|| {
                ProviderError::new(
                    Provider::OpenAi,
                    ProviderErrorKind::Decode("empty `data` in embeddings response".into()),
                )
                .into()
            })
    }

    /// Shared request path: POST the body, map non-2xx statuses, decode.
    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        expect: &str,
    ) -> Result<T, LlmError> {
        let url = format!("{}{}", self.base, path);
        let started = Instant::now();
        debug!(model = %self.cfg.model, "POST {}", url);

        let resp = self.client.post(&url).json(body).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let snippet = make_snippet(&resp.text().await.unwrap_or_default());
            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "OpenAI request returned non-success status"
            );
            return Err(ProviderError::new(
                Provider::OpenAi,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let parsed = resp.json::<T>().await.map_err(|e| {
            ProviderError::new(
                Provider::OpenAi,
                ProviderErrorKind::Decode(format!("serde error: {e}; expected {expect}")),
            )
        })?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            "POST {} completed", url
        );
        Ok(parsed)
    }
}

fn bearer_headers(api_key: &str) -> Result<header::HeaderMap, LlmError> {
    let mut headers = header::HeaderMap::new();
    let auth = header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
        ProviderError::new(
            Provider::OpenAi,
            ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
        )
    })?;
    headers.insert(header::AUTHORIZATION, auth);
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    Ok(headers)
}

/// Chat body: optional system message first, then the user prompt; sampling
/// options only when configured.
fn chat_payload(cfg: &LlmModelConfig, prompt: &str, system: Option<&str>) -> Value {
    let mut messages = Vec::with_capacity(2);
    if let Some(sys) = system {
        messages.push(serde_json::json!({"role": "system", "content": sys}));
    }
    messages.push(serde_json::json!({"role": "user", "content": prompt}));

    let mut body = Map::new();
    body.insert("model".into(), cfg.model.clone().into());
    body.insert("messages".into(), Value::Array(messages));
    if let Some(t) = cfg.temperature {
        body.insert("temperature".into(), t.into());
    }
    if let Some(p) = cfg.top_p {
        body.insert("top_p".into(), p.into());
    }
    if let Some(m) = cfg.max_tokens {
        body.insert("max_tokens".into(), m.into());
    }
    Value::Object(body)
}

fn embeddings_payload(cfg: &LlmModelConfig, input: &str) -> Value {
    serde_json::json!({"model": cfg.model, "input": input})
}

/// Minimal slice of `/v1/chat/completions` output.
#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

/// Minimal slice of `/v1/embeddings` output.
#[derive(Debug, Deserialize)]
struct EmbeddingList {
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::OpenAi,
            model: "gpt-4o".into(),
            endpoint: "https://api.openai.com".into(),
            api_key: Some("sk-test".into()),
            max_tokens: Some(1024),
            temperature: Some(0.7),
            top_p: None,
            timeout_secs: Some(30),
        }
    }

    #[test]
    fn rejects_missing_api_key() {
        let mut c = cfg();
        c.api_key = None;
        assert!(OpenAiService::new(c).is_err());
    }

    #[test]
    fn rejects_wrong_provider() {
        let mut c = cfg();
        c.provider = LlmProvider::Ollama;
        assert!(OpenAiService::new(c).is_err());
    }

    #[test]
    fn chat_payload_orders_messages_and_omits_unset_options() {
        let v = chat_payload(&cfg(), "Who are you?", Some("You are concise."));
        assert_eq!(v["model"], "gpt-4o");
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["role"], "user");
        assert_eq!(v["messages"][1]["content"], "Who are you?");
        assert_eq!(v["max_tokens"], 1024);
        assert!(v.get("top_p").is_none());
    }

    #[test]
    fn chat_payload_without_system_starts_with_user() {
        let v = chat_payload(&cfg(), "hello", None);
        assert_eq!(v["messages"][0]["role"], "user");
        assert_eq!(v["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn embeddings_payload_uses_input_field() {
        let v = embeddings_payload(&cfg(), "some text");
        assert_eq!(v["input"], "some text");
        assert!(v.get("prompt").is_none());
    }

    #[test]
    fn chat_response_parses_content() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"Hi."}}]}"#;
        let resp: ChatCompletion = serde_json::from_str(raw).unwrap();
        let content = resp.choices.into_iter().find_map(|c| c.message.content);
        assert_eq!(content.as_deref(), Some("Hi."));
    }
}
