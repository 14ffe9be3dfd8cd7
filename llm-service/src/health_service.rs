//! Startup reachability checks for the configured model profiles.
//!
//! One GET per profile: Ollama answers `/api/tags`, OpenAI-compatible
//! servers answer `/v1/models` with Bearer auth. The check never fails the
//! caller; transport errors, bad statuses, and a missing model all fold
//! into a [`HealthStatus`] with `ok = false`.

use std::time::{Duration, Instant};

use reqwest::RequestBuilder;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{LlmError, make_snippet};

/// Snapshot of one profile's reachability, logged at startup.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub provider: String,
    pub endpoint: String,
    pub model: Option<String>,
    pub ok: bool,
    pub latency_ms: u128,
    pub message: String,
}

impl HealthStatus {
    fn report(cfg: &LlmModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: format!("{:?}", cfg.provider),
            endpoint: cfg.endpoint.trim().to_string(),
            model: Some(cfg.model.clone()),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

/// Reachability checker shared by all profiles. Holds one `reqwest` client;
/// every check is a single GET against the provider's model listing.
pub struct HealthService {
    client: reqwest::Client,
}

impl HealthService {
    /// # Errors
    /// Returns [`LlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs.unwrap_or(10)))
            .build()?;
        Ok(Self { client })
    }

    /// Checks one profile. Never errors; failures come back as `ok = false`.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let endpoint = cfg.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return HealthStatus::report(cfg, false, 0, "endpoint is empty or missing http/https");
        }

        let request = match self.listing_request(cfg, endpoint) {
            Ok(r) => r,
            Err(message) => return HealthStatus::report(cfg, false, 0, message),
        };

        let start = Instant::now();
        let status = match request.send().await {
            Ok(resp) if resp.status().is_success() => {
                let latency = start.elapsed().as_millis();
                let body = resp.json::<Value>().await.unwrap_or(Value::Null);
                match model_listed(cfg.provider, &body, &cfg.model) {
                    Some(true) => {
                        HealthStatus::report(cfg, true, latency, "reachable; model is available")
                    }
                    Some(false) => HealthStatus::report(
                        cfg,
                        false,
                        latency,
                        "reachable, but the model is not listed",
                    ),
                    // Unknown listing shape still proves the server answers.
                    None => HealthStatus::report(
                        cfg,
                        true,
                        latency,
                        "reachable; model listing not recognized",
                    ),
                }
            }
            Ok(resp) => {
                let latency = start.elapsed().as_millis();
                let code = resp.status();
                let snippet = make_snippet(&resp.text().await.unwrap_or_default());
                HealthStatus::report(cfg, false, latency, format!("HTTP {code}: {snippet}"))
            }
            Err(e) => {
                HealthStatus::report(cfg, false, start.elapsed().as_millis(), e.to_string())
            }
        };

        if status.ok {
            info!(
                provider = %status.provider,
                endpoint = %status.endpoint,
                latency_ms = status.latency_ms,
                "health check passed"
            );
        } else {
            warn!(
                provider = %status.provider,
                endpoint = %status.endpoint,
                message = %status.message,
                "health check failed"
            );
        }
        status
    }

    /// Checks every profile in order. Failures never short-circuit the batch.
    pub async fn check_many(&self, configs: &[LlmModelConfig]) -> Vec<HealthStatus> {
        let mut out = Vec::with_capacity(configs.len());
        for cfg in configs {
            out.push(self.check(cfg).await);
        }
        out
    }

    fn listing_request(
        &self,
        cfg: &LlmModelConfig,
        endpoint: &str,
    ) -> Result<RequestBuilder, String> {
        let base = endpoint.trim_end_matches('/');
        match cfg.provider {
            LlmProvider::Ollama => Ok(self.client.get(format!("{base}/api/tags"))),
            LlmProvider::OpenAi => {
                let key = cfg
                    .api_key
                    .as_deref()
                    .ok_or_else(|| "missing API key for health check".to_string())?;
                Ok(self.client.get(format!("{base}/v1/models")).bearer_auth(key))
            }
        }
    }
}

/// Looks for `model` in the provider's listing payload.
///
/// Ollama lists under `models[].name`, OpenAI under `data[].id`. Returns
/// `None` when the payload carries no recognizable list.
fn model_listed(provider: LlmProvider, body: &Value, model: &str) -> Option<bool> {
    let (list, field) = match provider {
        LlmProvider::Ollama => (body.get("models")?, "name"),
        LlmProvider::OpenAi => (body.get("data")?, "id"),
    };
    let items = list.as_array()?;
    Some(
        items
            .iter()
            .any(|item| item.get(field).and_then(Value::as_str) == Some(model)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg(provider: LlmProvider) -> LlmModelConfig {
        LlmModelConfig {
            provider,
            model: "llama3.1".into(),
            endpoint: "http://localhost:11434".into(),
            api_key: Some("sk-test".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn finds_model_in_ollama_tags() {
        let body = json!({"models": [{"name": "mistral"}, {"name": "llama3.1"}]});
        assert_eq!(model_listed(LlmProvider::Ollama, &body, "llama3.1"), Some(true));
        assert_eq!(model_listed(LlmProvider::Ollama, &body, "phi3"), Some(false));
    }

    #[test]
    fn finds_model_in_openai_listing() {
        let body = json!({"data": [{"id": "gpt-4o"}]});
        assert_eq!(model_listed(LlmProvider::OpenAi, &body, "gpt-4o"), Some(true));
        assert_eq!(model_listed(LlmProvider::OpenAi, &body, "gpt-3.5"), Some(false));
    }

    #[test]
    fn unrecognized_listing_is_inconclusive() {
        assert_eq!(model_listed(LlmProvider::Ollama, &Value::Null, "llama3.1"), None);
        let body = json!({"models": "not-a-list"});
        assert_eq!(model_listed(LlmProvider::Ollama, &body, "llama3.1"), None);
    }

    #[tokio::test]
    async fn invalid_endpoint_fails_without_network() {
        let mut c = cfg(LlmProvider::Ollama);
        c.endpoint = "localhost:11434".into();
        let status = HealthService::new(Some(1)).unwrap().check(&c).await;
        assert!(!status.ok);
        assert_eq!(status.latency_ms, 0);
    }

    #[tokio::test]
    async fn openai_without_key_fails_without_network() {
        let mut c = cfg(LlmProvider::OpenAi);
        c.api_key = None;
        let status = HealthService::new(Some(1)).unwrap().check(&c).await;
        assert!(!status.ok);
        assert!(status.message.contains("API key"));
    }
}
