//! Shared LLM service with three active profiles: `chat`, `analysis`, and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches underlying HTTP clients per config (endpoint+model+key+timeout).
//! - Provides convenience methods to generate via chat/analysis and to compute embeddings.
//! - If the `analysis` profile is not provided, it falls back to `chat`.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use llm_service::config::llm_model_config::LlmModelConfig;
//! use llm_service::config::llm_provider::LlmProvider;
//! use llm_service::service_profiles::LlmServiceProfiles;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let chat = LlmModelConfig {
//!         provider: LlmProvider::Ollama,
//!         model: "llama3.1".into(),
//!         endpoint: "http://localhost:11434".into(),
//!         api_key: None,
//!         max_tokens: Some(512),
//!         temperature: Some(0.7),
//!         top_p: Some(0.9),
//!         timeout_secs: Some(30),
//!     };
//!
//!     let embedding = LlmModelConfig { ..chat.clone() };
//!
//!     let svc = Arc::new(LlmServiceProfiles::new(chat, None, embedding, Some(10))?);
//!
//!     let txt = svc.generate_chat("Hello world", None).await?;
//!     println!("CHAT: {}", txt);
//!
//!     let emb = svc.embed("Ferris").await?;
//!     println!("Embedding dim = {}", emb.len());
//!
//!     Ok(())
//! }
//! ```

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::LlmError,
    health_service::{HealthService, HealthStatus},
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

/// Shared service that manages three logical LLM profiles: **chat**,
/// **analysis**, and **embedding**.
///
/// Internally, it caches Ollama/OpenAI clients keyed by their configuration
/// to avoid recreating HTTP clients on each call.
pub struct LlmServiceProfiles {
    chat: LlmModelConfig,
    analysis: LlmModelConfig,
    embedding: LlmModelConfig,

    ollama: RwLock<HashMap<ClientKey, Arc<OllamaService>>>,
    openai: RwLock<HashMap<ClientKey, Arc<OpenAiService>>>,

    health: HealthService,
}

impl LlmServiceProfiles {
    /// Creates a new service with three profiles.
    ///
    /// - `chat`: required conversational profile.
    /// - `analysis_opt`: optional profile for structured reports. If `None`,
    ///   falls back to `chat`.
    /// - `embedding`: required embedding profile.
    /// - `health_timeout_secs`: optional timeout for the health checker.
    pub fn new(
        chat: LlmModelConfig,
        analysis_opt: Option<LlmModelConfig>,
        embedding: LlmModelConfig,
        health_timeout_secs: Option<u64>,
    ) -> Result<Self, LlmError> {
        let analysis = analysis_opt.unwrap_or_else(|| chat.clone());

        Ok(Self {
            chat,
            analysis,
            embedding,
            ollama: RwLock::new(HashMap::new()),
            openai: RwLock::new(HashMap::new()),
            health: HealthService::new(health_timeout_secs)?,
        })
    }

    /// Builds the service from environment variables.
    ///
    /// Reads the chat, optional analysis, and embedding configs via
    /// `config::default_config`.
    ///
    /// # Errors
    /// Returns [`LlmError::Config`] when a required variable is missing or
    /// fails validation.
    pub fn from_env() -> Result<Self, LlmError> {
        let chat = crate::config::default_config::config_chat()?;
        let analysis = crate::config::default_config::config_analysis()?;
        let embedding = crate::config::default_config::config_embedding()?;
        Self::new(chat, analysis, embedding, Some(10))
    }

    /// Generates text using the **chat** profile.
    ///
    /// # Arguments
    /// - `prompt`: input text prompt.
    /// - `system`: optional system instruction.
    ///
    /// # Errors
    /// Returns [`LlmError`] if generation fails.
    pub async fn generate_chat(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, LlmError> {
        self.generate_with(&self.chat, prompt, system).await
    }

    /// Generates text using the **analysis** profile.
    ///
    /// Falls back to the chat profile if no analysis profile was specified
    /// at creation.
    pub async fn generate_analysis(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, LlmError> {
        self.generate_with(&self.analysis, prompt, system).await
    }

    /// Computes embeddings using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`LlmError`] if the embedding call fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, LlmError> {
        match self.embedding.provider {
            LlmProvider::Ollama => {
                let cli = self.get_or_init_ollama(&self.embedding).await?;
                cli.embeddings(input).await
            }
            LlmProvider::OpenAi => {
                let cli = self.get_or_init_openai(&self.embedding).await?;
                cli.embeddings(input).await
            }
        }
    }

    /// Returns a health snapshot for all distinct profiles.
    ///
    /// If the analysis profile equals the chat profile, it is checked only once.
    pub async fn health_all(&self) -> Vec<HealthStatus> {
        let mut list = Vec::<LlmModelConfig>::with_capacity(3);
        list.push(self.chat.clone());
        if self.analysis != self.chat {
            list.push(self.analysis.clone());
        }
        if self.embedding != self.chat && self.embedding != self.analysis {
            list.push(self.embedding.clone());
        }
        self.health.check_many(&list).await
    }

    /// Returns references to the current profiles `(chat, analysis, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig, &LlmModelConfig) {
        (&self.chat, &self.analysis, &self.embedding)
    }

    /* --------------------- Internals --------------------- */

    async fn generate_with(
        &self,
        cfg: &LlmModelConfig,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, LlmError> {
        match cfg.provider {
            LlmProvider::Ollama => {
                let cli = self.get_or_init_ollama(cfg).await?;
                cli.generate(prompt, system).await
            }
            LlmProvider::OpenAi => {
                let cli = self.get_or_init_openai(cfg).await?;
                cli.generate(prompt, system).await
            }
        }
    }

    async fn get_or_init_ollama(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OllamaService>, LlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.ollama.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.ollama.write().await;
        if let Some(cli) = w.get(&key) {
            return Ok(cli.clone());
        }
        let cli = Arc::new(OllamaService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }

    async fn get_or_init_openai(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OpenAiService>, LlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.openai.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.openai.write().await;
        if let Some(cli) = w.get(&key) {
            return Ok(cli.clone());
        }
        let cli = Arc::new(OpenAiService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }
}

/// Internal cache key to identify unique client configs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(model: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: model.into(),
            endpoint: "http://localhost:11434".into(),
            api_key: None,
            max_tokens: None,
            temperature: Some(0.7),
            top_p: None,
            timeout_secs: Some(10),
        }
    }

    #[test]
    fn analysis_falls_back_to_chat() {
        let svc =
            LlmServiceProfiles::new(cfg("llama3.1"), None, cfg("nomic-embed-text"), None).unwrap();
        let (chat, analysis, _) = svc.profiles();
        assert_eq!(chat, analysis);
    }

    #[test]
    fn client_key_distinguishes_models() {
        let a = ClientKey::from(&cfg("llama3.1"));
        let b = ClientKey::from(&cfg("mistral"));
        let a2 = ClientKey::from(&cfg("llama3.1"));
        assert_ne!(a, b);
        assert_eq!(a, a2);
    }

    #[test]
    fn client_key_hashes_consistently_in_a_map() {
        let mut map = HashMap::new();
        map.insert(ClientKey::from(&cfg("llama3.1")), 1);
        let mut timed_out = cfg("llama3.1");
        timed_out.timeout_secs = Some(99);
        map.insert(ClientKey::from(&timed_out), 2);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&ClientKey::from(&cfg("llama3.1"))), Some(&1));
    }
}
