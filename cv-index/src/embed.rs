//! Embedding provider seam.
//!
//! Async is required because real providers (Ollama, OpenAI) perform HTTP
//! requests; the trait is object-safe so the index can hold a boxed
//! provider without generics spreading through the crate.

use crate::errors::IndexError;

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use llm_service::service_profiles::LlmServiceProfiles;

/// Provider interface for embedding generation.
///
/// Implement this trait to plug in a different embedding backend; the
/// production implementation is [`ProfilesEmbedder`].
pub trait EmbeddingsProvider: Send + Sync {
    /// Async embedding function.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, IndexError>> + Send + 'a>>;
}

/// [`EmbeddingsProvider`] backed by the shared LLM service's embedding
/// profile. Provider failures map to [`IndexError::Embedding`].
pub struct ProfilesEmbedder {
    svc: Arc<LlmServiceProfiles>,
}

impl ProfilesEmbedder {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }
}

impl EmbeddingsProvider for ProfilesEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, IndexError>> + Send + 'a>> {
        Box::pin(async move {
            self.svc
                .embed(text)
                .await
                .map_err(|e| IndexError::Embedding(e.to_string()))
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Deterministic fake provider for unit tests: returns a constant-size
    /// vector seeded from the text length.
    pub struct FixedDimEmbedder(pub usize);

    impl EmbeddingsProvider for FixedDimEmbedder {
        fn embed<'a>(
            &'a self,
            text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, IndexError>> + Send + 'a>> {
            let dim = self.0;
            let seed = text.len() as f32;
            Box::pin(async move { Ok(vec![seed; dim]) })
        }
    }
}
