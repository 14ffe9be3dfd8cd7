//! Shared state for all HTTP handlers.

use cv_index::{CvIndex, IndexConfig};
use cv_index::embed::ProfilesEmbedder;
use llm_service::service_profiles::LlmServiceProfiles;
use qa_engine::{EngineConfig, QaEngine};

use std::sync::Arc;

use crate::error_handler::AppError;

/// Dependency-injected state: one engine (holding the index and the LLM
/// service) built at process start and shared by every request task.
pub struct AppState {
    pub engine: QaEngine,
    pub llm: Arc<LlmServiceProfiles>,
    pub index: Arc<CvIndex>,
}

impl AppState {
    /// Constructs the full dependency graph from environment variables.
    ///
    /// No network call happens here; connectivity is probed separately
    /// during startup (`ensure_ready`, provider health checks).
    pub fn from_env() -> Result<Self, AppError> {
        let llm = Arc::new(
            LlmServiceProfiles::from_env()
                .map_err(|e| AppError::Startup(e.to_string()))?,
        );

        let index_cfg =
            IndexConfig::from_env().map_err(|e| AppError::Startup(e.to_string()))?;
        let embedder = Arc::new(ProfilesEmbedder::new(llm.clone()));
        let index = Arc::new(
            CvIndex::new(index_cfg, embedder)
                .map_err(|e| AppError::Startup(e.to_string()))?,
        );

        let engine_cfg =
            EngineConfig::from_env().map_err(|e| AppError::Startup(e.to_string()))?;
        let engine = QaEngine::new(index.clone(), llm.clone(), engine_cfg);

        Ok(Self { engine, llm, index })
    }
}
