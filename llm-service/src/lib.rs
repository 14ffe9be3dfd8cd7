//! Shared LLM plumbing: provider clients, profiles, health checks.
//!
//! This crate provides:
//! - Thin HTTP clients for Ollama and OpenAI-compatible APIs
//! - A profile registry (`chat`, `analysis`, `embedding`) with client caching
//! - Env-driven configuration constructors
//! - Unified `thiserror`-based error types
//! - Lightweight provider health probes
//!
//! Construct [`service_profiles::LlmServiceProfiles`] once (usually via
//! `from_env`), wrap it in `Arc`, and share it across the application.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::LlmError;
pub use health_service::HealthStatus;
pub use service_profiles::LlmServiceProfiles;
