//! Configuration types and env-driven constructors for LLM profiles.

pub mod default_config;
pub mod llm_model_config;
pub mod llm_provider;
