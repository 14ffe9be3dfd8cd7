//! Runtime configuration loaded from environment variables.

use crate::error::EngineError;

/// Knobs for the question pipeline. All fields have defaults via `from_env`.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Hits retrieved for the chat context block.
    pub chat_top_k: u64,
    /// Hits retrieved for offer analysis context.
    pub analyze_top_k: u64,
    /// Guardrail similarity threshold in [0, 1].
    pub guardrail_threshold: f32,
    /// Character budget for the assembled context block.
    pub context_max_chars: usize,
}

impl EngineConfig {
    /// Builds from environment variables with defaults.
    ///
    /// # Errors
    /// [`EngineError::Config`] when `GUARDRAIL_THRESHOLD` falls outside
    /// `[0, 1]`.
    pub fn from_env() -> Result<Self, EngineError> {
        let cfg = Self {
            chat_top_k: parse("CHAT_TOP_K", 3),
            analyze_top_k: parse("ANALYZE_TOP_K", 4),
            guardrail_threshold: parse("GUARDRAIL_THRESHOLD", 0.1f32),
            context_max_chars: parse("CONTEXT_MAX_CHARS", 6000usize),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&self.guardrail_threshold) {
            return Err(EngineError::Config(format!(
                "guardrail_threshold must be in [0, 1], got {}",
                self.guardrail_threshold
            )));
        }
        if self.chat_top_k == 0 || self.analyze_top_k == 0 {
            return Err(EngineError::Config("top_k values must be > 0".into()));
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_permissive() {
        let cfg = EngineConfig {
            chat_top_k: 3,
            analyze_top_k: 4,
            guardrail_threshold: 0.1,
            context_max_chars: 6000,
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn threshold_outside_unit_interval_rejected() {
        let cfg = EngineConfig {
            chat_top_k: 3,
            analyze_top_k: 4,
            guardrail_threshold: 1.5,
            context_max_chars: 6000,
        };
        assert!(cfg.validate().is_err());
    }
}
