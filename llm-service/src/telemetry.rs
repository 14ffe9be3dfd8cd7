//! Tracing helpers shared by the binaries: a compact RFC3339 UTC timer and
//! an env filter that keeps this crate's provider-call logs at a chosen
//! level.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

/// RFC3339 UTC timer backed by `chrono`, without fractional seconds.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
pub struct UtcTimer;

impl FormatTime for UtcTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        w.write_str(&timestamp())
    }
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Builds an `EnvFilter` from `RUST_LOG` (falling back to `default`) and
/// pins this crate to `level`, so provider-call logs survive a narrower
/// global filter.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let directive = format!("llm_service={}", level.as_str().to_lowercase());
    match Directive::from_str(&directive) {
        Ok(d) => base.add_directive(d),
        Err(_) => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_pins_this_crate_level() {
        let filter = env_filter_with_level("info", Level::DEBUG);
        assert!(filter.to_string().contains("llm_service=debug"));
    }

    #[test]
    fn timestamp_is_compact_utc() {
        let ts = timestamp();
        assert!(ts.ends_with('Z'));
        assert!(!ts.contains('.'));
    }
}
