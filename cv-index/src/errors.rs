//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for cv-index operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// I/O or filesystem errors (data directory, document files).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Ingest pipeline errors (empty data directory, no chunks produced).
    #[error("ingest error: {0}")]
    Ingest(String),

    /// Mismatch in vector dimensionality against the configured dimension.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Embedding provider failure during ingest or query.
    #[error("embedding failure: {0}")]
    Embedding(String),

    /// The index cannot serve queries: store unreachable, collection
    /// missing or empty. Surfaced at startup by `ensure_ready`.
    #[error("index unavailable: {0}")]
    Unavailable(String),

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),
}
