//! Runtime and collection configuration.

use crate::errors::IndexError;

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug)]
pub enum DistanceKind {
    /// Cosine distance (recommended for text embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
}

/// Configuration for CV ingestion and retrieval.
#[derive(Clone, Debug)]
pub struct IndexConfig {
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Distance function (Cosine by default).
    pub distance: DistanceKind,
    /// Embedding dimensionality; enforced on every stored vector.
    pub embedding_dim: usize,
    /// Directory holding the `.md`/`.txt` source documents.
    pub data_dir: String,
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Character overlap between consecutive chunks.
    pub chunk_overlap: usize,
    /// Maximum concurrent embedding calls during ingest.
    pub embed_concurrency: usize,
    /// Upsert batch size.
    pub upsert_batch: usize,
}

impl IndexConfig {
    /// Builds the config from environment variables with defaults.
    ///
    /// # Errors
    /// Returns [`IndexError::Config`] when a value fails validation
    /// (e.g. `CHUNK_OVERLAP >= CHUNK_SIZE`).
    pub fn from_env() -> Result<Self, IndexError> {
        let cfg = Self {
            qdrant_url: env_or("QDRANT_URL", "http://localhost:6334"),
            qdrant_api_key: std::env::var("QDRANT_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            collection: env_or("QDRANT_COLLECTION", "cv_documents"),
            distance: DistanceKind::Cosine,
            embedding_dim: parse_or("EMBEDDING_DIM", 768),
            data_dir: env_or("DATA_DIR", "./data"),
            chunk_size: parse_or("CHUNK_SIZE", 4000),
            chunk_overlap: parse_or("CHUNK_OVERLAP", 500),
            embed_concurrency: parse_or("EMBED_CONCURRENCY", 4),
            upsert_batch: parse_or("UPSERT_BATCH", 64),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(IndexError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(IndexError::Config("collection is empty".into()));
        }
        if self.embedding_dim == 0 {
            return Err(IndexError::Config("embedding_dim must be > 0".into()));
        }
        if self.chunk_size == 0 {
            return Err(IndexError::Config("chunk_size must be > 0".into()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(IndexError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.upsert_batch == 0 {
            return Err(IndexError::Config("upsert_batch must be > 0".into()));
        }
        Ok(())
    }
}

fn env_or(k: &str, dflt: &str) -> String {
    std::env::var(k).unwrap_or_else(|_| dflt.to_string())
}

fn parse_or<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> IndexConfig {
        IndexConfig {
            qdrant_url: "http://localhost:6334".into(),
            qdrant_api_key: None,
            collection: "cv_documents".into(),
            distance: DistanceKind::Cosine,
            embedding_dim: 768,
            data_dir: "./data".into(),
            chunk_size: 4000,
            chunk_overlap: 500,
            embed_concurrency: 4,
            upsert_batch: 64,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn overlap_must_be_smaller_than_chunk_size() {
        let mut cfg = base();
        cfg.chunk_overlap = cfg.chunk_size;
        assert!(matches!(cfg.validate(), Err(IndexError::Config(_))));
    }

    #[test]
    fn zero_dimension_rejected() {
        let mut cfg = base();
        cfg.embedding_dim = 0;
        assert!(cfg.validate().is_err());
    }
}
