//! CV document index: loading, chunking, embedding, and Qdrant-backed
//! similarity retrieval.
//!
//! The crate's public surface is [`CvIndex`], a facade that owns the
//! Qdrant connection and an [`embed::EmbeddingsProvider`]:
//!
//! - `rebuild()` drops and recreates the collection with the configured
//!   dimension (ingest always rebuilds, so a collection never mixes
//!   vector dimensions).
//! - `upsert(entries)` batch-writes points after checking every vector
//!   length.
//! - `query(text, k)` embeds the text and returns up to `k` hits ordered
//!   by descending cosine similarity, each carrying its raw score.
//! - `ensure_ready()` is the startup precondition: the collection must
//!   exist and be non-empty, otherwise serving must not start.
//!
//! The offline pipeline lives in [`ingest`]; the serving path only ever
//! calls `query` and `ensure_ready`.

pub mod chunker;
pub mod config;
pub mod embed;
pub mod embed_pool;
pub mod errors;
pub mod ingest;
pub mod loader;
pub mod normalize;
pub mod qdrant_facade;
pub mod record;

pub use config::{DistanceKind, IndexConfig};
pub use errors::IndexError;
pub use record::{Chunk, CvHit, Document, IndexEntry};

use crate::embed::EmbeddingsProvider;
use crate::qdrant_facade::QdrantFacade;

use qdrant_client::Payload;
use qdrant_client::qdrant::PointStruct;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Facade over the vector store plus the embedding provider.
///
/// Construct once at process start, wrap in `Arc`, and share across all
/// request handlers.
pub struct CvIndex {
    facade: QdrantFacade,
    embedder: Arc<dyn EmbeddingsProvider>,
    cfg: IndexConfig,
}

impl CvIndex {
    /// Creates the index facade; validates the config and builds the
    /// Qdrant client (no network call happens yet).
    pub fn new(cfg: IndexConfig, embedder: Arc<dyn EmbeddingsProvider>) -> Result<Self, IndexError> {
        let facade = QdrantFacade::new(&cfg)?;
        Ok(Self {
            facade,
            embedder,
            cfg,
        })
    }

    /// Drops and recreates the collection with the configured dimension.
    pub async fn rebuild(&self) -> Result<(), IndexError> {
        self.facade.rebuild_collection(self.cfg.embedding_dim).await
    }

    /// Upserts entries in one batch, verifying every vector length against
    /// the configured dimension first.
    pub async fn upsert(&self, entries: Vec<IndexEntry>) -> Result<u64, IndexError> {
        check_dimensions(&entries, self.cfg.embedding_dim)?;
        let points = entries.into_iter().map(build_point).collect();
        self.facade.upsert_points(points).await
    }

    /// Embeds `text` and runs a k-NN search; returns up to `k` hits
    /// ordered by descending similarity. An empty index yields an empty
    /// vec, not an error.
    pub async fn query(&self, text: &str, k: u64) -> Result<Vec<CvHit>, IndexError> {
        let vector = self.embedder.embed(text).await?;
        if vector.len() != self.cfg.embedding_dim {
            return Err(IndexError::VectorSizeMismatch {
                got: vector.len(),
                want: self.cfg.embedding_dim,
            });
        }

        let raw = self.facade.search(vector, k).await?;
        let hits: Vec<CvHit> = raw
            .iter()
            .map(|(score, payload)| CvHit::from_payload(*score, payload))
            .collect();

        debug!("query returned {} hits (k={})", hits.len(), k);
        Ok(hits)
    }

    /// Startup precondition: the collection exists and holds at least one
    /// point.
    ///
    /// # Errors
    /// [`IndexError::Unavailable`] with an operator-facing diagnostic when
    /// the store is unreachable or ingest has not been run.
    pub async fn ensure_ready(&self) -> Result<(), IndexError> {
        let count = self.facade.points_count().await?;
        if count == 0 {
            return Err(IndexError::Unavailable(format!(
                "collection '{}' is empty; run the `ingest` binary before starting the service",
                self.cfg.collection
            )));
        }
        info!(
            "index ready: collection '{}' holds {} points",
            self.cfg.collection, count
        );
        Ok(())
    }

    /// The active configuration (read-only).
    pub fn config(&self) -> &IndexConfig {
        &self.cfg
    }
}

/// Verifies that every entry's vector matches the expected dimension.
fn check_dimensions(entries: &[IndexEntry], want: usize) -> Result<(), IndexError> {
    for e in entries {
        if e.vector.len() != want {
            return Err(IndexError::VectorSizeMismatch {
                got: e.vector.len(),
                want,
            });
        }
    }
    Ok(())
}

/// Deterministic UUIDv5 point id derived from `source#offset`, so
/// re-ingesting the same corpus produces the same ids.
fn stable_point_id(chunk_id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, chunk_id.as_bytes())
}

/// Builds a Qdrant point from an entry: stable id, vector, compact payload.
fn build_point(entry: IndexEntry) -> PointStruct {
    let id = stable_point_id(&entry.chunk.stable_id()).to_string();
    let payload: Payload = serde_json::json!({
        "text": entry.chunk.text,
        "source": entry.chunk.source,
        "offset": entry.chunk.offset as i64,
    })
    .try_into()
    .unwrap_or_else(|_| Payload::new());
    PointStruct::new(id, entry.vector, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(dim: usize) -> IndexEntry {
        IndexEntry {
            chunk: Chunk {
                text: "worked at Orange".into(),
                source: "cv.md".into(),
                offset: 0,
            },
            vector: vec![0.5; dim],
        }
    }

    #[test]
    fn dimension_check_accepts_matching_vectors() {
        assert!(check_dimensions(&[entry(768), entry(768)], 768).is_ok());
    }

    #[test]
    fn dimension_check_rejects_mixed_vectors() {
        let err = check_dimensions(&[entry(768), entry(384)], 768).unwrap_err();
        assert!(matches!(
            err,
            IndexError::VectorSizeMismatch { got: 384, want: 768 }
        ));
    }

    #[test]
    fn point_ids_are_stable_across_runs() {
        let a = stable_point_id("cv.md#0");
        let b = stable_point_id("cv.md#0");
        let c = stable_point_id("cv.md#3500");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
