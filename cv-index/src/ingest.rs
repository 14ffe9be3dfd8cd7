//! Offline ingest pipeline: load → chunk → embed → rebuild → upsert.
//!
//! Runs from the `ingest` binary before the service starts, never
//! concurrently with serving traffic. Any failure aborts the pipeline.

use crate::CvIndex;
use crate::chunker::chunk_document;
use crate::embed::EmbeddingsProvider;
use crate::embed_pool::embed_chunks;
use crate::errors::IndexError;
use crate::record::Chunk;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

/// Summary of one ingest run.
#[derive(Debug, Clone)]
pub struct IngestStats {
    pub documents: usize,
    pub chunks: usize,
    pub points: u64,
    pub dimension: usize,
    pub collection: String,
}

/// Runs the full pipeline against the index's configured data directory.
///
/// 1. Load `.md`/`.txt` documents (normalized, sorted by name).
/// 2. Chunk each into overlapping character windows.
/// 3. Embed all chunks with bounded concurrency.
/// 4. Drop and recreate the collection with the configured dimension.
/// 5. Upsert in batches with a progress bar.
///
/// # Errors
/// Propagates loader, embedding, and store errors; the collection is only
/// rebuilt after every chunk has been embedded successfully, so a provider
/// failure leaves the previous index intact.
pub async fn run_ingest(
    index: &CvIndex,
    provider: &dyn EmbeddingsProvider,
) -> Result<IngestStats, IndexError> {
    let cfg = index.config().clone();
    info!(
        "Ingest starting: data_dir={} collection={} dim={}",
        cfg.data_dir, cfg.collection, cfg.embedding_dim
    );

    let documents = crate::loader::load_documents(&cfg.data_dir)?;

    let mut chunks: Vec<Chunk> = Vec::new();
    for doc in &documents {
        chunks.extend(chunk_document(doc, cfg.chunk_size, cfg.chunk_overlap));
    }
    if chunks.is_empty() {
        return Err(IndexError::Ingest(
            "documents produced zero chunks".into(),
        ));
    }
    info!("Chunked {} documents into {} chunks", documents.len(), chunks.len());

    let entries = embed_chunks(
        chunks,
        provider,
        cfg.embedding_dim,
        cfg.embed_concurrency,
    )
    .await?;

    index.rebuild().await?;

    let total_batches = entries.len().div_ceil(cfg.upsert_batch);
    let pb = ProgressBar::new(total_batches as u64);
    match ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
    ) {
        Ok(style) => pb.set_style(style.progress_chars("##-")),
        Err(e) => warn!("progress style template rejected: {e}"),
    }

    let chunk_count = entries.len();
    let mut points: u64 = 0;
    for batch in entries.chunks(cfg.upsert_batch.max(1)) {
        points += index.upsert(batch.to_vec()).await?;
        pb.inc(1);
    }
    pb.finish_with_message("Ingestion complete");

    let stats = IngestStats {
        documents: documents.len(),
        chunks: chunk_count,
        points,
        dimension: cfg.embedding_dim,
        collection: cfg.collection.clone(),
    };
    info!(
        "Ingest finished: {} documents, {} chunks, {} points",
        stats.documents, stats.chunks, stats.points
    );
    Ok(stats)
}
