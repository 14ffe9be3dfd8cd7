//! Embedding executor with bounded concurrency and dimension checks.

use crate::embed::EmbeddingsProvider;
use crate::errors::IndexError;
use crate::record::{Chunk, IndexEntry};

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

/// Embeds every chunk through the provider, `concurrency` calls in flight
/// at a time, and pairs each chunk with its vector.
///
/// Output order matches the input order regardless of completion order.
///
/// # Errors
/// [`IndexError::VectorSizeMismatch`] if any vector's length differs from
/// `expected_dim`, or [`IndexError::Embedding`] if the provider fails.
pub async fn embed_chunks(
    chunks: Vec<Chunk>,
    provider: &dyn EmbeddingsProvider,
    expected_dim: usize,
    concurrency: usize,
) -> Result<Vec<IndexEntry>, IndexError> {
    info!(
        "embed_pool: embedding {} chunks with concurrency={}",
        chunks.len(),
        concurrency
    );

    let mut results: Vec<(usize, IndexEntry)> = stream::iter(chunks.into_iter().enumerate())
        .map(|(i, chunk)| async move {
            let vector = provider.embed(&chunk.text).await?;
            Ok::<(usize, IndexEntry), IndexError>((i, IndexEntry { chunk, vector }))
        })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>, IndexError>>()?;

    results.sort_by_key(|(i, _)| *i);

    for (_, entry) in &results {
        if entry.vector.len() != expected_dim {
            return Err(IndexError::VectorSizeMismatch {
                got: entry.vector.len(),
                want: expected_dim,
            });
        }
    }

    debug!("embed_pool: all vectors sized {}", expected_dim);
    Ok(results.into_iter().map(|(_, e)| e).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::testing::FixedDimEmbedder;

    fn chunks(n: usize) -> Vec<Chunk> {
        (0..n)
            .map(|i| Chunk {
                text: "x".repeat(i + 1),
                source: "cv.md".into(),
                offset: i * 10,
            })
            .collect()
    }

    #[tokio::test]
    async fn embeds_all_chunks_in_order() {
        let provider = FixedDimEmbedder(8);
        let entries = embed_chunks(chunks(5), &provider, 8, 2).await.unwrap();
        assert_eq!(entries.len(), 5);
        for (i, e) in entries.iter().enumerate() {
            assert_eq!(e.chunk.offset, i * 10);
            assert_eq!(e.vector.len(), 8);
        }
    }

    #[tokio::test]
    async fn dimension_mismatch_is_rejected() {
        let provider = FixedDimEmbedder(8);
        let err = embed_chunks(chunks(2), &provider, 768, 2).await.unwrap_err();
        assert!(matches!(
            err,
            IndexError::VectorSizeMismatch { got: 8, want: 768 }
        ));
    }
}
