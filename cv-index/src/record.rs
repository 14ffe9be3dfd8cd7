//! Core data records: documents, chunks, index entries, query hits.

use serde::{Deserialize, Serialize};

/// A source document loaded from the data directory.
///
/// Immutable once loaded; superseded only by re-running ingest.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    /// Full document text (normalized).
    pub text: String,
    /// File path relative to the data directory.
    pub source: String,
}

/// A bounded-length character window extracted from a [`Document`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text.
    pub text: String,
    /// Source document path.
    pub source: String,
    /// Starting character position within the document.
    pub offset: usize,
}

impl Chunk {
    /// Stable identifier used to derive the Qdrant point id.
    pub fn stable_id(&self) -> String {
        format!("{}#{}", self.source, self.offset)
    }
}

/// A chunk paired with its embedding vector, ready for upsert.
#[derive(Clone, Debug)]
pub struct IndexEntry {
    pub chunk: Chunk,
    pub vector: Vec<f32>,
}

/// A single similarity-search hit, ordered by descending score.
#[derive(Clone, Debug, Serialize)]
pub struct CvHit {
    /// Chunk text stored in the point payload.
    pub text: String,
    /// Source document path.
    pub source: String,
    /// Cosine similarity score (1 = identical, can be negative).
    pub score: f32,
}

impl CvHit {
    /// Builds a hit from a Qdrant `(score, payload)` pair.
    ///
    /// Missing payload fields degrade to empty strings rather than
    /// dropping the hit; the score is what retrieval ranks on.
    pub fn from_payload(score: f32, payload: &serde_json::Value) -> Self {
        let text = payload
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let source = payload
            .get("source")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        Self {
            text,
            source,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hit_from_payload_reads_text_and_source() {
        let payload = json!({"text": "led the Angular migration", "source": "cv.md", "offset": 0});
        let hit = CvHit::from_payload(0.87, &payload);
        assert_eq!(hit.text, "led the Angular migration");
        assert_eq!(hit.source, "cv.md");
        assert!((hit.score - 0.87).abs() < f32::EPSILON);
    }

    #[test]
    fn hit_from_partial_payload_degrades_to_empty() {
        let hit = CvHit::from_payload(0.5, &json!({"source": "cv.md"}));
        assert_eq!(hit.text, "");
        assert_eq!(hit.source, "cv.md");
    }

    #[test]
    fn chunk_stable_id_combines_source_and_offset() {
        let c = Chunk {
            text: "x".into(),
            source: "docs/cv.md".into(),
            offset: 3500,
        };
        assert_eq!(c.stable_id(), "docs/cv.md#3500");
    }
}
