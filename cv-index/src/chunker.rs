//! Fixed-size overlapping chunker.
//!
//! Windows are measured in characters, not bytes: the corpus is CV text
//! where multi-byte characters are normal, and a byte window could split
//! a character in half.

use crate::record::{Chunk, Document};
use tracing::debug;

/// Splits a document into overlapping character windows.
///
/// Each chunk except possibly the last has exactly `chunk_size` characters;
/// chunk `i+1` starts `chunk_size - overlap` characters after chunk `i`,
/// so consecutive chunks share exactly `overlap` characters. A document
/// shorter than `chunk_size` yields a single chunk; an empty document
/// yields none.
///
/// Callers must guarantee `overlap < chunk_size` (validated at config
/// load, not here).
pub fn chunk_document(doc: &Document, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
    let chars: Vec<char> = doc.text.chars().collect();
    let total = chars.len();
    if total == 0 {
        return Vec::new();
    }
    if total <= chunk_size {
        return vec![Chunk {
            text: doc.text.clone(),
            source: doc.source.clone(),
            offset: 0,
        }];
    }

    let step = chunk_size - overlap;
    let mut out = Vec::with_capacity(total.div_ceil(step));
    let mut start = 0usize;
    loop {
        let end = (start + chunk_size).min(total);
        out.push(Chunk {
            text: chars[start..end].iter().collect(),
            source: doc.source.clone(),
            offset: start,
        });
        if end == total {
            break;
        }
        start += step;
    }

    debug!(
        "chunked '{}': {} chars -> {} chunks (size={}, overlap={})",
        doc.source,
        total,
        out.len(),
        chunk_size,
        overlap
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document {
            text: text.into(),
            source: "cv.md".into(),
        }
    }

    fn expected_count(len: usize, size: usize, overlap: usize) -> usize {
        if len <= size {
            1
        } else {
            (len - overlap).div_ceil(size - overlap)
        }
    }

    #[test]
    fn empty_document_yields_no_chunks() {
        assert!(chunk_document(&doc(""), 100, 10).is_empty());
    }

    #[test]
    fn short_document_yields_one_whole_chunk() {
        let chunks = chunk_document(&doc("short text"), 4000, 500);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "short text");
        assert_eq!(chunks[0].offset, 0);
    }

    #[test]
    fn chunk_count_matches_formula() {
        for (len, size, overlap) in [(1000, 100, 10), (250, 100, 50), (101, 100, 10), (4001, 4000, 500)] {
            let text: String = std::iter::repeat('a').take(len).collect();
            let chunks = chunk_document(&doc(&text), size, overlap);
            assert_eq!(
                chunks.len(),
                expected_count(len, size, overlap),
                "len={len} size={size} overlap={overlap}"
            );
        }
    }

    #[test]
    fn consecutive_chunks_share_exact_overlap() {
        let text: String = (0..1000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = chunk_document(&doc(&text), 100, 20);
        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].text.chars().collect();
            let next: Vec<char> = pair[1].text.chars().collect();
            let tail: String = prev[prev.len() - 20..].iter().collect();
            let head: String = next[..20.min(next.len())].iter().collect();
            assert_eq!(tail, head);
            assert_eq!(pair[1].offset, pair[0].offset + 80);
        }
    }

    #[test]
    fn chunks_cover_document_without_gaps() {
        let text: String = (0..777).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = chunk_document(&doc(&text), 100, 30);
        let mut rebuilt = String::new();
        let mut covered = 0usize;
        for c in &chunks {
            assert!(c.offset <= covered, "gap before offset {}", c.offset);
            let chars: Vec<char> = c.text.chars().collect();
            let new_part: String = chars[covered - c.offset..].iter().collect();
            rebuilt.push_str(&new_part);
            covered = c.offset + chars.len();
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn every_chunk_at_most_chunk_size_and_full_except_last() {
        let text: String = std::iter::repeat('x').take(950).collect();
        let chunks = chunk_document(&doc(&text), 100, 10);
        for (i, c) in chunks.iter().enumerate() {
            let len = c.text.chars().count();
            assert!(len <= 100);
            if i + 1 < chunks.len() {
                assert_eq!(len, 100);
            }
        }
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text: String = std::iter::repeat('é').take(300).collect();
        let chunks = chunk_document(&doc(&text), 100, 10);
        assert_eq!(chunks.len(), expected_count(300, 100, 10));
        for c in &chunks {
            assert!(c.text.chars().count() <= 100);
        }
    }
}
