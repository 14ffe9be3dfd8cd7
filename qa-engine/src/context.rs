//! Context block assembly: retrieved chunks → one bounded text block.

use cv_index::CvHit;

/// Joins hits into a single context block under a character budget.
///
/// The budget is counted in characters, not bytes, so multibyte text does
/// not shrink the usable context. Preserves ranking order. Each hit gets a
/// source attribution header, then its text; assembly stops when the
/// budget would be exceeded, with the last chunk truncated at a character
/// boundary rather than dropped whole.
pub fn build_context_block(hits: &[CvHit], max_chars: usize) -> String {
    let mut out = String::new();
    let mut budget = max_chars;

    for (i, h) in hits.iter().enumerate() {
        let header = format!("==[{}]== source: {}\n", i + 1, h.source);
        let text = h.text.trim();
        let header_chars = header.chars().count();

        if header_chars >= budget {
            break;
        }
        out.push_str(&header);
        budget -= header_chars;

        let take = budget.saturating_sub(2);
        let text_chars = text.chars().count();
        if text_chars > take {
            out.push_str(truncate_chars(text, take));
            out.push_str("\n…\n");
            break;
        }
        out.push_str(text);
        out.push_str("\n\n");
        budget = budget.saturating_sub(text_chars + 2);
    }

    out
}

fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(text: &str, source: &str, score: f32) -> CvHit {
        CvHit {
            text: text.into(),
            source: source.into(),
            score,
        }
    }

    #[test]
    fn empty_hits_yield_empty_block() {
        assert_eq!(build_context_block(&[], 1000), "");
    }

    #[test]
    fn includes_source_headers_in_rank_order() {
        let hits = vec![
            hit("led deployments", "cv.md", 0.9),
            hit("taught workshops", "projects.md", 0.5),
        ];
        let block = build_context_block(&hits, 1000);
        assert!(block.contains("==[1]== source: cv.md"));
        assert!(block.contains("==[2]== source: projects.md"));
        let first = block.find("led deployments").unwrap();
        let second = block.find("taught workshops").unwrap();
        assert!(first < second);
    }

    #[test]
    fn respects_character_budget() {
        let hits = vec![hit(&"x".repeat(500), "cv.md", 0.9)];
        let block = build_context_block(&hits, 120);
        assert!(block.chars().count() <= 122); // header + truncated text + ellipsis
        assert!(block.contains("…"));
    }

    #[test]
    fn budget_is_counted_in_characters_not_bytes() {
        // 'é' is two bytes; a byte-counted budget would halve the text here.
        let ascii = build_context_block(&[hit(&"x".repeat(500), "cv.md", 0.9)], 120);
        let accented = build_context_block(&[hit(&"é".repeat(500), "cv.md", 0.9)], 120);
        assert_eq!(ascii.chars().count(), accented.chars().count());
    }

    #[test]
    fn truncation_never_splits_a_char() {
        let hits = vec![hit(&"é".repeat(200), "cv.md", 0.9)];
        let block = build_context_block(&hits, 100);
        // Would panic during slicing if a boundary were violated; also
        // re-validate the output is well-formed UTF-8 end to end.
        assert!(block.chars().count() > 0);
    }
}
