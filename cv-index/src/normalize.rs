//! Light text normalization applied before chunking.

/// Normalizes document text with minimal layout disruption.
///
/// - Trims trailing whitespace on each line.
/// - Collapses runs of blank lines into a single one.
/// - Preserves paragraph structure (newlines are kept).
///
/// Intentionally conservative: markdown headings, bullet lists and
/// indentation in the CV documents survive untouched.
pub fn normalize_text_light(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut blank_run = 0usize;

    for line in s.lines() {
        let line = line.trim_end();

        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }

        out.push_str(line);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_whitespace() {
        assert_eq!(normalize_text_light("hello   \nworld\t\n"), "hello\nworld\n");
    }

    #[test]
    fn collapses_blank_runs() {
        assert_eq!(normalize_text_light("a\n\n\n\nb"), "a\n\nb\n");
    }

    #[test]
    fn keeps_markdown_structure() {
        let src = "# Experience\n\n- Angular\n- Java\n";
        assert_eq!(normalize_text_light(src), src);
    }
}
