//! Document loader: reads `.md`/`.txt` files from the data directory.

use crate::errors::IndexError;
use crate::normalize::normalize_text_light;
use crate::record::Document;

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Loads every `.md` and `.txt` file directly under `dir`.
///
/// Files are sorted by name so ingest is deterministic; subdirectories
/// and other extensions are skipped. Text is normalized (trailing
/// whitespace trimmed, blank runs collapsed) before chunking.
///
/// # Errors
/// - [`IndexError::Io`] if the directory cannot be read.
/// - [`IndexError::Ingest`] if no loadable documents are found.
pub fn load_documents(dir: impl AsRef<Path>) -> Result<Vec<Document>, IndexError> {
    let dir = dir.as_ref();
    info!("Loading documents from {:?}", dir);

    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && has_supported_extension(p))
        .collect();
    paths.sort();

    let mut docs = Vec::with_capacity(paths.len());
    for path in paths {
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) => {
                warn!("Skipping unreadable file {:?}: {}", path, e);
                continue;
            }
        };
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!("Loaded '{}' ({} bytes)", source, text.len());
        docs.push(Document {
            text: normalize_text_light(&text),
            source,
        });
    }

    if docs.is_empty() {
        return Err(IndexError::Ingest(format!(
            "no .md or .txt documents found in {:?}",
            dir
        )));
    }

    info!("Loaded {} documents", docs.len());
    Ok(docs)
}

fn has_supported_extension(p: &Path) -> bool {
    matches!(
        p.extension().and_then(|e| e.to_str()),
        Some("md") | Some("txt")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions() {
        assert!(has_supported_extension(Path::new("cv.md")));
        assert!(has_supported_extension(Path::new("notes.txt")));
        assert!(!has_supported_extension(Path::new("photo.png")));
        assert!(!has_supported_extension(Path::new("README")));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let err = load_documents("/nonexistent/cv-data").unwrap_err();
        assert!(matches!(err, IndexError::Io(_)));
    }

    #[test]
    fn loads_and_sorts_documents() {
        let dir = std::env::temp_dir().join(format!("cv_loader_test_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("b_projects.txt"), "projects  \n").unwrap();
        fs::write(dir.join("a_cv.md"), "# CV\n\n\ntext").unwrap();
        fs::write(dir.join("ignored.pdf"), "binary").unwrap();

        let docs = load_documents(&dir).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].source, "a_cv.md");
        assert_eq!(docs[0].text, "# CV\n\ntext\n");
        assert_eq!(docs[1].source, "b_projects.txt");
        assert_eq!(docs[1].text, "projects\n");
    }
}
