use std::path::{Path, PathBuf};

use tracing::{info, warn};
use zipper_compress::document::is_supported;

/// Expand the command-line paths into the documents to summarize.
///
/// Directories are walked recursively for supported extensions, sorted per
/// directory. Plain paths are passed through untouched so that unreadable or
/// unsupported files are reported per document instead of silently dropped.
pub fn collect(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = scan_dir(path);
            if found.is_empty() {
                warn!(dir = %path.display(), "no supported documents found");
            }
            documents.extend(found);
        } else {
            documents.push(path.clone());
        }
    }
    documents
}

fn scan_dir(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && is_supported(path) {
            found.push(path.to_path_buf());
        }
    }
    found.sort();
    info!(dir = %dir.display(), count = found.len(), "scanned directory");
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_are_walked_for_supported_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("b.md"), "b").unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::write(dir.path().join("skip.zip"), "z").unwrap();
        std::fs::write(nested.join("c.pdf"), "c").unwrap();

        let found = collect(&[dir.path().to_path_buf()]);
        assert_eq!(
            found,
            vec![
                dir.path().join("a.txt"),
                dir.path().join("b.md"),
                nested.join("c.pdf"),
            ]
        );
    }

    #[test]
    fn explicit_files_pass_through() {
        let paths = vec![PathBuf::from("missing.txt"), PathBuf::from("notes.docx")];
        assert_eq!(collect(&paths), paths);
    }
}
