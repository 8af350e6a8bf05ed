use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Stem used when a document has no usable file name.
const FALLBACK_STEM: &str = "document";

/// A loaded document: raw text plus the path it came from.
///
/// Immutable once constructed; the pipeline borrows it for the duration of
/// one compression run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    path: PathBuf,
    text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// File name including extension, used as the human-readable identifier.
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(FALLBACK_STEM)
    }

    /// File name without extension, used to derive output file names.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(FALLBACK_STEM)
    }

    /// True when the document has no non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
