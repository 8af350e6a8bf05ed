//! Document loading: read a file, extract its text by type, reject blanks.

mod md;
mod pdf;
mod txt;

use std::path::Path;

use thiserror::Error;
use tracing::debug;
use zipper_core::Document;

use crate::error::ZipError;

/// File extensions `load_document` knows how to extract.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown", "pdf"];

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
}

/// True if `path` has an extension `load_document` can extract.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Extract text from file bytes based on the file extension.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractionError> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "pdf" => pdf::extract_pdf(bytes),
        "txt" | "text" => Ok(txt::extract_txt(bytes)),
        "md" | "markdown" => Ok(md::extract_md(bytes)),
        other => Err(ExtractionError::UnsupportedType(other.to_string())),
    }
}

/// Read and extract a document from disk.
///
/// Unreadable files, unsupported types and documents without any text all
/// surface as `ZipError::DocumentUnreadable`.
pub fn load_document(path: &Path) -> Result<Document, ZipError> {
    let unreadable = |reason: String| ZipError::DocumentUnreadable {
        path: path.to_path_buf(),
        reason,
    };

    let bytes = std::fs::read(path).map_err(|e| unreadable(e.to_string()))?;
    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let text = extract_text(&bytes, filename).map_err(|e| unreadable(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(unreadable("no extractable text".to_string()));
    }

    debug!(path = %path.display(), chars = text.len(), "document loaded");
    Ok(Document::new(path, text))
}
