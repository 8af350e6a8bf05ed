//! Final output assembly and optional persistence.

use std::path::{Path, PathBuf};

use tracing::info;
use zipper_core::Document;

use crate::compressor::SummaryResult;
use crate::error::ZipError;

const SUMMARY_SUFFIX: &str = "_summary.txt";

/// The presentable summary and, when persisted, where it went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedOutput {
    pub text: String,
    pub saved_to: Option<PathBuf>,
}

/// `<dir>/<stem>_summary.txt` for `doc`.
pub fn summary_path(dir: &Path, doc: &Document) -> PathBuf {
    dir.join(format!("{}{SUMMARY_SUFFIX}", doc.stem()))
}

/// Prefix the summary with a header naming its source and, if
/// `destination` is given, write the summary text there.
///
/// The file is overwritten in place and the directory must already exist.
/// When the write fails the composed text travels inside
/// [`ZipError::PersistenceFailed`].
pub fn compose(
    doc: &Document,
    result: &SummaryResult,
    destination: Option<&Path>,
) -> Result<ComposedOutput, ZipError> {
    let text = format!("# Summary of {}\n\n{}\n", doc.name(), result.text);

    let Some(dir) = destination else {
        return Ok(ComposedOutput {
            text,
            saved_to: None,
        });
    };

    let path = summary_path(dir, doc);
    if let Err(source) = std::fs::write(&path, &result.text) {
        return Err(ZipError::PersistenceFailed {
            path,
            composed: text,
            source,
        });
    }
    info!(path = %path.display(), bytes = result.text.len(), "summary saved");

    Ok(ComposedOutput {
        text,
        saved_to: Some(path),
    })
}
