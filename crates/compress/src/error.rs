use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use zipper_core::CoreError;
use zipper_llm::LlmError;

/// Everything that can abort a single compression run.
///
/// All variants are request-scoped: the caller reports them and moves on to
/// the next document.
#[derive(Debug, Error)]
pub enum ZipError {
    #[error("document unreadable: {path}: {reason}")]
    DocumentUnreadable { path: PathBuf, reason: String },

    #[error("invalid compression request: {0}")]
    InvalidRequest(String),

    #[error("compression did not converge after {depth} passes ({tokens} tokens left, target {target})")]
    CompressionDidNotConverge {
        depth: usize,
        tokens: usize,
        target: usize,
    },

    #[error("generation failed for chunk {chunk} at depth {depth}: {source}")]
    GenerationFailed {
        depth: usize,
        chunk: usize,
        #[source]
        source: LlmError,
    },

    #[error("generation returned empty output for chunk {chunk} at depth {depth}")]
    EmptyGeneration { depth: usize, chunk: usize },

    #[error("generation timed out after {timeout:?} for chunk {chunk} at depth {depth}")]
    GenerationTimedOut {
        depth: usize,
        chunk: usize,
        timeout: Duration,
    },

    #[error("tokenizer unavailable: {0}")]
    TokenizerUnavailable(String),

    #[error("compression cancelled")]
    Cancelled,

    /// The summary exists but could not be written; `composed` still holds
    /// the text so the caller can show it.
    #[error("summary computed but not saved to {path}: {source}")]
    PersistenceFailed {
        path: PathBuf,
        composed: String,
        #[source]
        source: std::io::Error,
    },
}

impl ZipError {
    /// Generation errors worth a second attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ZipError::GenerationFailed { .. }
                | ZipError::EmptyGeneration { .. }
                | ZipError::GenerationTimedOut { .. }
        )
    }
}

impl From<CoreError> for ZipError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidConfig(msg) => ZipError::InvalidRequest(msg),
        }
    }
}
