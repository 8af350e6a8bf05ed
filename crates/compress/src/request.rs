use serde::{Deserialize, Serialize};
use zipper_core::config::CompressionConfig;

use crate::error::ZipError;

/// What one compression run should produce. Immutable for the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionRequest {
    /// Maximum tokens for the final result.
    pub target_size: usize,
    /// Chunk size override; `None` derives it from the context window.
    pub chunk_size: Option<usize>,
    pub preserve_title: bool,
    pub preserve_authors: bool,
    pub preserve_results: bool,
    pub keep_same_language: bool,
    /// Language the summary should be written in.
    pub translate_to: Option<String>,
    /// Free-form context about the document handed to the model.
    pub contextual_hint: Option<String>,
    /// Ask the model to drop everything non-essential.
    pub maximum_compression: bool,
}

impl CompressionRequest {
    pub fn new(target_size: usize) -> Self {
        Self {
            target_size,
            ..Default::default()
        }
    }

    /// Request seeded with the configured target and chunk sizes.
    pub fn from_config(config: &CompressionConfig) -> Self {
        Self {
            target_size: config.target_size,
            chunk_size: config.chunk_size,
            ..Default::default()
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn validate(&self) -> Result<(), ZipError> {
        if self.target_size == 0 {
            return Err(ZipError::InvalidRequest("target_size must be > 0".into()));
        }
        if self.chunk_size == Some(0) {
            return Err(ZipError::InvalidRequest("chunk_size must be > 0".into()));
        }
        Ok(())
    }
}
