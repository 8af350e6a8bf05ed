//! Chunk configuration and output types.

use serde::Serialize;

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunker.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Maximum tokens per chunk.
    pub max_chunk_tokens: usize,
    /// Tokens carried from the end of one chunk into the start of the next.
    pub overlap_tokens: usize,
    /// Split oversized paragraphs at sentence boundaries.
    pub boundary_safe: bool,
}

impl ChunkConfig {
    pub fn new(max_chunk_tokens: usize) -> Self {
        Self {
            max_chunk_tokens,
            overlap_tokens: 0,
            boundary_safe: true,
        }
    }

    pub fn with_overlap(mut self, overlap_tokens: usize) -> Self {
        self.overlap_tokens = overlap_tokens;
        self
    }

    pub fn with_boundary_safe(mut self, boundary_safe: bool) -> Self {
        self.boundary_safe = boundary_safe;
        self
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A contiguous, token-bounded piece of a document.
#[derive(Debug, Clone, Serialize)]
pub struct Chunk {
    /// 0-based position in the chunk sequence.
    pub index: usize,
    /// Full chunk text, overlap seed included.
    pub text: String,
    /// Token count of `text`.
    pub token_count: usize,
    /// Tokens at the start of `text` repeated from the previous chunk.
    pub overlap_token_count: usize,
    /// A single unit larger than the budget, kept whole.
    pub oversized: bool,
    /// Byte offset in `text` where the new content starts.
    pub(crate) body_offset: usize,
}

impl Chunk {
    /// The chunk text without the overlap seed.
    pub fn body(&self) -> &str {
        &self.text[self.body_offset..]
    }
}
