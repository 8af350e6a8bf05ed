//! Token-bounded document chunking.
//!
//! Splits text into newline-delimited paragraphs (falling back to sentences
//! for oversized paragraphs), then packs them greedily into chunks that stay
//! within a token budget, optionally overlapping adjacent chunks.

mod helpers;
mod packer;
mod types;

pub use packer::chunk_text;
pub use types::{Chunk, ChunkConfig};

#[cfg(test)]
mod tests;
