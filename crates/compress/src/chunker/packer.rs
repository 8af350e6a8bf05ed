//! Greedy packing of units into token-bounded chunks.

use super::helpers::{overlap_seed, split_units, Unit};
use super::types::{Chunk, ChunkConfig};
use crate::tokenizer::Tokenizer;

/// Chunk `text` so that every chunk stays within `config.max_chunk_tokens`
/// as measured by `tokenizer`.
///
/// A unit that alone exceeds the budget is emitted whole as its own chunk
/// (flagged `oversized`) rather than truncated. Empty input yields no chunks.
pub fn chunk_text(text: &str, config: &ChunkConfig, tokenizer: &dyn Tokenizer) -> Vec<Chunk> {
    let max_tokens = config.max_chunk_tokens.max(1);
    let units = split_units(text, max_tokens, config.boundary_safe, tokenizer);

    let mut packer = Packer {
        overlap_tokens: config.overlap_tokens,
        max_tokens,
        tokenizer,
        chunks: Vec::new(),
        current: None,
        previous: None,
    };
    for unit in units {
        packer.push(unit);
    }
    packer.finish()
}

/// A chunk still accepting units.
struct OpenChunk {
    text: String,
    tokens: usize,
    overlap_tokens: usize,
    body_offset: usize,
}

struct Packer<'a> {
    overlap_tokens: usize,
    max_tokens: usize,
    tokenizer: &'a dyn Tokenizer,
    chunks: Vec<Chunk>,
    current: Option<OpenChunk>,
    /// Text of the last closed chunk, source of the next overlap seed.
    previous: Option<String>,
}

impl Packer<'_> {
    fn push(&mut self, unit: Unit) {
        if unit.tokens > self.max_tokens {
            self.close();
            let whole = OpenChunk {
                text: unit.text,
                tokens: unit.tokens,
                overlap_tokens: 0,
                body_offset: 0,
            };
            self.emit(whole, true);
            return;
        }

        if let Some(open) = self.current.as_mut() {
            let candidate = format!("{}{}{}", open.text, unit.joiner.as_str(), unit.text);
            let tokens = self.tokenizer.count(&candidate);
            if tokens <= self.max_tokens {
                open.text = candidate;
                open.tokens = tokens;
                return;
            }
            self.close();
        }
        self.current = Some(self.open_with(unit));
    }

    /// Start a chunk with `unit`, seeded with the tail of the previous chunk
    /// when overlap is enabled and the seed still fits.
    fn open_with(&self, unit: Unit) -> OpenChunk {
        let room = self.max_tokens - unit.tokens;
        let seed = self
            .previous
            .as_deref()
            .and_then(|prev| overlap_seed(prev, self.overlap_tokens, room, self.tokenizer));

        if let Some((seed, seed_tokens)) = seed {
            let joiner = unit.joiner.as_str();
            let text = format!("{seed}{joiner}{}", unit.text);
            let tokens = self.tokenizer.count(&text);
            // Tokenizers are not always additive across joins.
            if tokens <= self.max_tokens {
                return OpenChunk {
                    body_offset: seed.len() + joiner.len(),
                    text,
                    tokens,
                    overlap_tokens: seed_tokens,
                };
            }
        }

        OpenChunk {
            text: unit.text,
            tokens: unit.tokens,
            overlap_tokens: 0,
            body_offset: 0,
        }
    }

    fn close(&mut self) {
        if let Some(open) = self.current.take() {
            self.emit(open, false);
        }
    }

    fn emit(&mut self, open: OpenChunk, oversized: bool) {
        self.previous = Some(open.text.clone());
        self.chunks.push(Chunk {
            index: self.chunks.len(),
            text: open.text,
            token_count: open.tokens,
            overlap_token_count: open.overlap_tokens,
            oversized,
            body_offset: open.body_offset,
        });
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.close();
        self.chunks
    }
}
