//! Tokenizer adapters.
//!
//! Budgets are expressed in tokens, so every size decision in the pipeline
//! goes through a `Tokenizer`. `BpeTokenizer` counts the way OpenAI and
//! Anthropic models do; the other two are approximations for local models.

use serde::{Deserialize, Serialize};
use tiktoken_rs::CoreBPE;

use crate::error::ZipError;

/// An opaque unit of text produced by a tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token(String);

impl Token {
    pub fn new(piece: impl Into<String>) -> Self {
        Self(piece.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Converts text to tokens and back.
///
/// `detokenize(tokenize(x))` must produce text usable for further chunking;
/// byte identity is not required.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn detokenize(&self, tokens: &[Token]) -> String;

    /// Number of tokens in `text`.
    fn count(&self, text: &str) -> usize {
        self.tokenize(text).len()
    }
}

/// One token per whitespace-separated word.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split_whitespace().map(Token::new).collect()
    }

    fn detokenize(&self, tokens: &[Token]) -> String {
        tokens.iter().map(Token::as_str).collect::<Vec<_>>().join(" ")
    }

    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

/// Roughly four characters per token, the usual estimate for English BPE
/// vocabularies. Round trips are lossless.
#[derive(Debug, Clone, Copy)]
pub struct CharEstimateTokenizer {
    chars_per_token: usize,
}

impl CharEstimateTokenizer {
    pub fn new(chars_per_token: usize) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }
}

impl Default for CharEstimateTokenizer {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Tokenizer for CharEstimateTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(self.chars_per_token)
            .map(|piece| Token::new(piece.iter().collect::<String>()))
            .collect()
    }

    fn detokenize(&self, tokens: &[Token]) -> String {
        tokens.iter().map(Token::as_str).collect()
    }

    fn count(&self, text: &str) -> usize {
        text.chars().count().div_ceil(self.chars_per_token)
    }
}

/// BPE tokens from the `cl100k_base` vocabulary (GPT-4 family, close to
/// Claude's counts).
///
/// Tokens that split a multi-byte character are merged until the bytes
/// decode, so `tokenize` may return slightly fewer tokens than `count`.
/// Round trips are lossless.
pub struct BpeTokenizer {
    bpe: CoreBPE,
}

impl BpeTokenizer {
    pub fn cl100k() -> Result<Self, ZipError> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| {
            ZipError::TokenizerUnavailable(format!("failed to load cl100k_base: {e}"))
        })?;
        Ok(Self { bpe })
    }
}

impl Tokenizer for BpeTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut pending = Vec::new();
        for id in self.bpe.encode_ordinary(text) {
            pending.push(id);
            if let Ok(piece) = self.bpe.decode(pending.clone()) {
                tokens.push(Token::new(piece));
                pending.clear();
            }
        }
        tokens
    }

    fn detokenize(&self, tokens: &[Token]) -> String {
        tokens.iter().map(Token::as_str).collect()
    }

    fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}
