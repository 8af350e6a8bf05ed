//! Unit splitting and overlap utilities used by the packer.

use crate::tokenizer::Tokenizer;

/// How a unit attaches to the text before it inside a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Joiner {
    /// Starts a new paragraph.
    Line,
    /// Continues the paragraph of the previous unit (sentence fallback).
    Space,
}

impl Joiner {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Joiner::Line => "\n",
            Joiner::Space => " ",
        }
    }
}

/// The smallest piece of text the packer never splits.
#[derive(Debug, Clone)]
pub(crate) struct Unit {
    pub text: String,
    pub tokens: usize,
    pub joiner: Joiner,
}

/// Split `text` into paragraphs (one per non-blank line). With
/// `boundary_safe`, a paragraph over `max_tokens` is broken into sentences;
/// a sentence that is still too large stays whole.
pub(crate) fn split_units(
    text: &str,
    max_tokens: usize,
    boundary_safe: bool,
    tokenizer: &dyn Tokenizer,
) -> Vec<Unit> {
    let mut units = Vec::new();

    for para in text.lines() {
        let para = para.trim();
        if para.is_empty() {
            continue;
        }
        let tokens = tokenizer.count(para);
        if tokens <= max_tokens || !boundary_safe {
            units.push(Unit {
                text: para.to_string(),
                tokens,
                joiner: Joiner::Line,
            });
            continue;
        }

        for (i, sentence) in split_sentences(para).into_iter().enumerate() {
            let tokens = tokenizer.count(&sentence);
            units.push(Unit {
                text: sentence,
                tokens,
                joiner: if i == 0 { Joiner::Line } else { Joiner::Space },
            });
        }
    }
    units
}

/// Split `text` after `.`, `!` or `?` when followed by whitespace or the end
/// of input. Returns non-empty, trimmed fragments.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;

    for (i, &b) in bytes.iter().enumerate() {
        if !matches!(b, b'.' | b'!' | b'?') {
            continue;
        }
        let at_boundary = bytes.get(i + 1).map_or(true, |b| b.is_ascii_whitespace());
        if at_boundary {
            let s = text[start..=i].trim();
            if !s.is_empty() {
                sentences.push(s.to_string());
            }
            start = i + 1;
        }
    }

    // Remainder without terminal punctuation.
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

/// The last `min(overlap_tokens, room)` tokens of `previous`, re-materialized
/// through the tokenizer. Returns the seed text and its token count.
pub(crate) fn overlap_seed(
    previous: &str,
    overlap_tokens: usize,
    room: usize,
    tokenizer: &dyn Tokenizer,
) -> Option<(String, usize)> {
    let wanted = overlap_tokens.min(room);
    if wanted == 0 {
        return None;
    }
    let tokens = tokenizer.tokenize(previous);
    let tail = &tokens[tokens.len().saturating_sub(wanted)..];
    let seed = tokenizer.detokenize(tail);
    let seed = seed.trim();
    if seed.is_empty() {
        return None;
    }
    Some((seed.to_string(), tail.len()))
}
