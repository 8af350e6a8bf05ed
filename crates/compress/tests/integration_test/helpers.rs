use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use zipper_compress::{Compressor, WhitespaceTokenizer};
use zipper_core::config::CompressionConfig;
use zipper_llm::{LlmError, TextGenerator};

/// Space-separated words `{prefix}0 .. {prefix}{n-1}`.
pub fn words(prefix: &str, n: usize) -> String {
    (0..n)
        .map(|i| format!("{prefix}{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Paragraphs of the given sizes separated by blank lines.
pub fn paragraphs(sizes: &[usize]) -> String {
    sizes
        .iter()
        .enumerate()
        .map(|(p, &n)| words(&format!("p{p}w"), n))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The content section of a compress prompt.
pub fn chunk_content(prompt: &str) -> String {
    let start = prompt
        .find("### Document chunk")
        .and_then(|i| prompt[i..].find('\n').map(|j| i + j + 1))
        .unwrap_or(0);
    let end = prompt.rfind("\n\n### Summary\n").unwrap_or(prompt.len());
    prompt[start..end].to_string()
}

/// Answers every prompt with a single line of `reply_words` words and
/// records the chunk it was asked to summarize.
pub struct WordGenerator {
    reply_words: usize,
    pub calls: AtomicUsize,
    pub chunks: Mutex<Vec<String>>,
    pub prompts: Mutex<Vec<String>>,
}

impl WordGenerator {
    pub fn new(reply_words: usize) -> Arc<Self> {
        Arc::new(Self {
            reply_words,
            calls: AtomicUsize::new(0),
            chunks: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for WordGenerator {
    async fn generate(&self, prompt: &str, _max_output_tokens: u32) -> Result<String, LlmError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.chunks.lock().unwrap().push(chunk_content(prompt));
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(words(&format!("s{n}w"), self.reply_words))
    }
}

pub fn make_config(chunk_size: usize, max_depth: usize) -> CompressionConfig {
    CompressionConfig {
        chunk_size: Some(chunk_size),
        max_depth,
        ..Default::default()
    }
}

pub fn make_compressor(generator: Arc<WordGenerator>, config: CompressionConfig) -> Compressor {
    Compressor::new(generator, Arc::new(WhitespaceTokenizer), config)
}
