use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use zipper_compress::{
    BpeTokenizer, CharEstimateTokenizer, CompressionRequest, Tokenizer, WhitespaceTokenizer,
    ZipError,
};
use zipper_core::config::{CompressionConfig, Config};

/// Compress long documents into summaries that fit a token budget.
///
/// Each document is split into chunks, every chunk is summarized by the
/// configured LLM, and the pieces are recombined until the result is small
/// enough. Settings default to `ZIPPER_*` environment variables; flags win.
#[derive(Parser, Debug)]
#[command(name = "docs-zipper", about = "Summarize long documents recursively")]
pub struct CliArgs {
    /// Files or directories (.txt, .md, .pdf) to summarize
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Maximum tokens in the final summary
    #[arg(long, short = 't')]
    pub target_size: Option<usize>,

    /// Tokens per chunk (default: 60% of the context window)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Model context window in tokens
    #[arg(long)]
    pub context_window: Option<usize>,

    /// Tokens repeated from the previous chunk
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Maximum number of summarization passes
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Chunks summarized in parallel within a pass
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Directory receiving <name>_summary.txt files (must exist)
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Keep the document title
    #[arg(long)]
    pub preserve_title: bool,

    /// Keep author names
    #[arg(long)]
    pub preserve_authors: bool,

    /// Keep reported results and figures
    #[arg(long)]
    pub preserve_results: bool,

    /// Answer in the language of the source
    #[arg(long)]
    pub keep_same_language: bool,

    /// Write the summary in this language
    #[arg(long)]
    pub translate_to: Option<String>,

    /// Extra context about the document for the model
    #[arg(long)]
    pub hint: Option<String>,

    /// Drop everything that is not essential
    #[arg(long)]
    pub maximum_compression: bool,

    /// Polish the converged summary with one rewrite pass
    #[arg(long)]
    pub final_rewrite: bool,

    /// Ask the model whether the summary is faithful to the source
    #[arg(long)]
    pub verify: bool,

    /// Print results as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// How tokens are counted (default: bpe for openai/anthropic, words otherwise)
    #[arg(long, value_enum, env = "ZIPPER_TOKENIZER")]
    pub tokenizer: Option<TokenizerKind>,

    /// LLM provider: openai, anthropic, or ollama
    #[arg(long)]
    pub provider: Option<String>,

    /// Model name override for the selected provider
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TokenizerKind {
    /// cl100k_base BPE tokens, as counted by OpenAI and Anthropic models
    Bpe,
    /// One token per word
    Whitespace,
    /// Roughly four characters per token
    Chars,
}

impl TokenizerKind {
    /// Counting that matches `provider`'s budgets when no choice was made.
    pub fn for_provider(provider: &str) -> Self {
        match provider {
            "openai" | "anthropic" | "claude" => TokenizerKind::Bpe,
            _ => TokenizerKind::Whitespace,
        }
    }

    pub fn build(self) -> Result<Arc<dyn Tokenizer>, ZipError> {
        let tokenizer: Arc<dyn Tokenizer> = match self {
            TokenizerKind::Bpe => Arc::new(BpeTokenizer::cl100k()?),
            TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer),
            TokenizerKind::Chars => Arc::new(CharEstimateTokenizer::default()),
        };
        Ok(tokenizer)
    }
}

impl CliArgs {
    /// Layer command-line overrides on top of the environment config.
    pub fn apply(&self, config: &mut Config) {
        let c = &mut config.compression;
        if let Some(v) = self.target_size {
            c.target_size = v;
        }
        if let Some(v) = self.chunk_size {
            c.chunk_size = Some(v);
        }
        if let Some(v) = self.context_window {
            c.context_window = v;
        }
        if let Some(v) = self.overlap {
            c.overlap_tokens = v;
        }
        if let Some(v) = self.max_depth {
            c.max_depth = v;
        }
        if let Some(v) = self.concurrency {
            c.concurrency = v;
        }
        if self.final_rewrite {
            c.final_rewrite = true;
        }
        if let Some(ref dir) = self.output_dir {
            config.output.dir = Some(dir.clone());
        }

        if let Some(ref provider) = self.provider {
            config.llm.provider = provider.to_lowercase();
        }
        if let Some(ref model) = self.model {
            match config.llm.provider.as_str() {
                "openai" => config.llm.openai_model = model.clone(),
                "anthropic" | "claude" => config.llm.anthropic_model = model.clone(),
                _ => config.ollama.model = model.clone(),
            }
        }
    }

    /// The tokenizer to use once the provider is known.
    pub fn tokenizer_kind(&self, config: &Config) -> TokenizerKind {
        self.tokenizer
            .unwrap_or_else(|| TokenizerKind::for_provider(&config.llm.provider))
    }

    /// The request shared by every document in this invocation.
    pub fn request(&self, config: &CompressionConfig) -> CompressionRequest {
        CompressionRequest {
            preserve_title: self.preserve_title,
            preserve_authors: self.preserve_authors,
            preserve_results: self.preserve_results,
            keep_same_language: self.keep_same_language,
            translate_to: self.translate_to.clone(),
            contextual_hint: self.hint.clone(),
            maximum_compression: self.maximum_compression,
            ..CompressionRequest::from_config(config)
        }
    }
}
