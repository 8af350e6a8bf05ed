//! The recursive measure → chunk → summarize → recombine loop.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};
use zipper_core::config::CompressionConfig;
use zipper_core::Document;
use zipper_llm::TextGenerator;

use crate::cancel::CancelToken;
use crate::chunker::{chunk_text, ChunkConfig};
use crate::error::ZipError;
use crate::progress::{NoProgress, ProgressEvent, ProgressSink};
use crate::request::CompressionRequest;
use crate::summarizer::{GenerationSettings, Instruction, Step, Summarizer};
use crate::tokenizer::Tokenizer;

/// Separator placed between partial summaries when a pass is recombined.
const SUMMARY_SEPARATOR: &str = "\n\n";

/// Outcome of one successful compression run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryResult {
    pub text: String,
    /// Tokens in `text`, measured with the run's tokenizer.
    pub token_count: usize,
    /// Tokens in the source document.
    pub source_tokens: usize,
    /// Number of summarization passes. Zero when the source already fit.
    pub depth: usize,
    /// How many chunks each pass produced, in pass order.
    pub chunks_per_depth: Vec<usize>,
    /// Whether the final rewrite pass ran.
    pub rewritten: bool,
}

/// Mutable state for a single run. Never shared across runs.
struct CompressionState {
    text: String,
    tokens: usize,
    depth: usize,
    chunks_per_depth: Vec<usize>,
}

pub struct Compressor {
    generator: Arc<dyn TextGenerator>,
    tokenizer: Arc<dyn Tokenizer>,
    config: CompressionConfig,
    progress: Arc<dyn ProgressSink>,
    cancel: CancelToken,
}

impl Compressor {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        tokenizer: Arc<dyn Tokenizer>,
        config: CompressionConfig,
    ) -> Self {
        Self {
            generator,
            tokenizer,
            config,
            progress: Arc::new(NoProgress),
            cancel: CancelToken::new(),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Compress `doc` until it fits `request.target_size` tokens.
    ///
    /// Each pass chunks the current text, summarizes every chunk and joins
    /// the summaries in chunk order. At most `max_depth` passes run; a text
    /// still over target after that fails with `CompressionDidNotConverge`.
    /// The optional final rewrite is only kept when it still fits the target.
    pub async fn compress(
        &self,
        doc: &Document,
        request: &CompressionRequest,
    ) -> Result<SummaryResult, ZipError> {
        request.validate()?;
        let settings = self.run_settings(request);
        settings.validate()?;

        if doc.is_blank() {
            return Err(ZipError::DocumentUnreadable {
                path: doc.path().to_path_buf(),
                reason: "document is empty".into(),
            });
        }

        let summarizer = Summarizer::new(
            self.generator.clone(),
            GenerationSettings::from_config(&settings),
        )
        .with_cancel(self.cancel.clone())
        .with_progress(self.progress.clone());

        let chunk_config = ChunkConfig::new(settings.effective_chunk_size())
            .with_overlap(settings.overlap_tokens)
            .with_boundary_safe(settings.boundary_safe);
        let instruction = Instruction::compress(request);

        let source_tokens = self.tokenizer.count(doc.text());
        info!(
            document = doc.name(),
            source_tokens,
            target = request.target_size,
            chunk_size = chunk_config.max_chunk_tokens,
            "compressing document"
        );

        let mut state = CompressionState {
            text: doc.text().to_string(),
            tokens: source_tokens,
            depth: 0,
            chunks_per_depth: Vec::new(),
        };

        loop {
            if state.tokens <= request.target_size {
                self.progress.emit(&ProgressEvent::Converged {
                    depth: state.depth,
                    tokens: state.tokens,
                });
                break;
            }
            if state.depth >= settings.max_depth {
                return Err(ZipError::CompressionDidNotConverge {
                    depth: state.depth,
                    tokens: state.tokens,
                    target: request.target_size,
                });
            }
            if self.cancel.is_cancelled() {
                return Err(ZipError::Cancelled);
            }
            self.run_pass(
                &summarizer,
                &instruction,
                &chunk_config,
                settings.concurrency,
                &mut state,
            )
            .await?;
        }

        let mut rewritten = false;
        if settings.final_rewrite {
            self.progress
                .emit(&ProgressEvent::RewriteStarted { tokens: state.tokens });
            let step = Step {
                depth: state.depth,
                index: 0,
                total: 1,
            };
            let text = summarizer
                .summarize_chunk(&state.text, &Instruction::rewrite(request), step)
                .await?;
            let text = text.trim().to_string();
            let tokens = self.tokenizer.count(&text);
            // A rewrite that overshoots the target is dropped.
            if tokens <= request.target_size {
                state.text = text;
                state.tokens = tokens;
                rewritten = true;
            } else {
                warn!(
                    document = doc.name(),
                    tokens,
                    target = request.target_size,
                    "final rewrite exceeded target, keeping converged summary"
                );
            }
            self.progress
                .emit(&ProgressEvent::RewriteFinished { tokens: state.tokens });
        }

        Ok(SummaryResult {
            text: state.text,
            token_count: state.tokens,
            source_tokens,
            depth: state.depth,
            chunks_per_depth: state.chunks_per_depth,
            rewritten,
        })
    }

    async fn run_pass(
        &self,
        summarizer: &Summarizer,
        instruction: &Instruction,
        chunk_config: &ChunkConfig,
        concurrency: usize,
        state: &mut CompressionState,
    ) -> Result<(), ZipError> {
        let depth = state.depth + 1;
        let chunks = chunk_text(&state.text, chunk_config, self.tokenizer.as_ref());
        let total = chunks.len();
        self.progress.emit(&ProgressEvent::PassStarted {
            depth,
            chunks: total,
            tokens: state.tokens,
        });

        // `buffered` yields in submission order, so recombination follows
        // chunk index even when calls complete out of order.
        let summaries: Vec<String> = stream::iter(chunks.iter().map(|chunk| {
            let step = Step {
                depth,
                index: chunk.index,
                total,
            };
            summarizer.summarize_chunk(&chunk.text, instruction, step)
        }))
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

        let text = summaries
            .iter()
            .map(|s| s.trim())
            .collect::<Vec<_>>()
            .join(SUMMARY_SEPARATOR);
        let tokens = self.tokenizer.count(&text);
        debug!(depth, before = state.tokens, after = tokens, "pass recombined");

        state.text = text;
        state.tokens = tokens;
        state.depth = depth;
        state.chunks_per_depth.push(total);
        self.progress
            .emit(&ProgressEvent::PassFinished { depth, tokens });
        Ok(())
    }

    /// Configuration for one run: the request's sizes layered over the
    /// compressor's defaults.
    fn run_settings(&self, request: &CompressionRequest) -> CompressionConfig {
        CompressionConfig {
            target_size: request.target_size,
            chunk_size: request.chunk_size.or(self.config.chunk_size),
            ..self.config.clone()
        }
    }
}
