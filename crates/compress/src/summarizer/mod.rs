//! Per-chunk summarization through an external text generator.

mod directive;
mod prompt;

pub use directive::Directive;
pub use prompt::{Instruction, InstructionKind};

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;
use zipper_core::config::CompressionConfig;
use zipper_llm::TextGenerator;

use crate::cancel::CancelToken;
use crate::error::ZipError;
use crate::progress::{NoProgress, ProgressEvent, ProgressSink};

/// Limits applied to every generation call.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub max_output_tokens: u32,
    pub timeout: Duration,
    pub retry_once: bool,
}

impl GenerationSettings {
    pub fn from_config(config: &CompressionConfig) -> Self {
        Self {
            max_output_tokens: config.max_output_tokens,
            timeout: Duration::from_secs(config.generation_timeout_secs),
            retry_once: config.retry_once,
        }
    }
}

/// Where a chunk sits in the run: pass depth, position, pass size.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub depth: usize,
    pub index: usize,
    pub total: usize,
}

pub struct Summarizer {
    generator: Arc<dyn TextGenerator>,
    settings: GenerationSettings,
    cancel: CancelToken,
    progress: Arc<dyn ProgressSink>,
}

impl Summarizer {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings,
            cancel: CancelToken::new(),
            progress: Arc::new(NoProgress),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Summarize one chunk and return the generator output verbatim.
    ///
    /// A failed, empty or timed-out call is retried once when enabled; the
    /// second failure is returned as is.
    pub async fn summarize_chunk(
        &self,
        chunk: &str,
        instruction: &Instruction,
        step: Step,
    ) -> Result<String, ZipError> {
        let position = (step.total > 1).then_some((step.index, step.total));
        let prompt = instruction.render(chunk, position);

        self.progress.emit(&ProgressEvent::ChunkStarted {
            depth: step.depth,
            index: step.index,
            total: step.total,
        });

        let summary = match self.generate(&prompt, step).await {
            Err(e) if self.settings.retry_once && e.is_retryable() => {
                warn!(
                    depth = step.depth,
                    chunk = step.index,
                    error = %e,
                    "generation failed, retrying once"
                );
                self.generate(&prompt, step).await?
            }
            other => other?,
        };

        self.progress.emit(&ProgressEvent::ChunkFinished {
            depth: step.depth,
            index: step.index,
            total: step.total,
        });
        Ok(summary)
    }

    async fn generate(&self, prompt: &str, step: Step) -> Result<String, ZipError> {
        if self.cancel.is_cancelled() {
            return Err(ZipError::Cancelled);
        }

        let call = tokio::time::timeout(
            self.settings.timeout,
            self.generator.generate(prompt, self.settings.max_output_tokens),
        );
        let outcome = tokio::select! {
            _ = self.cancel.cancelled() => return Err(ZipError::Cancelled),
            outcome = call => outcome,
        };

        match outcome {
            Err(_) => Err(ZipError::GenerationTimedOut {
                depth: step.depth,
                chunk: step.index,
                timeout: self.settings.timeout,
            }),
            Ok(Err(source)) => Err(ZipError::GenerationFailed {
                depth: step.depth,
                chunk: step.index,
                source,
            }),
            Ok(Ok(text)) if text.trim().is_empty() => Err(ZipError::EmptyGeneration {
                depth: step.depth,
                chunk: step.index,
            }),
            Ok(Ok(text)) => Ok(text),
        }
    }
}
