//! Observational progress notifications.
//!
//! Events never influence the pipeline; they exist so a host can show what
//! the compressor is doing while it waits on the generator.

use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    PassStarted { depth: usize, chunks: usize, tokens: usize },
    ChunkStarted { depth: usize, index: usize, total: usize },
    ChunkFinished { depth: usize, index: usize, total: usize },
    PassFinished { depth: usize, tokens: usize },
    Converged { depth: usize, tokens: usize },
    RewriteStarted { tokens: usize },
    RewriteFinished { tokens: usize },
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: &ProgressEvent);
}

/// Writes progress to the `tracing` subscriber.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn emit(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::PassStarted { depth, chunks, tokens } => {
                info!(depth, chunks, tokens, "compression pass started")
            }
            ProgressEvent::ChunkStarted { depth, index, total } => {
                debug!(depth, chunk = index + 1, total, "summarizing chunk")
            }
            ProgressEvent::ChunkFinished { depth, index, total } => {
                debug!(depth, chunk = index + 1, total, "chunk summarized")
            }
            ProgressEvent::PassFinished { depth, tokens } => {
                info!(depth, tokens, "compression pass finished")
            }
            ProgressEvent::Converged { depth, tokens } => info!(depth, tokens, "converged"),
            ProgressEvent::RewriteStarted { tokens } => info!(tokens, "final rewrite started"),
            ProgressEvent::RewriteFinished { tokens } => info!(tokens, "final rewrite finished"),
        }
    }
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&self, _event: &ProgressEvent) {}
}
