use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> bool {
    match profiled_env_opt(profile, key).as_deref() {
        Some("1") | Some("true") | Some("yes") | Some("on") => true,
        Some("0") | Some("false") | Some("no") | Some("off") => false,
        _ => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub llm: LlmConfig,
    pub ollama: OllamaConfig,
    pub compression: CompressionConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `ZIPPER_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("ZIPPER_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            llm: LlmConfig::from_env_profiled(p),
            ollama: OllamaConfig::from_env_profiled(p),
            compression: CompressionConfig::from_env_profiled(p),
            output: OutputConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  llm:         provider={}, configured={}",
            self.llm.provider,
            self.llm.is_configured()
        );
        tracing::info!("  ollama:      url={}, model={}", self.ollama.url, self.ollama.model);
        tracing::info!(
            "  compression: context_window={}, chunk_size={}, target_size={}, max_depth={}",
            self.compression.context_window,
            self.compression.effective_chunk_size(),
            self.compression.target_size,
            self.compression.max_depth
        );
        tracing::info!(
            "  output:      dir={}",
            self.output
                .dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "(none)".into())
        );
    }

    /// Return a redacted view safe for display (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "llm": {
                "provider": self.llm.provider,
                "configured": self.llm.is_configured(),
                "temperature": self.llm.temperature,
            },
            "ollama": { "url": self.ollama.url, "model": self.ollama.model },
            "compression": self.compression,
            "output": { "dir": self.output.dir },
        })
    }
}

// ── LLM (OpenAI / Anthropic) ─────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai", "anthropic", "ollama"
    pub provider: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub temperature: f32,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "LLM_PROVIDER", "ollama"),
            openai_api_key: profiled_env_opt(p, "OPENAI_API_KEY"),
            openai_model: profiled_env_or(p, "OPENAI_MODEL", "gpt-4o"),
            openai_base_url: profiled_env_opt(p, "OPENAI_BASE_URL"),
            anthropic_api_key: profiled_env_opt(p, "ANTHROPIC_API_KEY"),
            anthropic_model: profiled_env_or(p, "ANTHROPIC_MODEL", "claude-sonnet-4-5-20250929"),
            temperature: profiled_env_or(p, "LLM_TEMPERATURE", "0.1")
                .parse()
                .unwrap_or(0.1),
        }
    }

    pub fn is_configured(&self) -> bool {
        match self.provider.as_str() {
            "openai" => self.openai_api_key.is_some(),
            "anthropic" | "claude" => self.anthropic_api_key.is_some(),
            "ollama" => true,
            _ => false,
        }
    }
}

// ── Ollama (local models) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
}

impl OllamaConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            url: profiled_env_or(p, "OLLAMA_URL", "http://localhost:11434"),
            model: profiled_env_or(p, "OLLAMA_MODEL", "llama3.2"),
        }
    }
}

// ── Compression ───────────────────────────────────────────────

/// Share of the model context window given to a single chunk. The rest is
/// left for the instruction text and the generated summary.
pub const CHUNK_WINDOW_FRACTION: f64 = 0.6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    /// Model context window in tokens.
    pub context_window: usize,
    /// Explicit chunk size; `None` derives it from the context window.
    pub chunk_size: Option<usize>,
    /// Maximum tokens for the final summary.
    pub target_size: usize,
    /// Tokens carried from the end of one chunk into the next.
    pub overlap_tokens: usize,
    /// Maximum number of summarization passes before giving up.
    pub max_depth: usize,
    /// Output budget handed to the generator per call.
    pub max_output_tokens: u32,
    /// Deadline for a single generation call.
    pub generation_timeout_secs: u64,
    /// Chunks summarized concurrently within one pass.
    pub concurrency: usize,
    /// Fall back to sentence boundaries for oversized paragraphs.
    pub boundary_safe: bool,
    /// Run the rewrite pass after convergence.
    pub final_rewrite: bool,
    /// Retry a failed generation call once before giving up.
    pub retry_once: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            context_window: 4096,
            chunk_size: None,
            target_size: 1024,
            overlap_tokens: 0,
            max_depth: 8,
            max_output_tokens: 1024,
            generation_timeout_secs: 120,
            concurrency: 1,
            boundary_safe: true,
            final_rewrite: false,
            retry_once: true,
        }
    }
}

impl CompressionConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            context_window: profiled_env_usize(p, "ZIPPER_CONTEXT_WINDOW", d.context_window),
            chunk_size: profiled_env_opt(p, "ZIPPER_CHUNK_SIZE").and_then(|v| v.parse().ok()),
            target_size: profiled_env_usize(p, "ZIPPER_TARGET_SIZE", d.target_size),
            overlap_tokens: profiled_env_usize(p, "ZIPPER_OVERLAP_TOKENS", d.overlap_tokens),
            max_depth: profiled_env_usize(p, "ZIPPER_MAX_DEPTH", d.max_depth),
            max_output_tokens: profiled_env_u32(
                p,
                "ZIPPER_MAX_OUTPUT_TOKENS",
                d.max_output_tokens,
            ),
            generation_timeout_secs: profiled_env_u64(
                p,
                "ZIPPER_GENERATION_TIMEOUT_SECS",
                d.generation_timeout_secs,
            ),
            concurrency: profiled_env_usize(p, "ZIPPER_CONCURRENCY", d.concurrency),
            boundary_safe: profiled_env_bool(p, "ZIPPER_BOUNDARY_SAFE", d.boundary_safe),
            final_rewrite: profiled_env_bool(p, "ZIPPER_FINAL_REWRITE", d.final_rewrite),
            retry_once: profiled_env_bool(p, "ZIPPER_RETRY_ONCE", d.retry_once),
        }
    }

    /// Chunk size actually used: the explicit override, or 60% of the context window.
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size
            .unwrap_or_else(|| (self.context_window as f64 * CHUNK_WINDOW_FRACTION) as usize)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.target_size == 0 {
            return Err(CoreError::InvalidConfig("target_size must be > 0".into()));
        }
        if self.effective_chunk_size() == 0 {
            return Err(CoreError::InvalidConfig("chunk size must be > 0".into()));
        }
        if self.overlap_tokens >= self.effective_chunk_size() {
            return Err(CoreError::InvalidConfig(format!(
                "overlap_tokens ({}) must be smaller than the chunk size ({})",
                self.overlap_tokens,
                self.effective_chunk_size()
            )));
        }
        if self.max_depth == 0 {
            return Err(CoreError::InvalidConfig("max_depth must be > 0".into()));
        }
        if self.concurrency == 0 {
            return Err(CoreError::InvalidConfig("concurrency must be > 0".into()));
        }
        Ok(())
    }
}

// ── Output ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving `<stem>_summary.txt` files. Not created automatically.
    pub dir: Option<PathBuf>,
}

impl OutputConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            dir: profiled_env_opt(p, "ZIPPER_OUTPUT_DIR").map(PathBuf::from),
        }
    }
}
