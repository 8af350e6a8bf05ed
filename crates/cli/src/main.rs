mod cli;
mod inputs;
mod report;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info, warn};

use zipper_compress::{
    compose, load_document, CancelToken, CompressionRequest, Compressor, LogProgress, Verifier,
};
use zipper_core::config::{load_dotenv, Config};
use zipper_llm::{create_provider, ProviderGenerator, TextGenerator};

use crate::cli::CliArgs;

const SYSTEM_PROMPT: &str =
    "You condense documents. Never add facts that are not in the text you are given.";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    load_dotenv();
    let mut config = Config::from_env();
    args.apply(&mut config);
    config.log_summary();
    debug!(config = %config.redacted_summary(), "effective configuration");
    config
        .compression
        .validate()
        .context("invalid compression settings")?;

    let documents = inputs::collect(&args.paths);
    if documents.is_empty() {
        anyhow::bail!("No documents to summarize");
    }

    let provider =
        create_provider(&config.llm, &config.ollama).context("failed to create LLM provider")?;
    info!(provider = provider.name(), "LLM provider ready");
    let generator: Arc<dyn TextGenerator> = Arc::new(
        ProviderGenerator::new(provider, config.llm.temperature).with_system_prompt(SYSTEM_PROMPT),
    );
    let tokenizer_kind = args.tokenizer_kind(&config);
    let tokenizer = tokenizer_kind
        .build()
        .context("failed to load tokenizer")?;
    info!(tokenizer = ?tokenizer_kind, "Tokenizer ready");

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling");
                cancel.cancel();
            }
        });
    }

    let compressor = Compressor::new(
        generator.clone(),
        tokenizer.clone(),
        config.compression.clone(),
    )
    .with_progress(Arc::new(LogProgress))
    .with_cancel(cancel.clone());
    let verifier = args.verify.then(|| {
        Verifier::new(
            generator.clone(),
            tokenizer.clone(),
            config.compression.effective_chunk_size(),
        )
    });
    let request = args.request(&config.compression);

    let job = Job {
        compressor: &compressor,
        request: &request,
        verifier: verifier.as_ref(),
        output_dir: config.output.dir.as_deref(),
        json: args.json,
    };

    let mut failures = 0usize;
    for (i, path) in documents.iter().enumerate() {
        if cancel.is_cancelled() {
            warn!(
                remaining = documents.len() - i,
                "Cancelled, skipping remaining documents"
            );
            break;
        }
        if let Err(e) = job.run(path).await {
            failures += 1;
            error!(path = %path.display(), "{:#}", e);
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} documents failed", failures, documents.len());
    }
    Ok(())
}

/// Everything needed to summarize one document, shared across the batch.
struct Job<'a> {
    compressor: &'a Compressor,
    request: &'a CompressionRequest,
    verifier: Option<&'a Verifier>,
    output_dir: Option<&'a Path>,
    json: bool,
}

impl Job<'_> {
    async fn run(&self, path: &Path) -> Result<()> {
        let doc = load_document(path)?;
        let result = self
            .compressor
            .compress(&doc, self.request)
            .await
            .with_context(|| format!("failed to summarize {}", doc.name()))?;
        info!(
            document = doc.name(),
            depth = result.depth,
            tokens = result.token_count,
            source_tokens = result.source_tokens,
            "Summary ready"
        );

        let verdict = match self.verifier {
            Some(v) => {
                let verdict = v.verify(doc.text(), &result.text).await;
                info!(document = doc.name(), ?verdict, "Verification finished");
                Some(verdict)
            }
            None => None,
        };

        let composed = compose(&doc, &result, self.output_dir);
        let report = report::render(&doc, &result, verdict.as_ref(), composed, self.json)?;
        print!("{}", report.stdout);
        match report.save_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
