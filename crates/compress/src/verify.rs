//! Optional faithfulness check of a finished summary.
//!
//! Runs after compression and only reports; it never changes the summary.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};
use zipper_llm::TextGenerator;

use crate::tokenizer::Tokenizer;

const VERIFY_PROMPT: &str = "You are checking a summary against its source document. \
Answer YES if every statement in the summary is supported by the source, \
otherwise answer NO. Reply with a single word.";

/// Tokens of output the verdict is allowed to take.
const VERDICT_TOKENS: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "detail", rename_all = "snake_case")]
pub enum Verdict {
    Faithful,
    Unfaithful,
    /// The check could not decide; carries the reason or raw reply.
    Inconclusive(String),
}

pub struct Verifier {
    generator: Arc<dyn TextGenerator>,
    tokenizer: Arc<dyn Tokenizer>,
    /// Maximum source tokens placed in the prompt.
    source_budget: usize,
}

impl Verifier {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        tokenizer: Arc<dyn Tokenizer>,
        source_budget: usize,
    ) -> Self {
        Self {
            generator,
            tokenizer,
            source_budget: source_budget.max(1),
        }
    }

    pub async fn verify(&self, source: &str, summary: &str) -> Verdict {
        let source = self.truncate(source);
        let prompt = format!(
            "### Instruction\n{VERIFY_PROMPT}\n\n### Source\n{source}\n\n### Summary\n{summary}\n\n### Answer\n"
        );

        let reply = match self.generator.generate(&prompt, VERDICT_TOKENS).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "verification call failed");
                return Verdict::Inconclusive(e.to_string());
            }
        };
        debug!(reply = reply.trim(), "verification reply");
        parse_verdict(&reply)
    }

    fn truncate(&self, source: &str) -> String {
        let tokens = self.tokenizer.tokenize(source);
        if tokens.len() <= self.source_budget {
            return source.to_string();
        }
        self.tokenizer.detokenize(&tokens[..self.source_budget])
    }
}

fn parse_verdict(reply: &str) -> Verdict {
    let first = reply
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match first.as_str() {
        "yes" => Verdict::Faithful,
        "no" => Verdict::Unfaithful,
        _ => Verdict::Inconclusive(reply.trim().to_string()),
    }
}
