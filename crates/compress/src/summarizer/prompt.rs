//! Prompt assembly: instruction header, directive lines, content.

use super::directive::Directive;
use crate::request::CompressionRequest;

const COMPRESS_HEADER: &str = "Summarize the following chunk of a larger document.";
const REWRITE_HEADER: &str =
    "Rewrite the following document in a better way while respecting the guidelines.";
const ANSWER_DIRECTLY: &str = "Answer directly with the result and no extra comments.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionKind {
    /// Shrink a chunk during the convergence loop.
    Compress,
    /// Polish the converged text once.
    Rewrite,
}

/// An instruction plus the directives active for the run.
#[derive(Debug, Clone)]
pub struct Instruction {
    kind: InstructionKind,
    directives: Vec<Directive>,
}

impl Instruction {
    pub fn compress(request: &CompressionRequest) -> Self {
        Self {
            kind: InstructionKind::Compress,
            directives: Directive::from_request(request),
        }
    }

    pub fn rewrite(request: &CompressionRequest) -> Self {
        Self {
            kind: InstructionKind::Rewrite,
            directives: Directive::from_request(request),
        }
    }

    pub fn kind(&self) -> InstructionKind {
        self.kind
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Build the full prompt for `content`. `position` is `(index, total)`
    /// when the content is one chunk among several.
    pub fn render(&self, content: &str, position: Option<(usize, usize)>) -> String {
        let header = match self.kind {
            InstructionKind::Compress => COMPRESS_HEADER,
            InstructionKind::Rewrite => REWRITE_HEADER,
        };

        let mut prompt = String::with_capacity(content.len() + 512);
        prompt.push_str("### Instruction\n");
        prompt.push_str(header);
        prompt.push_str("\n\n### Guidelines\n");
        for directive in &self.directives {
            prompt.push_str("- ");
            prompt.push_str(&directive.render());
            prompt.push('\n');
        }
        prompt.push_str("- ");
        prompt.push_str(ANSWER_DIRECTLY);
        prompt.push_str("\n\n");

        match (self.kind, position) {
            (InstructionKind::Compress, Some((index, total))) => {
                prompt.push_str(&format!("### Document chunk {}/{}\n", index + 1, total));
            }
            (InstructionKind::Compress, None) => prompt.push_str("### Document chunk\n"),
            (InstructionKind::Rewrite, _) => prompt.push_str("### Document\n"),
        }
        prompt.push_str(content);
        prompt.push_str(match self.kind {
            InstructionKind::Compress => "\n\n### Summary\n",
            InstructionKind::Rewrite => "\n\n### Rewritten document\n",
        });
        prompt
    }
}
