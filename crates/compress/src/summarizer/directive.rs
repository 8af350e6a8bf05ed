//! Content-preservation directives.
//!
//! Selecting directives from a request and rendering them to prompt text are
//! separate steps, so tests can check which directives are active without
//! matching on prose.

use crate::request::CompressionRequest;

pub(crate) const PRESERVE_TITLE: &str = "Preserve the document title if one is provided.";
pub(crate) const PRESERVE_AUTHORS: &str = "Preserve the names of the authors if they are provided.";
pub(crate) const PRESERVE_RESULTS: &str =
    "Preserve the reported results and figures if any are provided.";
pub(crate) const KEEP_SAME_LANGUAGE: &str = "Write in the same language as the source text.";
pub(crate) const MAXIMUM_COMPRESSION: &str =
    "Eliminate any useless information and make the output as short as possible.";

/// One conditionally-included instruction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    PreserveTitle,
    PreserveAuthors,
    PreserveResults,
    KeepSameLanguage,
    TranslateTo(String),
    ContextualHint(String),
    MaximumCompression,
}

impl Directive {
    /// Active directives for `request`, in rendering order. Flags that are
    /// off produce nothing. A translation target supersedes
    /// `keep_same_language`.
    pub fn from_request(request: &CompressionRequest) -> Vec<Directive> {
        let mut directives = Vec::new();
        if request.preserve_title {
            directives.push(Directive::PreserveTitle);
        }
        if request.preserve_authors {
            directives.push(Directive::PreserveAuthors);
        }
        if request.preserve_results {
            directives.push(Directive::PreserveResults);
        }

        let translate_to = non_blank(request.translate_to.as_deref());
        match translate_to {
            Some(lang) => directives.push(Directive::TranslateTo(lang.to_string())),
            None if request.keep_same_language => directives.push(Directive::KeepSameLanguage),
            None => {}
        }

        if let Some(hint) = non_blank(request.contextual_hint.as_deref()) {
            directives.push(Directive::ContextualHint(hint.to_string()));
        }
        if request.maximum_compression {
            directives.push(Directive::MaximumCompression);
        }
        directives
    }

    pub fn render(&self) -> String {
        match self {
            Directive::PreserveTitle => PRESERVE_TITLE.to_string(),
            Directive::PreserveAuthors => PRESERVE_AUTHORS.to_string(),
            Directive::PreserveResults => PRESERVE_RESULTS.to_string(),
            Directive::KeepSameLanguage => KEEP_SAME_LANGUAGE.to_string(),
            Directive::TranslateTo(lang) => format!("Write the output in {lang}."),
            Directive::ContextualHint(hint) => format!("Context about this document: {hint}"),
            Directive::MaximumCompression => MAXIMUM_COMPRESSION.to_string(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
