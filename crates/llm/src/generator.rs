//! Prompt-in, text-out adapter over chat providers.
//!
//! The compression pipeline only needs a single blocking-style call that turns
//! a prompt into a complete string. `TextGenerator` is that seam; any
//! `LlmProvider` becomes one through `ProviderGenerator`.

use async_trait::async_trait;
use tracing::debug;

use crate::provider::{LlmError, LlmProvider, Message};

/// Turns a prompt into generated text with a bounded output size.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<String, LlmError>;
}

/// Wraps an `LlmProvider`, sending each prompt as a single user message.
pub struct ProviderGenerator {
    provider: Box<dyn LlmProvider>,
    temperature: f32,
    system_prompt: Option<String>,
}

impl ProviderGenerator {
    pub fn new(provider: Box<dyn LlmProvider>, temperature: f32) -> Self {
        Self {
            provider,
            temperature,
            system_prompt: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    fn messages(&self, prompt: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(Message::system(system.clone()));
        }
        messages.push(Message::user(prompt));
        messages
    }
}

#[async_trait]
impl TextGenerator for ProviderGenerator {
    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<String, LlmError> {
        debug!(
            provider = self.provider.name(),
            prompt_chars = prompt.len(),
            max_output_tokens,
            "generating"
        );
        self.provider
            .complete(self.messages(prompt), self.temperature, max_output_tokens)
            .await
    }
}
