pub mod generator;
pub mod provider;
pub mod providers;

pub use generator::{ProviderGenerator, TextGenerator};
pub use provider::{LlmError, LlmProvider, Message, Role};
pub use providers::create_provider;
