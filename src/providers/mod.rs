mod factory;
mod ollama;
mod open_ai;
mod prompt;

pub use factory::ProviderFactory;
pub use ollama::OllamaModel;
pub use open_ai::OpenAIModel;
pub use prompt::{DESCRIBE_SYSTEM_PROMPT, KEYWORDS_SYSTEM_PROMPT};

use crate::error::CaptionError;
use async_trait::async_trait;

/// One chat-completion exchange: a system instruction plus a user message,
/// with bounded output and a sampling temperature chosen per call site.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Unified trait for all chat-completion backends
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Get the provider name (e.g., "openai", "ollama")
    fn provider_name(&self) -> &str;

    /// Send one chat request and return the trimmed text of the first
    /// completion choice
    async fn complete(&self, request: &ChatRequest) -> Result<String, CaptionError>;
}
