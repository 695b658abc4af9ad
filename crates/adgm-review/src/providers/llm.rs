//! Completion provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Capability: complete a prompt with the configured chat model
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Return the model's text response for a single-turn prompt
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
