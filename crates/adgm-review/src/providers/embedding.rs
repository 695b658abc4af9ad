//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Capability: turn texts into fixed-dimension vectors
///
/// Callers batch their own inputs; one call maps each input text to one
/// vector, in order.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, one vector per text, input order preserved
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
