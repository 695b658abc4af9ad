//! OpenAI-compatible HTTP client for embeddings and completions
//!
//! Implements both provider traits against `/v1/embeddings` and
//! `/v1/chat/completions`. The API key is read from the configured
//! environment variable at construction time; a missing credential is a
//! constructor error, not a deferred runtime surprise.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::config::{EmbeddingConfig, LlmConfig};
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::CompletionProvider;

/// HTTP client with automatic retry, shared by both capabilities
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    embeddings: EmbeddingConfig,
    llm: LlmConfig,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Deserialize)]
struct EmbeddingRow {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl OpenAiClient {
    /// Create a client, reading the API key from the configured env var
    pub fn from_env(embeddings: EmbeddingConfig, llm: LlmConfig) -> Result<Self> {
        let api_key = std::env::var(&embeddings.api_key_env).map_err(|_| {
            Error::Config(format!(
                "{} env var not set; required for the embedding service",
                embeddings.api_key_env
            ))
        })?;
        Ok(Self::with_key(api_key, embeddings, llm))
    }

    /// Create a client with an explicit API key
    pub fn with_key(api_key: String, embeddings: EmbeddingConfig, llm: LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(llm.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            embeddings,
            llm,
        }
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.llm.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.llm.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt));
                        tracing::warn!(
                            "Request failed (attempt {}/{}), retrying in {:?}",
                            attempt + 1,
                            self.llm.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::completion("Unknown error")))
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/v1/embeddings", self.embeddings.base_url);

        self.retry_request(|| {
            let url = url.clone();
            async move {
                let request = EmbeddingsRequest {
                    model: &self.embeddings.model,
                    input: texts,
                };

                let response = self
                    .client
                    .post(&url)
                    .bearer_auth(&self.api_key)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| Error::embedding(format!("request failed: {e}")))?;

                if !response.status().is_success() {
                    return Err(Error::embedding(format!("HTTP {}", response.status())));
                }

                let parsed: EmbeddingsResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::embedding(format!("bad response body: {e}")))?;

                let mut rows = parsed.data;
                rows.sort_by_key(|r| r.index);
                if rows.len() != texts.len() {
                    return Err(Error::embedding(format!(
                        "expected {} vectors, got {}",
                        texts.len(),
                        rows.len()
                    )));
                }

                Ok(rows.into_iter().map(|r| r.embedding).collect())
            }
        })
        .await
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.embeddings.base_url);

        self.retry_request(|| {
            let url = url.clone();
            async move {
                let request = ChatRequest {
                    model: &self.llm.model,
                    messages: vec![ChatMessage {
                        role: "user",
                        content: prompt,
                    }],
                    temperature: self.llm.temperature,
                    max_tokens: self.llm.max_tokens,
                };

                let response = self
                    .client
                    .post(&url)
                    .bearer_auth(&self.api_key)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| Error::completion(format!("request failed: {e}")))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::completion(format!("HTTP {status} - {body}")));
                }

                let parsed: ChatResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::completion(format!("bad response body: {e}")))?;

                parsed
                    .choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content.trim().to_string())
                    .ok_or_else(|| Error::completion("response contained no choices"))
            }
        })
        .await
    }

    fn name(&self) -> &str {
        "openai"
    }
}
