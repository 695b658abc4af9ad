//! Configuration for the review pipeline

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration, one sub-struct per concern
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Embedding service configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    /// Corpus chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Index artifact locations
    #[serde(default)]
    pub index: IndexConfig,
    /// Completion service configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Annotation output configuration
    #[serde(default)]
    pub annotation: AnnotationConfig,
}

impl ReviewConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Embedding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Embedding model name
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Maximum texts per embedding request
    pub batch_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "text-embedding-3-small".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            batch_size: 50,
        }
    }
}

/// Corpus chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Window size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive windows in characters
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            overlap: 100,
        }
    }
}

/// Index artifact locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Binary flat vector store
    pub index_path: PathBuf,
    /// JSON sidecar of chunk metadata, id-aligned with the vectors
    pub meta_path: PathBuf,
    /// Passages retrieved per citation query
    pub top_k: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("resources/adgm_index.bin"),
            meta_path: PathBuf::from("resources/adgm_meta.json"),
            top_k: 3,
        }
    }
}

/// Completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Chat model used for citation summaries
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Response token cap
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Retries for failed requests
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            max_tokens: 300,
            timeout_secs: 60,
            max_retries: 2,
        }
    }
}

/// Annotation output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationConfig {
    /// Comment author shown in the reviewed document
    pub author: String,
    /// Author initials
    pub initials: String,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            author: "Reviewer".to_string(),
            initials: "RV".to_string(),
        }
    }
}
