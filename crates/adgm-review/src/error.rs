//! Error types for the review pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for review operations
pub type Result<T> = std::result::Result<T, Error>;

/// Review pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (bad TOML, missing credential, invalid value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// No ingestible source files found under the corpus directory
    #[error("No corpus documents found under '{}'", .0.display())]
    CorpusEmpty(PathBuf),

    /// Citation requested but no index has been built
    #[error("Citation index not available: {0}")]
    IndexUnavailable(String),

    /// Embedding batches disagreed on vector dimension; the index build aborts
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    EmbeddingDimensionMismatch { expected: usize, actual: usize },

    /// Input document could not be read or parsed
    #[error("Malformed document '{path}': {message}")]
    MalformedDocument { path: String, message: String },

    /// Summarization response was not the expected JSON shape
    #[error("Failed to parse summarization response: {0}")]
    SummarizationParse(String),

    /// Embedding service error
    #[error("Embedding request failed: {0}")]
    Embedding(String),

    /// Completion service error
    #[error("Completion request failed: {0}")]
    Completion(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Vector index artifact error (corrupt file, misaligned sidecar)
    #[error("Index artifact error: {0}")]
    Index(String),
}

impl Error {
    /// Create a malformed document error
    pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a completion error
    pub fn completion(message: impl Into<String>) -> Self {
        Self::Completion(message.into())
    }

    /// Create an index artifact error
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index(message.into())
    }
}
