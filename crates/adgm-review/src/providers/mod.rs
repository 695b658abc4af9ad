//! Provider abstractions for the external embedding and completion service
//!
//! The pipeline never talks HTTP directly; it sees two capabilities, each
//! behind a trait, so tests can substitute in-memory fakes.

pub mod embedding;
pub mod llm;
pub mod openai;

pub use embedding::EmbeddingProvider;
pub use llm::CompletionProvider;
pub use openai::OpenAiClient;
