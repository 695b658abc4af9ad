//! Corpus indexing and citation retrieval

pub mod chunker;
pub mod index;
pub mod indexer;
pub mod retriever;

pub use chunker::TextChunker;
pub use index::{ChunkRecord, CorpusIndex, SearchHit};
pub use indexer::CorpusIndexer;
pub use retriever::CitationRetriever;
