//! Citation types: retrieved passages plus a synthesized attribution

use serde::{Deserialize, Serialize};

/// One passage retrieved from the corpus index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedPassage {
    /// Squared Euclidean distance to the query (smaller is closer)
    pub score: f32,
    /// Source file the chunk came from
    pub source: String,
    /// 1-indexed page for paginated sources
    pub page: Option<u32>,
    /// Position of the chunk within its source
    pub chunk_index: u32,
    pub text: String,
}

/// Natural-language attribution synthesized by the completion service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationSummary {
    /// One-sentence citation naming source and page
    pub citation: String,
    /// Quoted excerpt (at most 120 words), possibly empty
    #[serde(default)]
    pub excerpt: String,
}

/// A full citation: the query, its nearest passages, and the summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    pub query: String,
    /// Ordered nearest-first
    pub results: Vec<RetrievedPassage>,
    pub summary: CitationSummary,
}
