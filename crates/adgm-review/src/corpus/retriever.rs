//! Citation retrieval: nearest passages plus a synthesized attribution

use std::path::Path;
use std::sync::Arc;

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::providers::{CompletionProvider, EmbeddingProvider};
use crate::types::{Citation, CitationSummary, RetrievedPassage};

use super::index::CorpusIndex;

/// Separator placed between passages handed to the summarizer
const PASSAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Retrieves supporting citations for rule findings
///
/// Holds a read-only handle to a previously built index; many retrievers
/// may share one index without coordination.
pub struct CitationRetriever {
    index: Arc<CorpusIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn CompletionProvider>,
    top_k: usize,
}

impl CitationRetriever {
    pub fn new(
        index: Arc<CorpusIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn CompletionProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            index,
            embedder,
            llm,
            top_k: top_k.max(1),
        }
    }

    /// Open the persisted index and wrap it in a retriever
    ///
    /// Fails with `IndexUnavailable` when no index has been built; callers
    /// treat citations as optional and degrade rather than abort.
    pub fn open(
        config: &IndexConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn CompletionProvider>,
    ) -> Result<Self> {
        let index = CorpusIndex::load(&config.index_path, &config.meta_path)?;
        Ok(Self::new(index, embedder, llm, config.top_k))
    }

    /// Open from explicit artifact paths
    pub fn open_paths(
        index_path: &Path,
        meta_path: &Path,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn CompletionProvider>,
        top_k: usize,
    ) -> Result<Self> {
        let index = CorpusIndex::load(index_path, meta_path)?;
        Ok(Self::new(index, embedder, llm, top_k))
    }

    /// Retrieve the nearest passages for a query and synthesize a citation
    pub async fn retrieve(&self, query: &str) -> Result<Citation> {
        let query_embedding = self
            .embedder
            .embed_batch(&[query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::embedding("no vector returned for query"))?;

        let hits = self.index.search(&query_embedding, self.top_k)?;

        let results: Vec<RetrievedPassage> = hits
            .iter()
            // Out-of-bounds ids cannot come from our own search, but a hit
            // is dropped rather than trusted if they ever do.
            .filter_map(|hit| self.index.record(hit.id).map(|r| (hit, r)))
            .map(|(hit, record)| RetrievedPassage {
                score: hit.distance,
                source: record.source.clone(),
                page: record.page,
                chunk_index: record.chunk_index,
                text: record.text.clone(),
            })
            .collect();

        let passages = results
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(PASSAGE_SEPARATOR);

        let prompt = build_citation_prompt(query, &passages);
        let raw = self.llm.complete(&prompt).await?;

        let summary = match parse_summary(&raw) {
            Ok(summary) => summary,
            Err(e) => {
                tracing::debug!("Summary not structured ({e}); using raw response");
                CitationSummary {
                    citation: raw.trim().to_string(),
                    excerpt: String::new(),
                }
            }
        };

        Ok(Citation {
            query: query.to_string(),
            results,
            summary,
        })
    }
}

/// Prompt asking for a one-sentence citation plus a bounded excerpt
fn build_citation_prompt(query: &str, passages: &str) -> String {
    format!(
        "You are a legal assistant. Given this query and the retrieved passages \
         from ADGM documents, produce a one-sentence citation (with which \
         document/file and page) that supports or explains the query, and \
         extract a short quoted passage (<= 120 words) that is most relevant. \
         If nothing relevant is found, say 'no relevant passage found'.\n\n\
         QUERY: {query}\n\n\
         RETRIEVED_PASSAGES:\n{passages}\n\n\
         Output JSON with keys: citation (string), excerpt (string)."
    )
}

/// Parse the summarizer's `{citation, excerpt}` JSON
///
/// Tolerates a fenced code block around the JSON. Callers fall back to the
/// raw response on error; this never propagates past `retrieve`.
fn parse_summary(raw: &str) -> Result<CitationSummary> {
    let trimmed = raw.trim();
    let body = strip_code_fence(trimmed);

    serde_json::from_str(body).map_err(|e| Error::SummarizationParse(e.to_string()))
}

/// Remove one surrounding Markdown code fence, if present
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop an optional language tag on the fence line.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.strip_suffix("```").map(str::trim).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::index::ChunkRecord;
    use async_trait::async_trait;

    struct FixedEmbedder(Vec<f32>);

    #[async_trait]
    impl crate::providers::EmbeddingProvider for FixedEmbedder {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| self.0.clone()).collect())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct CannedLlm(String);

    #[async_trait]
    impl crate::providers::CompletionProvider for CannedLlm {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    fn single_chunk_index() -> Arc<CorpusIndex> {
        Arc::new(
            CorpusIndex::new(
                2,
                vec![vec![0.3, 0.7]],
                vec![ChunkRecord {
                    id: 0,
                    source: "corpus/companies_regulations.pdf".to_string(),
                    page: Some(14),
                    chunk_index: 0,
                    text: "Every company shall have a registered office in the \
                           Abu Dhabi Global Market."
                        .to_string(),
                }],
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn retrieve_returns_structured_summary() {
        let retriever = CitationRetriever::new(
            single_chunk_index(),
            Arc::new(FixedEmbedder(vec![0.0, 0.0])),
            Arc::new(CannedLlm(
                r#"{"citation": "Companies Regulations, page 14", "excerpt": "Every company shall have a registered office"}"#
                    .to_string(),
            )),
            3,
        );

        let citation = retriever.retrieve("Missing registered office clause").await.unwrap();
        assert_eq!(citation.results.len(), 1);
        assert_eq!(citation.results[0].chunk_index, 0);
        assert_eq!(citation.summary.citation, "Companies Regulations, page 14");
        assert!(citation.summary.excerpt.contains("registered office"));
    }

    #[tokio::test]
    async fn unparseable_summary_falls_back_to_raw_text() {
        let retriever = CitationRetriever::new(
            single_chunk_index(),
            Arc::new(FixedEmbedder(vec![0.0, 0.0])),
            Arc::new(CannedLlm(
                "See Companies Regulations 2020, Article 15.".to_string(),
            )),
            3,
        );

        let citation = retriever.retrieve("Missing signature block").await.unwrap();
        assert_eq!(
            citation.summary.citation,
            "See Companies Regulations 2020, Article 15."
        );
        assert!(citation.summary.excerpt.is_empty());
    }

    #[tokio::test]
    async fn fenced_json_summary_is_parsed() {
        let retriever = CitationRetriever::new(
            single_chunk_index(),
            Arc::new(FixedEmbedder(vec![0.0, 0.0])),
            Arc::new(CannedLlm(
                "```json\n{\"citation\": \"Reg 7(2)\", \"excerpt\": \"quoted\"}\n```".to_string(),
            )),
            3,
        );

        let citation = retriever.retrieve("query").await.unwrap();
        assert_eq!(citation.summary.citation, "Reg 7(2)");
    }

    #[test]
    fn parse_summary_reports_malformed_json() {
        assert!(matches!(
            parse_summary("not json at all"),
            Err(Error::SummarizationParse(_))
        ));
    }

    #[test]
    fn missing_index_files_surface_as_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = CitationRetriever::open_paths(
            &dir.path().join("no.bin"),
            &dir.path().join("no.json"),
            Arc::new(FixedEmbedder(vec![0.0])),
            Arc::new(CannedLlm(String::new())),
            3,
        )
        .err()
        .unwrap();
        assert!(matches!(err, Error::IndexUnavailable(_)));
    }
}
