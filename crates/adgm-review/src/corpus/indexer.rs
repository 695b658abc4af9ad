//! Offline corpus index construction
//!
//! Walks a corpus directory, chunks every eligible source (PDFs page by
//! page, plain-text files whole), embeds the chunk texts in bounded
//! batches, and assembles the flat index. Run once; review never needs it.

use std::path::Path;
use std::sync::Arc;

use walkdir::WalkDir;

use crate::config::{ChunkingConfig, EmbeddingConfig};
use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;

use super::chunker::TextChunker;
use super::index::{ChunkRecord, CorpusIndex};

/// Builds the persisted corpus index
pub struct CorpusIndexer {
    embedder: Arc<dyn EmbeddingProvider>,
    chunker: TextChunker,
    batch_size: usize,
}

impl CorpusIndexer {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        chunking: &ChunkingConfig,
        embeddings: &EmbeddingConfig,
    ) -> Self {
        Self {
            embedder,
            chunker: TextChunker::from_config(chunking),
            batch_size: embeddings.batch_size.clamp(1, 50),
        }
    }

    /// Build an index from every `.pdf` and `.txt` under `corpus_dir`
    pub async fn build(&self, corpus_dir: &Path) -> Result<CorpusIndex> {
        tracing::info!("Building index from corpus: {}", corpus_dir.display());

        let mut records = Vec::new();

        let mut entries: Vec<_> = WalkDir::new(corpus_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();
        // Stable walk order keeps chunk ids reproducible across builds.
        entries.sort();

        for path in entries {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase());

            match ext.as_deref() {
                Some("pdf") => self.collect_pdf(&path, &mut records)?,
                Some("txt") => self.collect_text(&path, &mut records)?,
                _ => {}
            }
        }

        if records.is_empty() {
            return Err(Error::CorpusEmpty(corpus_dir.to_path_buf()));
        }

        tracing::info!(chunks = records.len(), "Corpus chunked; embedding");

        let texts: Vec<String> = records.iter().map(|r| r.text.clone()).collect();
        let embeddings = self.embed_all(&texts).await?;
        let dimension = embeddings[0].len();
        tracing::info!(dimension, vectors = embeddings.len(), "Embedding complete");

        CorpusIndex::new(dimension, embeddings, records)
    }

    /// Chunk one PDF page by page
    fn collect_pdf(&self, path: &Path, records: &mut Vec<ChunkRecord>) -> Result<()> {
        let doc = lopdf::Document::load(path)
            .map_err(|e| Error::malformed(path.display().to_string(), e.to_string()))?;

        let source = path.display().to_string();
        for (page_no, _) in doc.get_pages() {
            let page_text = match doc.extract_text(&[page_no]) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("Skipping page {page_no} of {source}: {e}");
                    continue;
                }
            };
            if page_text.trim().is_empty() {
                continue;
            }
            for (chunk_index, text) in self.chunker.chunk(&page_text).into_iter().enumerate() {
                records.push(ChunkRecord {
                    id: records.len(),
                    source: source.clone(),
                    page: Some(page_no),
                    chunk_index: chunk_index as u32,
                    text,
                });
            }
        }
        Ok(())
    }

    /// Chunk one plain-text file as a whole
    fn collect_text(&self, path: &Path, records: &mut Vec<ChunkRecord>) -> Result<()> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::malformed(path.display().to_string(), e.to_string()))?;

        let source = path.display().to_string();
        for (chunk_index, chunk) in self.chunker.chunk(&text).into_iter().enumerate() {
            records.push(ChunkRecord {
                id: records.len(),
                source: source.clone(),
                page: None,
                chunk_index: chunk_index as u32,
                text: chunk,
            });
        }
        Ok(())
    }

    /// Embed all chunk texts in batches, enforcing one shared dimension
    async fn embed_all(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings: Vec<Vec<f32>> = Vec::with_capacity(texts.len());
        let mut dimension: Option<usize> = None;

        for batch in texts.chunks(self.batch_size) {
            let batch_embeddings = self.embedder.embed_batch(batch).await?;
            for embedding in batch_embeddings {
                let expected = *dimension.get_or_insert(embedding.len());
                if embedding.len() != expected {
                    return Err(Error::EmbeddingDimensionMismatch {
                        expected,
                        actual: embedding.len(),
                    });
                }
                embeddings.push(embedding);
            }
        }

        if embeddings.len() != texts.len() {
            return Err(Error::embedding(format!(
                "embedded {} of {} chunks",
                embeddings.len(),
                texts.len()
            )));
        }

        Ok(embeddings)
    }
}
