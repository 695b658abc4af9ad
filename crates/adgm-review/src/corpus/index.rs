//! Flat exact-nearest-neighbor vector index with a JSON metadata sidecar
//!
//! The index artifact is two files: a bincode-encoded flat vector store
//! (dimension + row-major f32 data) and a JSON array of chunk records. The
//! i-th record describes the i-th vector; that positional alignment is the
//! only join between them and is validated on load. Built once, read-only
//! afterwards.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One indexed chunk's metadata, id-aligned with its vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    #[serde(rename = "_id")]
    pub id: usize,
    /// Source file the chunk came from
    pub source: String,
    /// 1-indexed page for paginated sources, `None` for flat files
    pub page: Option<u32>,
    /// Position of the chunk within its source page or file
    pub chunk_index: u32,
    pub text: String,
}

/// On-disk layout of the vector store
#[derive(Serialize, Deserialize)]
struct VectorFile {
    dimension: usize,
    vectors: Vec<f32>,
}

/// A search hit: squared Euclidean distance plus the chunk id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub distance: f32,
    pub id: usize,
}

/// Immutable flat index over corpus chunk embeddings
#[derive(Debug)]
pub struct CorpusIndex {
    dimension: usize,
    vectors: Vec<f32>,
    records: Vec<ChunkRecord>,
}

impl CorpusIndex {
    /// Assemble an index from embeddings and their aligned records
    pub fn new(
        dimension: usize,
        embeddings: Vec<Vec<f32>>,
        records: Vec<ChunkRecord>,
    ) -> Result<Self> {
        if embeddings.len() != records.len() {
            return Err(Error::index(format!(
                "{} vectors but {} metadata records",
                embeddings.len(),
                records.len()
            )));
        }

        let mut vectors = Vec::with_capacity(embeddings.len() * dimension);
        for embedding in &embeddings {
            if embedding.len() != dimension {
                return Err(Error::EmbeddingDimensionMismatch {
                    expected: dimension,
                    actual: embedding.len(),
                });
            }
            vectors.extend_from_slice(embedding);
        }

        Ok(Self {
            dimension,
            vectors,
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Metadata record for a chunk id
    pub fn record(&self, id: usize) -> Option<&ChunkRecord> {
        self.records.get(id)
    }

    /// Exact nearest-neighbor search by squared Euclidean distance
    ///
    /// Returns up to `top_k` hits ordered nearest-first.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchHit>> {
        if self.records.is_empty() {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension {
            return Err(Error::index(format!(
                "query dimension {} does not match index dimension {}",
                query.len(),
                self.dimension
            )));
        }

        let mut hits: Vec<SearchHit> = self
            .vectors
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(id, row)| {
                let distance = row
                    .iter()
                    .zip(query)
                    .map(|(a, b)| {
                        let d = a - b;
                        d * d
                    })
                    .sum();
                SearchHit { distance, id }
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);

        Ok(hits)
    }

    /// Persist the vector store and its metadata sidecar
    pub fn save(&self, index_path: &Path, meta_path: &Path) -> Result<()> {
        if let Some(parent) = index_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if let Some(parent) = meta_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = VectorFile {
            dimension: self.dimension,
            vectors: self.vectors.clone(),
        };
        let encoded = bincode::serde::encode_to_vec(&file, bincode::config::standard())
            .map_err(|e| Error::index(e.to_string()))?;
        std::fs::write(index_path, encoded)?;

        let meta = serde_json::to_vec_pretty(&self.records)?;
        std::fs::write(meta_path, meta)?;

        tracing::info!(
            vectors = self.len(),
            dimension = self.dimension,
            "Index saved to {} (meta: {})",
            index_path.display(),
            meta_path.display()
        );
        Ok(())
    }

    /// Load a previously built index
    ///
    /// Missing files surface as `IndexUnavailable` so callers can degrade
    /// to citation-free review; corrupt or misaligned artifacts are hard
    /// `Index` errors.
    pub fn load(index_path: &Path, meta_path: &Path) -> Result<Arc<Self>> {
        if !index_path.exists() || !meta_path.exists() {
            return Err(Error::IndexUnavailable(format!(
                "{} / {}",
                index_path.display(),
                meta_path.display()
            )));
        }

        let bytes = std::fs::read(index_path)?;
        let (file, _): (VectorFile, usize) =
            bincode::serde::decode_from_slice(&bytes, bincode::config::standard())
                .map_err(|e| Error::index(e.to_string()))?;

        let meta = std::fs::read(meta_path)?;
        let records: Vec<ChunkRecord> = serde_json::from_slice(&meta)?;

        if file.dimension == 0 || file.vectors.len() % file.dimension != 0 {
            return Err(Error::index("vector data is not a whole number of rows"));
        }
        let rows = file.vectors.len() / file.dimension;
        if rows != records.len() {
            return Err(Error::index(format!(
                "{} vectors but {} metadata records",
                rows,
                records.len()
            )));
        }

        Ok(Arc::new(Self {
            dimension: file.dimension,
            vectors: file.vectors,
            records,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: usize, text: &str) -> ChunkRecord {
        ChunkRecord {
            id,
            source: "corpus/regulations.pdf".to_string(),
            page: Some(1),
            chunk_index: id as u32,
            text: text.to_string(),
        }
    }

    #[test]
    fn search_orders_hits_nearest_first() {
        let index = CorpusIndex::new(
            2,
            vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![0.5, 0.0]],
            vec![record(0, "a"), record(1, "b"), record(2, "c")],
        )
        .unwrap();

        let hits = index.search(&[0.4, 0.0], 3).unwrap();
        assert_eq!(hits[0].id, 2);
        assert_eq!(hits[1].id, 0);
        assert_eq!(hits[2].id, 1);
        assert!(hits[0].distance <= hits[1].distance);
    }

    #[test]
    fn single_chunk_corpus_returns_rank_zero_for_any_query() {
        let index = CorpusIndex::new(
            3,
            vec![vec![0.1, 0.2, 0.3]],
            vec![record(0, "the only chunk")],
        )
        .unwrap();

        for query in [[9.0, 9.0, 9.0], [0.0, 0.0, 0.0], [-3.0, 1.0, 2.0]] {
            let hits = index.search(&query, 3).unwrap();
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].id, 0);
        }
    }

    #[test]
    fn mismatched_row_dimension_is_fatal() {
        let err = CorpusIndex::new(
            2,
            vec![vec![0.0, 0.0], vec![1.0]],
            vec![record(0, "a"), record(1, "b")],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::EmbeddingDimensionMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("index.bin");
        let meta_path = dir.path().join("meta.json");

        let index = CorpusIndex::new(
            2,
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            vec![record(0, "first"), record(1, "second")],
        )
        .unwrap();
        index.save(&index_path, &meta_path).unwrap();

        let loaded = CorpusIndex::load(&index_path, &meta_path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.dimension(), 2);
        assert_eq!(loaded.record(1).unwrap().text, "second");

        let hits = loaded.search(&[0.9, 0.1], 1).unwrap();
        assert_eq!(hits[0].id, 0);
    }

    #[test]
    fn missing_artifact_is_index_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = CorpusIndex::load(
            &dir.path().join("absent.bin"),
            &dir.path().join("absent.json"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::IndexUnavailable(_)));
    }

    #[test]
    fn sidecar_uses_underscore_id_key() {
        let json = serde_json::to_value(record(7, "t")).unwrap();
        assert_eq!(json["_id"], 7);
    }
}
