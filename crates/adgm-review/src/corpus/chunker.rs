//! Fixed-window text chunking with overlap
//!
//! Cleaned text is sliced greedily into windows of `chunk_size` characters,
//! each window starting `chunk_size - overlap` characters after the last.
//! The final partial window is kept as-is, and text already within one
//! window is emitted whole. Windows are measured in characters, never bytes,
//! so multi-byte text slices safely.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ChunkingConfig;

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n+").expect("Invalid regex"));

/// Text chunker with configurable size and overlap
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    chunk_size: usize,
    overlap: usize,
}

impl TextChunker {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(config.chunk_size, config.overlap)
    }

    /// Collapse runs of blank lines and trim surrounding whitespace
    pub fn clean(text: &str) -> String {
        BLANK_LINES.replace_all(text, "\n\n").trim().to_string()
    }

    /// Clean and slice text into overlapping windows
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let text = Self::clean(text);
        if text.is_empty() {
            return Vec::new();
        }

        // Char-boundary byte offsets; boundaries[i] starts the i-th char.
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        let char_count = boundaries.len() - 1;

        if char_count <= self.chunk_size {
            return vec![text];
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;
        while start < char_count {
            let end = (start + self.chunk_size).min(char_count);
            chunks.push(text[boundaries[start]..boundaries[end]].to_string());
            start = (start + self.chunk_size - self.overlap).max(start + 1);
        }

        chunks
    }
}
