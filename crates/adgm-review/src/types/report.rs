//! Consolidated batch report, the externally-visible artifact

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::doc_type::{DocType, ProcessTag};
use super::issue::Issue;

/// Outcome of one pipeline run over a batch of documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub process: ProcessTag,
    pub documents_uploaded: usize,
    pub required_documents: usize,
    /// Required-but-absent types; `None` when no process was identified
    /// or nothing is missing
    pub missing_document: Option<Vec<DocType>>,
    pub issues_found: Vec<Issue>,
}

impl Report {
    /// Write the report as pretty-printed UTF-8 JSON, non-ASCII preserved
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
