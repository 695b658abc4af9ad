//! ADGM corporate document review
//!
//! Analyzes legal documents for the Abu Dhabi Global Market jurisdiction:
//! detects document types with confidence scores, runs red-flag compliance
//! checks, retrieves supporting citations from an embedded reference corpus,
//! and writes findings back as Word comments plus a consolidated JSON
//! report.
//!
//! The embedding and completion service is external; it is consumed through
//! the [`providers`] traits and an index built offline with
//! [`corpus::CorpusIndexer`].

pub mod annotate;
pub mod classify;
pub mod config;
pub mod corpus;
pub mod error;
pub mod pipeline;
pub mod providers;
pub mod rules;
pub mod types;

pub use config::ReviewConfig;
pub use error::{Error, Result};
pub use pipeline::{infer_process, BatchOutcome, Pipeline, PROCESS_CHECKLISTS};
pub use types::{
    Citation, Classification, DocType, Issue, ProcessTag, Report, Severity,
};
