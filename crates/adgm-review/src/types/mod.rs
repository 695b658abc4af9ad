//! Core domain types shared across the review pipeline

pub mod citation;
pub mod doc_type;
pub mod issue;
pub mod report;

pub use citation::{Citation, CitationSummary, RetrievedPassage};
pub use doc_type::{Classification, DocType, ProcessTag};
pub use issue::{Issue, Severity, SeverityScore};
pub use report::Report;
