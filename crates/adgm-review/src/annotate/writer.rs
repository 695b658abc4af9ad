//! Anchors review issues as comments inside a document

use crate::config::AnnotationConfig;
use crate::error::Result;
use crate::types::Issue;

use super::docx::DocxPackage;

/// Maximum anchor keywords taken from an issue description
const MAX_ANCHOR_KEYWORDS: usize = 6;
/// Words this short are too generic to anchor on
const MIN_KEYWORD_LEN: usize = 4;

/// Writes issues into a document as anchored comments
pub struct AnnotationWriter {
    author: String,
    initials: String,
}

impl AnnotationWriter {
    pub fn new(config: &AnnotationConfig) -> Self {
        Self {
            author: config.author.clone(),
            initials: config.initials.clone(),
        }
    }

    /// Attach one comment per issue, in the order supplied
    ///
    /// Returns the number of comments added. Paragraph text and ordering
    /// are untouched; only comment metadata and anchors are written.
    pub fn annotate(&self, package: &mut DocxPackage, issues: &[Issue]) -> Result<usize> {
        for issue in issues {
            let anchor = anchor_paragraph(package, &issue.kind)?;
            let body = comment_body(issue);
            package.add_comment(anchor, &body, &self.author, &self.initials)?;
        }
        Ok(issues.len())
    }
}

/// Build the comment body from an issue and its optional citation
fn comment_body(issue: &Issue) -> String {
    let mut body = issue.kind.clone();

    if !issue.suggestion.is_empty() {
        body.push_str("\nSuggestion: ");
        body.push_str(&issue.suggestion);
    }

    if let Some(citation) = &issue.citation {
        body.push_str("\nCitation: ");
        body.push_str(&citation.summary.citation);
        if !citation.summary.excerpt.is_empty() {
            body.push_str("\nExcerpt: ");
            body.push_str(&citation.summary.excerpt);
        }
    }

    body
}

/// Pick the paragraph a comment should anchor to
///
/// First paragraph containing any of the issue's leading keywords wins;
/// a description matching nothing anchors to the final paragraph.
fn anchor_paragraph(package: &DocxPackage, issue_kind: &str) -> Result<usize> {
    let paragraphs = package.paragraphs();
    let last = paragraphs
        .len()
        .checked_sub(1)
        .ok_or_else(|| crate::error::Error::malformed("document", "no paragraphs to anchor to"))?;

    let keywords: Vec<String> = issue_kind
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN)
        .take(MAX_ANCHOR_KEYWORDS)
        .map(|w| w.to_lowercase())
        .collect();

    for paragraph in paragraphs {
        let text_lower = paragraph.text.to_lowercase();
        if keywords.iter().any(|kw| text_lower.contains(kw)) {
            return Ok(paragraph.index);
        }
    }

    Ok(last)
}
