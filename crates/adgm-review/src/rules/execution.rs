//! Signature and execution checks

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Issue, Severity};

use super::section::find_section;

static SIGNATURE_MARKERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\bsignature\b",
        r"\bsigned by\b",
        r"\bfor and on behalf\b",
        r"\bexecuted\b",
        r"\bin witness whereof\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex"))
    .collect()
});

/// Flag missing signature blocks and witness requirements
pub fn check_execution(text: &str, text_lower: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    let has_signature = SIGNATURE_MARKERS.iter().any(|p| p.is_match(text_lower));
    if !has_signature {
        issues.push(Issue::new(
            "Missing signature block or execution clause",
            Severity::High,
            "Add proper signature block with name, title, and date fields",
            "End of document",
        ));
    }

    let needs_witness =
        text_lower.contains("deed") || text_lower.contains("power of attorney");
    if needs_witness && !text_lower.contains("witness") {
        issues.push(Issue::new(
            "Document may require witness signature",
            Severity::Medium,
            "Consider adding witness signature requirements",
            find_section(text, "signature"),
        ));
    }

    issues
}
