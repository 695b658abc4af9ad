//! General ADGM compliance checks

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Issue, Severity};

use super::section::find_section;

static USD_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\busd\b|\bus dollar\b").expect("Invalid regex"));

/// Word-count floor below which the compliance-vocabulary check is skipped
const SUBSTANTIAL_DOC_WORDS: usize = 200;

/// Flag documents missing ADGM references, AED alternatives, or any
/// compliance vocabulary
pub fn check_compliance(text: &str, text_lower: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    if !text_lower.contains("adgm") && !text_lower.contains("abu dhabi global market") {
        issues.push(Issue::new(
            "Document does not reference ADGM jurisdiction",
            Severity::Medium,
            "Include reference to ADGM (Abu Dhabi Global Market) jurisdiction",
            "General",
        ));
    }

    if USD_REF.is_match(text_lower) && !text_lower.contains("aed") {
        issues.push(Issue::new(
            "References USD without AED alternative",
            Severity::Low,
            "Consider including AED (UAE Dirham) as alternative currency",
            find_section(text, "USD"),
        ));
    }

    const COMPLIANCE_TERMS: &[&str] = &["compliant", "compliance", "regulatory", "regulation"];
    let has_compliance_ref = COMPLIANCE_TERMS.iter().any(|t| text_lower.contains(t));

    if text.split_whitespace().count() > SUBSTANTIAL_DOC_WORDS && !has_compliance_ref {
        issues.push(Issue::new(
            "Document lacks compliance or regulatory references",
            Severity::Low,
            "Consider adding compliance statements relevant to ADGM regulations",
            "General",
        ));
    }

    issues
}
