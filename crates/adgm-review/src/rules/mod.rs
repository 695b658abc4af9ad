//! Rule-based red-flag detection
//!
//! `check` runs the check families in a fixed sequence (jurisdiction,
//! execution, type-specific, general compliance, language), so identical
//! input always yields an identical ordered issue list.

pub mod compliance;
pub mod execution;
pub mod jurisdiction;
pub mod language;
pub mod section;
pub mod structural;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{DocType, Issue, Severity, SeverityScore};

pub use section::find_section;

/// Run all red-flag checks over document text
///
/// When `doc_type` is given, only that type's structural family runs;
/// otherwise every family runs (each family gates itself on the document
/// actually containing its marker phrase).
pub fn check(text: &str, doc_type: Option<&DocType>) -> Vec<Issue> {
    let text_lower = text.to_lowercase();
    let mut issues = Vec::new();

    issues.extend(jurisdiction::check_jurisdiction(text, &text_lower));
    issues.extend(execution::check_execution(text, &text_lower));

    match doc_type {
        Some(doc_type) => issues.extend(structural::check_for_type(&text_lower, doc_type)),
        None => issues.extend(structural::check_all(&text_lower)),
    }

    issues.extend(compliance::check_compliance(text, &text_lower));
    issues.extend(language::check_language(text, &text_lower));

    issues
}

/// Aggregate issue severities for prioritization
pub fn severity_score(issues: &[Issue]) -> SeverityScore {
    let mut high = 0;
    let mut medium = 0;
    let mut low = 0;
    let mut total_score = 0;

    for issue in issues {
        match issue.severity {
            Severity::High => high += 1,
            Severity::Medium => medium += 1,
            Severity::Low => low += 1,
        }
        total_score += issue.severity.weight();
    }

    let priority = if high > 0 {
        Severity::High
    } else if medium > 0 {
        Severity::Medium
    } else {
        Severity::Low
    };

    SeverityScore {
        total_score,
        high,
        medium,
        low,
        priority,
    }
}

/// Flag required sections absent from the document
pub fn validate_required_sections(text: &str, required_sections: &[&str]) -> Vec<Issue> {
    let text_lower = text.to_lowercase();

    required_sections
        .iter()
        .filter(|section| !text_lower.contains(&section.to_lowercase()))
        .map(|section| {
            Issue::new(
                format!("Missing required section: {section}"),
                Severity::High,
                format!("Add {section} section to the document"),
                *section,
            )
        })
        .collect()
}

static CLAUSE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)clause \d+\.\d+").expect("Invalid regex"));

/// Flag clause cross-references whose label appears only once
///
/// A clause number mentioned a single time has no matching clause body
/// elsewhere in the document; this is a best-effort heuristic.
pub fn check_cross_references(text: &str) -> Vec<Issue> {
    let text_lower = text.to_lowercase();
    let mut seen = Vec::new();
    let mut issues = Vec::new();

    for matched in CLAUSE_REF.find_iter(text) {
        let label = matched.as_str().to_lowercase();
        if seen.contains(&label) {
            continue;
        }
        seen.push(label.clone());

        if text_lower.matches(&label).count() == 1 {
            issues.push(Issue::new(
                format!("Potential broken cross-reference: {}", matched.as_str()),
                Severity::Medium,
                format!("Verify that {} exists in the document", matched.as_str()),
                find_section(text, matched.as_str()),
            ));
        }
    }

    issues
}
