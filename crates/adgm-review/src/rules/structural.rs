//! Type-specific structural checks
//!
//! Each family is gated on the document actually containing its marker
//! phrase, so running every family over an untyped document cannot produce
//! false positives for types the text never mentions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{DocType, Issue, Severity};

static LEGAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bllc\b|\blimited\b|\bltd\b").expect("Invalid regex"));
static UBO_THRESHOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b25%|\btwenty[- ]five percent\b").expect("Invalid regex"));

/// Run the structural checks for one identified type
pub fn check_for_type(text_lower: &str, doc_type: &DocType) -> Vec<Issue> {
    match doc_type {
        DocType::ArticlesOfAssociation => check_articles(text_lower),
        DocType::MemorandumOfAssociation => check_memorandum(text_lower),
        DocType::UboDeclaration => check_ubo(text_lower),
        DocType::IncorporationApplication => check_incorporation(text_lower),
        _ => Vec::new(),
    }
}

/// Run every structural family; used when the document type is unknown
pub fn check_all(text_lower: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(check_articles(text_lower));
    issues.extend(check_memorandum(text_lower));
    issues.extend(check_ubo(text_lower));
    issues.extend(check_incorporation(text_lower));
    issues
}

fn check_articles(text_lower: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    if !text_lower.contains("articles of association") {
        return issues;
    }

    if !text_lower.contains("share capital") && !text_lower.contains("shares") {
        issues.push(Issue::new(
            "Missing share capital provisions in Articles of Association",
            Severity::High,
            "Add clause specifying authorized share capital and classes of shares",
            "Share Capital",
        ));
    }

    if !text_lower.contains("director") {
        issues.push(Issue::new(
            "Missing directors provisions",
            Severity::High,
            "Add provisions for appointment and powers of directors",
            "Directors",
        ));
    }

    if !text_lower.contains("objects") && !text_lower.contains("purpose") {
        issues.push(Issue::new(
            "Missing company objects or purpose clause",
            Severity::Medium,
            "Include clause defining company objects and permitted activities",
            "Company Objects",
        ));
    }

    issues
}

fn check_memorandum(text_lower: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    if !text_lower.contains("memorandum of association") {
        return issues;
    }

    if !LEGAL_SUFFIX.is_match(text_lower) {
        issues.push(Issue::new(
            "Company name may not include proper legal designation",
            Severity::Medium,
            "Ensure company name includes LLC, Limited, or Ltd as appropriate",
            "Company Name",
        ));
    }

    if !text_lower.contains("registered office") && !text_lower.contains("registered address") {
        issues.push(Issue::new(
            "Missing registered office clause",
            Severity::High,
            "Include registered office address in ADGM",
            "Registered Office",
        ));
    }

    issues
}

fn check_ubo(text_lower: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    if !text_lower.contains("ultimate beneficial owner") && !text_lower.contains("ubo") {
        return issues;
    }

    if !UBO_THRESHOLD.is_match(text_lower) {
        issues.push(Issue::new(
            "Missing 25% ownership threshold reference",
            Severity::Medium,
            "Specify 25% ownership threshold for UBO determination",
            "Ownership Threshold",
        ));
    }

    const REQUIRED_FIELDS: &[&str] = &["full name", "address", "nationality", "date of birth"];
    for field in REQUIRED_FIELDS {
        if !text_lower.contains(field) {
            issues.push(Issue::new(
                format!("May be missing {field} field for UBO"),
                Severity::Medium,
                format!("Ensure {field} is included for each UBO"),
                "UBO Information",
            ));
        }
    }

    issues
}

fn check_incorporation(text_lower: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    if !text_lower.contains("incorporation") && !text_lower.contains("application") {
        return issues;
    }

    const REQUIRED_ELEMENTS: &[(&str, &str)] = &[
        ("proposed company name", "Company Name"),
        ("business activity", "Business Activity"),
        ("share capital", "Share Capital"),
        ("registered office", "Registered Office"),
    ];

    for (element, section) in REQUIRED_ELEMENTS {
        if !text_lower.contains(element) {
            issues.push(Issue::new(
                format!("Missing {element} in incorporation application"),
                Severity::High,
                format!("Include {element} details in the application"),
                *section,
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn articles_without_share_capital_flagged() {
        let text = "articles of association establishing the company structure \
                    with a director and objects clause";
        let issues = check_for_type(text, &DocType::ArticlesOfAssociation);
        assert!(issues
            .iter()
            .any(|i| i.kind.contains("share capital") && i.severity == Severity::High));
    }

    #[test]
    fn complete_articles_are_clean() {
        let text = "articles of association: share capital of aed 100,000; the \
                    director appointments; the objects of the company";
        assert!(check_for_type(text, &DocType::ArticlesOfAssociation).is_empty());
    }

    #[test]
    fn family_gate_prevents_cross_type_noise() {
        // Text that never mentions a memorandum cannot raise memorandum issues.
        let text = "articles of association with shares, director, and objects";
        assert!(check_memorandum(text).is_empty());
        assert!(check_ubo(text).is_empty());
    }

    #[test]
    fn memorandum_missing_registered_office() {
        let text = "memorandum of association of testcorp limited";
        let issues = check_for_type(text, &DocType::MemorandumOfAssociation);
        assert!(issues
            .iter()
            .any(|i| i.kind.contains("registered office") && i.severity == Severity::High));
    }

    #[test]
    fn ubo_missing_fields_each_flagged() {
        let text = "ubo declaration covering 25% ownership with full name and address";
        let issues = check_for_type(text, &DocType::UboDeclaration);

        let kinds: Vec<&str> = issues.iter().map(|i| i.kind.as_str()).collect();
        assert!(kinds.iter().any(|k| k.contains("nationality")));
        assert!(kinds.iter().any(|k| k.contains("date of birth")));
        assert!(!kinds.iter().any(|k| k.contains("full name")));
        assert!(!kinds.iter().any(|k| k.contains("threshold")));
    }

    #[test]
    fn incorporation_application_requires_four_elements() {
        let text = "application for incorporation";
        let issues = check_for_type(text, &DocType::IncorporationApplication);
        assert_eq!(issues.len(), 4);
        assert!(issues.iter().all(|i| i.severity == Severity::High));
    }

    #[test]
    fn check_all_only_fires_gated_families() {
        let text = "a plain services agreement with no corporate markers";
        assert!(check_all(text).is_empty());
    }
}
