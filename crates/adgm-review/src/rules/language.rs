//! Language clarity and formatting checks

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Issue, Severity};

use super::section::find_section;

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b\d{1,2}/\d{1,2}/\d{2,4}\b",
        r"\b\d{1,2}-\d{1,2}-\d{2,4}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex"))
    .collect()
});

/// Word-count floor above which a definitions section is expected
const LONG_DOC_WORDS: usize = 500;

/// Flag ambiguous phrasing, weak obligation language, missing definitions,
/// and ambiguous numeric dates
pub fn check_language(text: &str, text_lower: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    const AMBIGUOUS_PHRASES: &[(&str, &str)] = &[
        (
            "may or may not",
            "Use definitive language instead of ambiguous terms",
        ),
        ("as appropriate", "Specify exact conditions or requirements"),
        ("if necessary", "Define when such necessity arises"),
        (
            "reasonable",
            "Define what constitutes reasonable in this context",
        ),
    ];

    for (phrase, suggestion) in AMBIGUOUS_PHRASES {
        if text_lower.contains(phrase) {
            issues.push(Issue::new(
                format!("Ambiguous language detected: \"{phrase}\""),
                Severity::Low,
                *suggestion,
                find_section(text, phrase),
            ));
        }
    }

    if !text_lower.contains("shall") && text_lower.contains("will") {
        issues.push(Issue::new(
            "Uses \"will\" instead of \"shall\" for obligations",
            Severity::Low,
            "Use \"shall\" for legal obligations and \"will\" for future actions",
            "General",
        ));
    }

    if !text_lower.contains("definition")
        && !text_lower.contains("means")
        && text.split_whitespace().count() > LONG_DOC_WORDS
    {
        issues.push(Issue::new(
            "Long document may benefit from definitions section",
            Severity::Low,
            "Consider adding a definitions section for key terms",
            "Structure",
        ));
    }

    for pattern in DATE_PATTERNS.iter() {
        if let Some(matched) = pattern.find(text) {
            issues.push(Issue::new(
                "Date format may be ambiguous",
                Severity::Low,
                "Use unambiguous date format (e.g., \"1st January 2024\")",
                find_section(text, matched.as_str()),
            ));
            break;
        }
    }

    issues
}
