//! Jurisdiction and governing-law checks

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Issue, Severity};

use super::section::find_section;

static UAE_FEDERAL_COURT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\buae federal court\b").expect("Invalid regex"));
static DUBAI_COURT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bdubai court\b").expect("Invalid regex"));
static ADGM_COURT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\badgm court\b").expect("Invalid regex"));
static UAE_CIVIL_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\buae civil code\b").expect("Invalid regex"));
static ADGM_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\badgm\b").expect("Invalid regex"));

/// Flag references to courts and laws outside ADGM jurisdiction
pub fn check_jurisdiction(text: &str, text_lower: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    if UAE_FEDERAL_COURT.is_match(text_lower) {
        issues.push(Issue::new(
            "References UAE Federal Courts instead of ADGM Courts",
            Severity::High,
            "Replace with \"ADGM Courts\" for proper jurisdiction",
            find_section(text, "uae federal court"),
        ));
    }

    if DUBAI_COURT.is_match(text_lower) {
        issues.push(Issue::new(
            "References Dubai Courts instead of ADGM Courts",
            Severity::High,
            "Update jurisdiction to ADGM Courts",
            find_section(text, "dubai court"),
        ));
    }

    if text_lower.contains("jurisdiction") && !ADGM_COURT.is_match(text_lower) {
        issues.push(Issue::new(
            "Jurisdiction clause present but does not specify ADGM Courts",
            Severity::High,
            "Specify ADGM Courts as the governing jurisdiction",
            find_section(text, "jurisdiction"),
        ));
    }

    if UAE_CIVIL_CODE.is_match(text_lower) && !ADGM_REF.is_match(text_lower) {
        issues.push(Issue::new(
            "References UAE Civil Code without ADGM context",
            Severity::Medium,
            "Specify ADGM laws take precedence where applicable",
            find_section(text, "uae civil code"),
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_uae_federal_courts() {
        let text = "This agreement shall be governed by UAE Federal Courts.";
        let issues = check_jurisdiction(text, &text.to_lowercase());

        let hit = issues
            .iter()
            .find(|i| i.kind.contains("UAE Federal Courts"))
            .expect("expected a federal-courts issue");
        assert_eq!(hit.severity, Severity::High);
    }

    #[test]
    fn flags_jurisdiction_clause_without_adgm_courts() {
        let text = "The exclusive jurisdiction for disputes lies with Dubai Courts.";
        let issues = check_jurisdiction(text, &text.to_lowercase());

        assert!(issues.iter().any(|i| i.kind.contains("Dubai Courts")));
        assert!(issues
            .iter()
            .any(|i| i.kind.contains("does not specify ADGM Courts")));
    }

    #[test]
    fn adgm_courts_clause_is_clean() {
        let text = "Jurisdiction: any dispute is referred to the ADGM Court of First Instance.";
        let issues = check_jurisdiction(text, &text.to_lowercase());
        assert!(issues.is_empty());
    }

    #[test]
    fn civil_code_needs_adgm_context() {
        let with_context =
            "Subject to the UAE Civil Code, ADGM regulations prevail where applicable.";
        assert!(check_jurisdiction(with_context, &with_context.to_lowercase()).is_empty());

        let without_context = "The UAE Civil Code governs this matter.";
        let issues = check_jurisdiction(without_context, &without_context.to_lowercase());
        assert!(issues.iter().any(|i| i.kind.contains("UAE Civil Code")));
        assert_eq!(issues[0].severity, Severity::Medium);
    }
}
