//! Issues raised by the rule engine, with severity scoring

use serde::{Deserialize, Serialize};

use super::citation::Citation;

/// How serious a detected issue is
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Weight used for prioritization scoring
    pub fn weight(&self) -> u32 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.write_str(s)
    }
}

/// A single compliance finding
///
/// Created by the rule engine; the pipeline tags it with the source document
/// name and, when a citation index is configured, attaches a citation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Description of the finding
    pub kind: String,
    pub severity: Severity,
    /// Recommended remediation
    pub suggestion: String,
    /// Best-effort section locator ("SHARE CAPITAL", "Line 12", "General")
    pub section: String,
    /// File name of the document the issue was found in
    #[serde(default)]
    pub document: String,
    /// Supporting citation from the reference corpus, if one was retrieved
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub citation: Option<Citation>,
}

impl Issue {
    pub fn new(
        kind: impl Into<String>,
        severity: Severity,
        suggestion: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            severity,
            suggestion: suggestion.into(),
            section: section.into(),
            document: String::new(),
            citation: None,
        }
    }
}

/// Aggregate severity statistics over a set of issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityScore {
    pub total_score: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    /// Highest severity band with at least one issue; `Low` when empty
    pub priority: Severity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering_follows_weight() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert_eq!(Severity::High.weight(), 3);
        assert_eq!(Severity::Medium.weight(), 2);
        assert_eq!(Severity::Low.weight(), 1);
    }

    #[test]
    fn issue_omits_absent_citation_in_json() {
        let issue = Issue::new(
            "Missing signature block or execution clause",
            Severity::High,
            "Add proper signature block with name, title, and date fields",
            "End of document",
        );
        let json = serde_json::to_value(&issue).unwrap();
        assert!(json.get("citation").is_none());
        assert_eq!(json["severity"], "High");
    }
}
