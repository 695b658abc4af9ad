//! Confidence-scored document type detection
//!
//! Pattern scoring runs over lowercased, whitespace-collapsed text. Types
//! clearing their threshold are returned ordered by descending confidence;
//! when nothing clears, a lexical fallback over generic legal nouns kicks
//! in, and failing that a word-count bucket. The result is never empty.

pub mod patterns;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Classification, DocType};

use patterns::{
    patterns, TypePattern, EXCLUSION_PENALTY, MULTI_PRIMARY_BONUS, PRIMARY_WEIGHT,
    SECONDARY_WEIGHT, STRUCTURAL_WEIGHT,
};

/// Confidence assigned to fallback classifications
pub const FALLBACK_CONFIDENCE: f32 = 0.3;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// Detect document types with confidence scores
///
/// Returns classifications ordered by descending confidence; never empty.
/// Empty or whitespace-only input yields exactly `[Unknown @ 0.0]`.
pub fn classify(text: &str) -> Vec<Classification> {
    if text.trim().is_empty() {
        return vec![Classification::unknown()];
    }

    let normalized = WHITESPACE.replace_all(&text.to_lowercase(), " ").into_owned();

    let mut detected: Vec<Classification> = patterns()
        .iter()
        .filter_map(|pattern| {
            let confidence = pattern_confidence(&normalized, pattern);
            (confidence >= pattern.threshold)
                .then(|| Classification::new(pattern.doc_type, confidence))
        })
        .collect();

    detected.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if detected.is_empty() {
        detected.push(Classification::new(
            fallback_type(&normalized),
            FALLBACK_CONFIDENCE,
        ));
    }

    detected
}

/// Score one pattern set against normalized text
fn pattern_confidence(text: &str, pattern: &TypePattern) -> f32 {
    let mut score = 0.0;
    let mut total_possible = 0.0;

    let mut primary_found = 0;
    for keyword in pattern.primary {
        total_possible += PRIMARY_WEIGHT;
        if text.contains(keyword) {
            primary_found += 1;
            score += PRIMARY_WEIGHT;
        }
    }
    if primary_found > 1 {
        score += MULTI_PRIMARY_BONUS;
    }

    for keyword in pattern.secondary {
        total_possible += SECONDARY_WEIGHT;
        if text.contains(keyword) {
            score += SECONDARY_WEIGHT;
        }
    }

    for indicator in pattern.structural {
        total_possible += STRUCTURAL_WEIGHT;
        if text.contains(indicator) {
            score += STRUCTURAL_WEIGHT;
        }
    }

    for exclusion in pattern.exclusion {
        if text.contains(exclusion) {
            score -= EXCLUSION_PENALTY;
        }
    }

    if total_possible > 0.0 {
        (score / total_possible).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Lexical and word-count fallback for unrecognized documents
fn fallback_type(text: &str) -> DocType {
    const LEGAL_INDICATORS: &[(&str, DocType)] = &[
        ("contract", DocType::GeneralContract),
        ("agreement", DocType::GeneralAgreement),
        ("resolution", DocType::GeneralResolution),
        ("application", DocType::GeneralApplication),
        ("declaration", DocType::GeneralDeclaration),
        ("certificate", DocType::GeneralCertificate),
        ("notice", DocType::GeneralNotice),
        ("policy", DocType::GeneralPolicy),
        ("procedure", DocType::GeneralProcedure),
        ("form", DocType::GeneralForm),
    ];

    for (indicator, doc_type) in LEGAL_INDICATORS {
        if text.contains(indicator) {
            return *doc_type;
        }
    }

    let word_count = text.split_whitespace().count();
    if word_count < 100 {
        DocType::ShortFormNotice
    } else if word_count > 2000 {
        DocType::ComplexLegalDocument
    } else {
        DocType::StandardBusinessDocument
    }
}

/// Per-type completeness requirements
#[derive(Debug, Clone, Copy)]
pub struct TypeRequirements {
    pub required_sections: &'static [&'static str],
    pub signatures_required: &'static [&'static str],
    pub witnesses_required: bool,
}

/// Typical requirements for a document type
pub fn requirements_for(doc_type: DocType) -> TypeRequirements {
    match doc_type {
        DocType::ArticlesOfAssociation => TypeRequirements {
            required_sections: &["Company Name", "Share Capital", "Directors", "Objects"],
            signatures_required: &["Directors", "Shareholders"],
            witnesses_required: false,
        },
        DocType::MemorandumOfAssociation => TypeRequirements {
            required_sections: &["Company Name", "Registered Office", "Objects", "Liability"],
            signatures_required: &["Subscribers"],
            witnesses_required: true,
        },
        DocType::UboDeclaration => TypeRequirements {
            required_sections: &["Personal Details", "Ownership Details", "Declaration"],
            signatures_required: &["UBO", "Company Officer"],
            witnesses_required: false,
        },
        DocType::BoardResolution => TypeRequirements {
            required_sections: &["Meeting Details", "Resolutions", "Voting"],
            signatures_required: &["Directors"],
            witnesses_required: false,
        },
        DocType::EmploymentContract => TypeRequirements {
            required_sections: &["Parties", "Job Description", "Remuneration", "Termination"],
            signatures_required: &["Employee", "Employer"],
            witnesses_required: false,
        },
        _ => TypeRequirements {
            required_sections: &[],
            signatures_required: &["Parties"],
            witnesses_required: false,
        },
    }
}

/// Result of a completeness pass over one document
#[derive(Debug, Clone, Default)]
pub struct CompletenessAnalysis {
    pub completeness_score: f32,
    pub present_elements: Vec<String>,
    pub missing_elements: Vec<String>,
}

/// Check which required elements of the primary detected type are present
pub fn analyze_completeness(text: &str, doc_types: &[DocType]) -> CompletenessAnalysis {
    let mut analysis = CompletenessAnalysis::default();

    let primary = match doc_types.first() {
        Some(t) if *t != DocType::Unknown => *t,
        _ => return analysis,
    };

    let requirements = requirements_for(primary);
    let text_lower = text.to_lowercase();

    let mut total = requirements.required_sections.len();
    let mut present = 0usize;

    for section in requirements.required_sections {
        if text_lower.contains(&section.to_lowercase()) {
            analysis.present_elements.push((*section).to_string());
            present += 1;
        } else {
            analysis.missing_elements.push((*section).to_string());
        }
    }

    const SIGNATURE_INDICATORS: &[&str] = &["signature", "signed", "executed", "witness"];
    let has_signatures = SIGNATURE_INDICATORS
        .iter()
        .any(|indicator| text_lower.contains(indicator));

    if has_signatures {
        analysis.present_elements.push("Signature Block".to_string());
        present += 1;
        total += 1;
    } else if !requirements.signatures_required.is_empty() {
        analysis.missing_elements.push("Signature Block".to_string());
    }

    if total > 0 {
        analysis.completeness_score = present as f32 / total as f32;
    }

    analysis
}
