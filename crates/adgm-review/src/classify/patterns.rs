//! Static pattern table driving type detection
//!
//! Each known type owns four keyword sets and an emission threshold. The
//! table is validated once on first access: every entry needs at least one
//! primary keyword and a threshold inside [0, 1].

use once_cell::sync::Lazy;

use crate::types::DocType;

/// Keyword weights used by the confidence score
pub const PRIMARY_WEIGHT: f32 = 0.5;
pub const SECONDARY_WEIGHT: f32 = 0.1;
pub const STRUCTURAL_WEIGHT: f32 = 0.15;
pub const EXCLUSION_PENALTY: f32 = 0.2;
/// Bonus applied when more than one primary keyword matches
pub const MULTI_PRIMARY_BONUS: f32 = 0.1;

/// Pattern set for one document type
#[derive(Debug, Clone, Copy)]
pub struct TypePattern {
    pub doc_type: DocType,
    pub primary: &'static [&'static str],
    pub secondary: &'static [&'static str],
    pub structural: &'static [&'static str],
    pub exclusion: &'static [&'static str],
    pub threshold: f32,
}

const TABLE: &[TypePattern] = &[
    TypePattern {
        doc_type: DocType::ArticlesOfAssociation,
        primary: &["articles of association", "articles of incorporation"],
        secondary: &[
            "share capital",
            "directors",
            "shareholders",
            "company constitution",
        ],
        structural: &["article 1", "article 2", "clause"],
        exclusion: &["memorandum"],
        threshold: 0.6,
    },
    TypePattern {
        doc_type: DocType::MemorandumOfAssociation,
        primary: &["memorandum of association", "memorandum of incorporation"],
        secondary: &["company name", "registered office", "objects", "liability"],
        structural: &["whereas", "now therefore"],
        exclusion: &["articles"],
        threshold: 0.6,
    },
    TypePattern {
        doc_type: DocType::UboDeclaration,
        primary: &[
            "ultimate beneficial owner",
            "ubo declaration",
            "beneficial ownership",
        ],
        secondary: &["25%", "twenty-five percent", "ownership", "control"],
        structural: &["declare", "confirm", "certify"],
        exclusion: &[],
        threshold: 0.5,
    },
    TypePattern {
        doc_type: DocType::RegisterOfMembersAndDirectors,
        primary: &[
            "register of members",
            "register of directors",
            "members register",
        ],
        secondary: &["shareholder", "director", "appointment", "resignation"],
        structural: &["name", "address", "shares held", "date of appointment"],
        exclusion: &[],
        threshold: 0.5,
    },
    TypePattern {
        doc_type: DocType::IncorporationApplication,
        primary: &[
            "incorporation application",
            "application for incorporation",
            "company formation",
        ],
        secondary: &["proposed name", "business activity", "applicant"],
        structural: &["applicant details", "proposed activities"],
        exclusion: &[],
        threshold: 0.5,
    },
    TypePattern {
        doc_type: DocType::BoardResolution,
        primary: &["board resolution", "directors' resolution", "board meeting"],
        secondary: &["resolved", "directors", "meeting", "unanimous"],
        structural: &["it was resolved", "resolved that", "meeting held"],
        exclusion: &["shareholder"],
        threshold: 0.5,
    },
    TypePattern {
        doc_type: DocType::ShareholderResolution,
        primary: &[
            "shareholder resolution",
            "shareholders' resolution",
            "general meeting",
        ],
        secondary: &["resolved", "shareholders", "meeting", "ordinary resolution"],
        structural: &["it was resolved", "resolved that", "meeting held"],
        exclusion: &["board", "directors"],
        threshold: 0.5,
    },
    TypePattern {
        doc_type: DocType::EmploymentContract,
        primary: &[
            "employment contract",
            "employment agreement",
            "service agreement",
        ],
        secondary: &["employee", "employer", "salary", "termination", "duties"],
        structural: &["terms of employment", "job description", "remuneration"],
        exclusion: &[],
        threshold: 0.5,
    },
    TypePattern {
        doc_type: DocType::CommercialLicenseApplication,
        primary: &["commercial license", "license application", "business license"],
        secondary: &["trade name", "business activity", "premises"],
        structural: &["license details", "business activities"],
        exclusion: &[],
        threshold: 0.5,
    },
    TypePattern {
        doc_type: DocType::PowerOfAttorney,
        primary: &["power of attorney", "poa", "attorney"],
        secondary: &["appoint", "attorney", "behalf", "authorize"],
        structural: &["hereby appoint", "full power", "in witness whereof"],
        exclusion: &[],
        threshold: 0.5,
    },
    TypePattern {
        doc_type: DocType::LeaseAgreement,
        primary: &["lease agreement", "tenancy agreement", "rental agreement"],
        secondary: &["landlord", "tenant", "premises", "rent", "lease term"],
        structural: &["lease term", "rental amount", "premises description"],
        exclusion: &[],
        threshold: 0.5,
    },
    TypePattern {
        doc_type: DocType::NonDisclosureAgreement,
        primary: &[
            "non-disclosure agreement",
            "nda",
            "confidentiality agreement",
        ],
        secondary: &["confidential", "proprietary", "disclosure", "information"],
        structural: &["confidential information", "non-disclosure"],
        exclusion: &[],
        threshold: 0.5,
    },
];

static VALIDATED: Lazy<&'static [TypePattern]> = Lazy::new(|| {
    for pattern in TABLE {
        assert!(
            !pattern.primary.is_empty(),
            "pattern table entry '{}' has no primary keywords",
            pattern.doc_type
        );
        assert!(
            (0.0..=1.0).contains(&pattern.threshold),
            "pattern table entry '{}' has threshold outside [0, 1]",
            pattern.doc_type
        );
    }
    TABLE
});

/// The validated pattern table, in fixed declaration order
pub fn patterns() -> &'static [TypePattern] {
    &VALIDATED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_passes_load_time_validation() {
        assert_eq!(patterns().len(), 12);
    }

    #[test]
    fn thresholds_are_in_range() {
        for pattern in patterns() {
            assert!(pattern.threshold >= 0.0 && pattern.threshold <= 1.0);
        }
    }
}
