//! Document type tags, classifications, and process tags

use serde::{Deserialize, Serialize};

/// Known document types
///
/// Covers the pattern-matched corporate document types, the checklist-only
/// types that can be required by a process but are never pattern-detected,
/// and the fallback categories used when no pattern clears its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocType {
    #[serde(rename = "Articles of Association")]
    ArticlesOfAssociation,
    #[serde(rename = "Memorandum of Association")]
    MemorandumOfAssociation,
    #[serde(rename = "UBO Declaration")]
    UboDeclaration,
    #[serde(rename = "Register of Members and Directors")]
    RegisterOfMembersAndDirectors,
    #[serde(rename = "Incorporation Application")]
    IncorporationApplication,
    #[serde(rename = "Board Resolution")]
    BoardResolution,
    #[serde(rename = "Shareholder Resolution")]
    ShareholderResolution,
    #[serde(rename = "Employment Contract")]
    EmploymentContract,
    #[serde(rename = "Commercial License Application")]
    CommercialLicenseApplication,
    #[serde(rename = "Power of Attorney")]
    PowerOfAttorney,
    #[serde(rename = "Lease Agreement")]
    LeaseAgreement,
    #[serde(rename = "Non-Disclosure Agreement")]
    NonDisclosureAgreement,

    // Checklist-only types: required by a process, never pattern-detected.
    #[serde(rename = "Business Plan")]
    BusinessPlan,
    #[serde(rename = "Financial Projections")]
    FinancialProjections,
    #[serde(rename = "Job Description")]
    JobDescription,
    #[serde(rename = "Salary Certificate")]
    SalaryCertificate,

    // Lexical fallback categories.
    #[serde(rename = "General Contract")]
    GeneralContract,
    #[serde(rename = "General Agreement")]
    GeneralAgreement,
    #[serde(rename = "General Resolution")]
    GeneralResolution,
    #[serde(rename = "General Application")]
    GeneralApplication,
    #[serde(rename = "General Declaration")]
    GeneralDeclaration,
    #[serde(rename = "General Certificate")]
    GeneralCertificate,
    #[serde(rename = "General Notice")]
    GeneralNotice,
    #[serde(rename = "General Policy")]
    GeneralPolicy,
    #[serde(rename = "General Procedure")]
    GeneralProcedure,
    #[serde(rename = "General Form")]
    GeneralForm,

    // Word-count fallback buckets.
    #[serde(rename = "Short Form/Notice")]
    ShortFormNotice,
    #[serde(rename = "Standard Business Document")]
    StandardBusinessDocument,
    #[serde(rename = "Complex Legal Document")]
    ComplexLegalDocument,

    Unknown,
}

impl DocType {
    /// Human-readable name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArticlesOfAssociation => "Articles of Association",
            Self::MemorandumOfAssociation => "Memorandum of Association",
            Self::UboDeclaration => "UBO Declaration",
            Self::RegisterOfMembersAndDirectors => "Register of Members and Directors",
            Self::IncorporationApplication => "Incorporation Application",
            Self::BoardResolution => "Board Resolution",
            Self::ShareholderResolution => "Shareholder Resolution",
            Self::EmploymentContract => "Employment Contract",
            Self::CommercialLicenseApplication => "Commercial License Application",
            Self::PowerOfAttorney => "Power of Attorney",
            Self::LeaseAgreement => "Lease Agreement",
            Self::NonDisclosureAgreement => "Non-Disclosure Agreement",
            Self::BusinessPlan => "Business Plan",
            Self::FinancialProjections => "Financial Projections",
            Self::JobDescription => "Job Description",
            Self::SalaryCertificate => "Salary Certificate",
            Self::GeneralContract => "General Contract",
            Self::GeneralAgreement => "General Agreement",
            Self::GeneralResolution => "General Resolution",
            Self::GeneralApplication => "General Application",
            Self::GeneralDeclaration => "General Declaration",
            Self::GeneralCertificate => "General Certificate",
            Self::GeneralNotice => "General Notice",
            Self::GeneralPolicy => "General Policy",
            Self::GeneralProcedure => "General Procedure",
            Self::GeneralForm => "General Form",
            Self::ShortFormNotice => "Short Form/Notice",
            Self::StandardBusinessDocument => "Standard Business Document",
            Self::ComplexLegalDocument => "Complex Legal Document",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected document type with its confidence score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(rename = "type")]
    pub doc_type: DocType,
    /// Confidence in [0, 1]
    pub confidence: f32,
}

impl Classification {
    pub fn new(doc_type: DocType, confidence: f32) -> Self {
        Self {
            doc_type,
            confidence,
        }
    }

    /// The classification substituted when nothing else can be said
    pub fn unknown() -> Self {
        Self::new(DocType::Unknown, 0.0)
    }
}

/// The overarching legal process inferred from a batch of documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessTag {
    #[serde(rename = "Company Incorporation")]
    CompanyIncorporation,
    #[serde(rename = "Commercial Licensing")]
    CommercialLicensing,
    #[serde(rename = "Employment Documentation")]
    EmploymentDocumentation,
    Unknown,
}

impl ProcessTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompanyIncorporation => "Company Incorporation",
            Self::CommercialLicensing => "Commercial Licensing",
            Self::EmploymentDocumentation => "Employment Documentation",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ProcessTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_type_serializes_to_display_name() {
        let json = serde_json::to_string(&DocType::ArticlesOfAssociation).unwrap();
        assert_eq!(json, "\"Articles of Association\"");

        let back: DocType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DocType::ArticlesOfAssociation);
    }

    #[test]
    fn classification_round_trips_with_type_key() {
        let c = Classification::new(DocType::UboDeclaration, 0.72);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["type"], "UBO Declaration");

        let back: Classification = serde_json::from_value(json).unwrap();
        assert_eq!(back.doc_type, DocType::UboDeclaration);
    }

    #[test]
    fn process_tag_display_matches_serde() {
        assert_eq!(
            serde_json::to_string(&ProcessTag::CompanyIncorporation).unwrap(),
            format!("\"{}\"", ProcessTag::CompanyIncorporation)
        );
    }
}
