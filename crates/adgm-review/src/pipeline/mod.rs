//! Batch orchestration: classify, check, cite, annotate, report
//!
//! One pipeline run takes a set of input documents and an output directory
//! and always produces a consolidated report, even when individual
//! documents fail to read or annotate. Per-document failures become data
//! (a High-severity issue, a `None` output slot), never control flow.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::annotate::{AnnotationWriter, DocxPackage};
use crate::classify;
use crate::config::ReviewConfig;
use crate::corpus::CitationRetriever;
use crate::error::Result;
use crate::rules;
use crate::types::{Classification, DocType, Issue, ProcessTag, Report, Severity};

/// Required document set for one legal process
#[derive(Debug, Clone, Copy)]
pub struct ProcessChecklist {
    pub process: ProcessTag,
    pub required: &'static [DocType],
}

/// Checklists in fixed declaration order; inference takes the first match
pub const PROCESS_CHECKLISTS: &[ProcessChecklist] = &[
    ProcessChecklist {
        process: ProcessTag::CompanyIncorporation,
        required: &[
            DocType::ArticlesOfAssociation,
            DocType::MemorandumOfAssociation,
            DocType::IncorporationApplication,
            DocType::UboDeclaration,
            DocType::RegisterOfMembersAndDirectors,
        ],
    },
    ProcessChecklist {
        process: ProcessTag::CommercialLicensing,
        required: &[
            DocType::CommercialLicenseApplication,
            DocType::BusinessPlan,
            DocType::LeaseAgreement,
            DocType::FinancialProjections,
        ],
    },
    ProcessChecklist {
        process: ProcessTag::EmploymentDocumentation,
        required: &[
            DocType::EmploymentContract,
            DocType::JobDescription,
            DocType::SalaryCertificate,
        ],
    },
];

/// Infer the governing process from pooled document types
///
/// A process matches when the pooled types cover at least
/// `max(2, 0.4 × required_count)` of its checklist. Checklists with large
/// overlaps can shadow each other; the first match in declaration order
/// wins, a known limitation of this heuristic.
pub fn infer_process(types: &[DocType]) -> ProcessTag {
    let present: HashSet<DocType> = types.iter().copied().collect();

    for checklist in PROCESS_CHECKLISTS {
        let overlap = checklist
            .required
            .iter()
            .filter(|required| present.contains(*required))
            .count();
        let threshold = (checklist.required.len() as f32 * 0.4).max(2.0);
        if overlap as f32 >= threshold {
            return checklist.process;
        }
    }

    ProcessTag::Unknown
}

/// Outcome of one batch run
#[derive(Debug)]
pub struct BatchOutcome {
    pub report: Report,
    /// One slot per input, `None` where annotation failed
    pub outputs: Vec<Option<PathBuf>>,
}

/// Review pipeline service object
///
/// Holds its collaborators explicitly; the citation retriever is optional
/// and its absence degrades every issue to `citation: None`.
pub struct Pipeline {
    config: ReviewConfig,
    retriever: Option<Arc<CitationRetriever>>,
}

impl Pipeline {
    pub fn new(config: ReviewConfig) -> Self {
        Self {
            config,
            retriever: None,
        }
    }

    /// Attach a citation source
    pub fn with_retriever(mut self, retriever: Arc<CitationRetriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Classify and rule-check a single document
    ///
    /// Never fails: unreadable or empty documents yield an `Unknown`
    /// classification and one High-severity issue describing the problem.
    pub fn analyze_document(&self, path: &Path) -> (Vec<Classification>, Vec<Issue>) {
        let package = match DocxPackage::open(path) {
            Ok(package) => package,
            Err(e) => {
                tracing::error!("Error analyzing document {}: {e}", path.display());
                return (
                    vec![Classification::unknown()],
                    vec![Issue::new(
                        format!("Error reading document: {e}"),
                        Severity::High,
                        "Provide a readable .docx file",
                        "General",
                    )],
                );
            }
        };

        let text = package.text();
        if text.trim().is_empty() {
            tracing::warn!("Document {} appears to be empty", path.display());
            return (
                vec![Classification::unknown()],
                vec![Issue::new(
                    "Document appears to be empty",
                    Severity::High,
                    "Provide document content for review",
                    "General",
                )],
            );
        }

        (classify::classify(&text), rules::check(&text, None))
    }

    /// Review a batch of documents, producing annotated copies and a report
    pub async fn review_batch(&self, paths: &[PathBuf], output_dir: &Path) -> Result<BatchOutcome> {
        std::fs::create_dir_all(output_dir)?;
        tracing::info!("Processing {} documents", paths.len());

        let mut pooled_types: Vec<DocType> = Vec::new();
        let mut all_issues: Vec<Issue> = Vec::new();

        for path in paths {
            let doc_name = document_name(path);
            tracing::info!("Analyzing: {doc_name}");

            let (classifications, mut issues) = self.analyze_document(path);
            pooled_types.extend(classifications.iter().map(|c| c.doc_type));
            for issue in &mut issues {
                issue.document = doc_name.clone();
            }
            all_issues.extend(issues);
        }

        let process = infer_process(&pooled_types);
        tracing::info!("Inferred process: {process}");

        let (required_documents, missing_document) = match PROCESS_CHECKLISTS
            .iter()
            .find(|c| c.process == process)
        {
            Some(checklist) => {
                let present: HashSet<DocType> = pooled_types.iter().copied().collect();
                let missing: Vec<DocType> = checklist
                    .required
                    .iter()
                    .filter(|required| !present.contains(*required))
                    .copied()
                    .collect();
                (
                    checklist.required.len(),
                    (!missing.is_empty()).then_some(missing),
                )
            }
            None => (0, None),
        };

        if let Some(retriever) = &self.retriever {
            tracing::info!("Adding citations to {} issues", all_issues.len());
            for issue in &mut all_issues {
                match retriever.retrieve(&issue.kind).await {
                    Ok(citation) => issue.citation = Some(citation),
                    Err(e) => {
                        tracing::error!("Error getting citation for '{}': {e}", issue.kind);
                        issue.citation = None;
                    }
                }
            }
        }

        let writer = AnnotationWriter::new(&self.config.annotation);
        let mut outputs = Vec::with_capacity(paths.len());
        for path in paths {
            let doc_name = document_name(path);
            let output_path = output_dir.join(format!("reviewed_{doc_name}"));
            let doc_issues: Vec<Issue> = all_issues
                .iter()
                .filter(|issue| issue.document == doc_name)
                .cloned()
                .collect();

            match annotate_one(path, &output_path, &writer, &doc_issues) {
                Ok(()) => {
                    tracing::info!("Created annotated document: {}", output_path.display());
                    outputs.push(Some(output_path));
                }
                Err(e) => {
                    tracing::error!("Error annotating document {}: {e}", path.display());
                    outputs.push(None);
                }
            }
        }

        let report = Report {
            process,
            documents_uploaded: paths.len(),
            required_documents,
            missing_document,
            issues_found: all_issues,
        };
        report.save_json(&output_dir.join("consolidated_report.json"))?;

        Ok(BatchOutcome { report, outputs })
    }

    /// Review one document, writing the annotated copy to `output_path`
    pub async fn review_single(&self, input: &Path, output_path: &Path) -> Result<Report> {
        let output_dir = output_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let inputs = [input.to_path_buf()];
        let outcome = self.review_batch(&inputs, output_dir).await?;

        if let Some(Some(produced)) = outcome.outputs.first() {
            if produced != output_path {
                std::fs::rename(produced, output_path)?;
            }
        }

        Ok(outcome.report)
    }
}

fn annotate_one(
    input: &Path,
    output_path: &Path,
    writer: &AnnotationWriter,
    issues: &[Issue],
) -> Result<()> {
    let mut package = DocxPackage::open(input)?;
    writer.annotate(&mut package, issues)?;
    package.save(output_path)
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::docx::build_minimal_docx;
    use crate::config::ReviewConfig;
    use crate::corpus::index::{ChunkRecord, CorpusIndex};
    use crate::providers::{CompletionProvider, EmbeddingProvider};
    use async_trait::async_trait;

    fn articles_docx() -> Vec<u8> {
        build_minimal_docx(&[
            "ARTICLES OF ASSOCIATION",
            "Article 1 - Company Name",
            "The company name is DemoCorp LLC.",
            "Article 2 - Share Capital",
            "The authorized share capital is AED 150,000 held by the shareholders.",
            "Article 3 - Directors",
            "This clause provides for at least one director.",
            "IN WITNESS WHEREOF the subscribers have executed these Articles. Signature: ____",
        ])
    }

    #[test]
    fn articles_scenario_classifies_with_confidence() {
        let package =
            DocxPackage::from_bytes("articles.docx", &articles_docx()).unwrap();
        let text = package.text();

        let classifications = classify::classify(&text);
        assert_eq!(
            classifications[0].doc_type,
            DocType::ArticlesOfAssociation
        );
        assert!(classifications[0].confidence >= 0.6);

        // Directors are present, so no High-severity missing-directors issue.
        let issues = rules::check(&text, None);
        assert!(!issues.iter().any(|i| {
            i.kind.contains("Missing directors") && i.severity == Severity::High
        }));
    }

    #[test]
    fn incorporation_process_inferred_with_missing_documents() {
        let pooled = [
            DocType::ArticlesOfAssociation,
            DocType::MemorandumOfAssociation,
            DocType::UboDeclaration,
        ];
        assert_eq!(infer_process(&pooled), ProcessTag::CompanyIncorporation);

        let present: HashSet<DocType> = pooled.iter().copied().collect();
        let checklist = &PROCESS_CHECKLISTS[0];
        let missing: Vec<DocType> = checklist
            .required
            .iter()
            .filter(|d| !present.contains(*d))
            .copied()
            .collect();
        assert!(missing.contains(&DocType::RegisterOfMembersAndDirectors));
        assert!(missing.contains(&DocType::IncorporationApplication));
    }

    #[test]
    fn single_known_type_is_not_enough_for_a_process() {
        assert_eq!(
            infer_process(&[DocType::ArticlesOfAssociation]),
            ProcessTag::Unknown
        );
        assert_eq!(infer_process(&[DocType::Unknown]), ProcessTag::Unknown);
        assert_eq!(infer_process(&[]), ProcessTag::Unknown);
    }

    #[test]
    fn employment_process_inferred() {
        let pooled = [DocType::EmploymentContract, DocType::JobDescription];
        assert_eq!(infer_process(&pooled), ProcessTag::EmploymentDocumentation);
    }

    #[tokio::test]
    async fn batch_produces_report_and_annotated_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("articles.docx");
        std::fs::write(&input, articles_docx()).unwrap();
        let output_dir = dir.path().join("reviewed");

        let pipeline = Pipeline::new(ReviewConfig::default());
        let outcome = pipeline
            .review_batch(&[input], &output_dir)
            .await
            .unwrap();

        assert_eq!(outcome.report.documents_uploaded, 1);
        assert_eq!(outcome.outputs.len(), 1);

        let produced = outcome.outputs[0].as_ref().expect("annotation succeeded");
        let reviewed = DocxPackage::open(produced).unwrap();
        assert_eq!(reviewed.comments().len(), outcome.report.issues_found.len());
        assert!(reviewed.text().contains("ARTICLES OF ASSOCIATION"));

        // Every issue is tagged with its source document.
        assert!(outcome
            .report
            .issues_found
            .iter()
            .all(|i| i.document == "articles.docx"));

        let report_text =
            std::fs::read_to_string(output_dir.join("consolidated_report.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report_text).unwrap();
        assert_eq!(value["documents_uploaded"], 1);
    }

    #[tokio::test]
    async fn unreadable_document_becomes_issue_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("articles.docx");
        std::fs::write(&good, articles_docx()).unwrap();
        let bad = dir.path().join("broken.docx");
        std::fs::write(&bad, b"this is not a zip archive").unwrap();
        let output_dir = dir.path().join("reviewed");

        let pipeline = Pipeline::new(ReviewConfig::default());
        let outcome = pipeline
            .review_batch(&[good, bad], &output_dir)
            .await
            .unwrap();

        assert_eq!(outcome.report.documents_uploaded, 2);
        assert!(outcome.outputs[0].is_some());
        assert!(outcome.outputs[1].is_none());

        let broken_issues: Vec<&Issue> = outcome
            .report
            .issues_found
            .iter()
            .filter(|i| i.document == "broken.docx")
            .collect();
        assert_eq!(broken_issues.len(), 1);
        assert_eq!(broken_issues[0].severity, Severity::High);
        assert!(broken_issues[0].kind.contains("Error reading document"));

        // The report artifact still lands on disk.
        assert!(output_dir.join("consolidated_report.json").exists());
    }

    #[tokio::test]
    async fn empty_document_is_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.docx");
        std::fs::write(&input, build_minimal_docx(&["", "  "])).unwrap();

        let pipeline = Pipeline::new(ReviewConfig::default());
        let (classifications, issues) = pipeline.analyze_document(&input);

        assert_eq!(classifications[0].doc_type, DocType::Unknown);
        assert!(issues.iter().any(|i| i.kind.contains("empty")));
    }

    struct FixedEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FixedEmbedder {
        async fn embed_batch(&self, texts: &[String]) -> crate::error::Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![0.1, 0.9]).collect())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct CannedLlm;

    #[async_trait]
    impl CompletionProvider for CannedLlm {
        async fn complete(&self, _prompt: &str) -> crate::error::Result<String> {
            Ok(r#"{"citation": "Companies Regulations 2020, Article 15", "excerpt": "Documents must be properly executed"}"#.to_string())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    fn in_memory_retriever() -> Arc<CitationRetriever> {
        let index = Arc::new(
            CorpusIndex::new(
                2,
                vec![vec![0.1, 0.9]],
                vec![ChunkRecord {
                    id: 0,
                    source: "corpus/companies_regulations.pdf".to_string(),
                    page: Some(15),
                    chunk_index: 0,
                    text: "Documents must be properly executed before filing.".to_string(),
                }],
            )
            .unwrap(),
        );
        Arc::new(CitationRetriever::new(
            index,
            Arc::new(FixedEmbedder),
            Arc::new(CannedLlm),
            3,
        ))
    }

    #[tokio::test]
    async fn retriever_enriches_every_issue_with_a_citation() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("articles.docx");
        std::fs::write(&input, articles_docx()).unwrap();
        let output_dir = dir.path().join("reviewed");

        let pipeline =
            Pipeline::new(ReviewConfig::default()).with_retriever(in_memory_retriever());
        let outcome = pipeline
            .review_batch(&[input], &output_dir)
            .await
            .unwrap();

        assert!(!outcome.report.issues_found.is_empty());
        for issue in &outcome.report.issues_found {
            let citation = issue.citation.as_ref().expect("citation attached");
            assert_eq!(
                citation.summary.citation,
                "Companies Regulations 2020, Article 15"
            );
            assert_eq!(citation.results.len(), 1);
        }
    }

    #[tokio::test]
    async fn review_single_places_output_at_requested_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("articles.docx");
        std::fs::write(&input, articles_docx()).unwrap();
        let output = dir.path().join("out").join("final_articles.docx");
        std::fs::create_dir_all(output.parent().unwrap()).unwrap();

        let pipeline = Pipeline::new(ReviewConfig::default());
        let report = pipeline.review_single(&input, &output).await.unwrap();

        assert_eq!(report.documents_uploaded, 1);
        assert!(output.exists());
        DocxPackage::open(&output).unwrap();
    }
}
