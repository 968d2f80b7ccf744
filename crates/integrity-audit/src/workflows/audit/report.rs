use super::catalog::CategoryCatalog;
use super::classify::SusceptibilityTier;
use super::reconcile::{ReconciledCategoryResult, MAX_SCORE};
use serde::Serialize;

pub const DEFAULT_DOC_CONTEXT: &str = "Assessment Audit";
pub const FALLBACK_IMPROVEMENT: &str = "Review individual categories for specific improvements";

/// Finished audit for one submission. Read-only once assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    doc_context: String,
    top_improvements: Vec<String>,
    category_results: Vec<ReconciledCategoryResult>,
    total_score: u32,
    susceptibility: SusceptibilityTier,
}

/// Raised when the reconciled results do not cover the catalog exactly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("reconciliation produced {actual} category results, expected {expected}")]
pub struct IncompleteReconciliation {
    pub expected: usize,
    pub actual: usize,
}

/// Composes the report, substituting defaults for missing upstream fields.
pub fn assemble(
    catalog: &CategoryCatalog,
    doc_context: Option<String>,
    top_improvements: Option<Vec<String>>,
    reconciled: Vec<ReconciledCategoryResult>,
    total_score: u32,
    tier: SusceptibilityTier,
) -> Result<AuditReport, IncompleteReconciliation> {
    if reconciled.len() != catalog.len() {
        return Err(IncompleteReconciliation {
            expected: catalog.len(),
            actual: reconciled.len(),
        });
    }

    let doc_context = doc_context
        .filter(|context| !context.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DOC_CONTEXT.to_string());
    let top_improvements =
        top_improvements.unwrap_or_else(|| vec![FALLBACK_IMPROVEMENT.to_string()]);

    Ok(AuditReport {
        doc_context,
        top_improvements,
        category_results: reconciled,
        total_score,
        susceptibility: tier,
    })
}

impl AuditReport {
    pub fn doc_context(&self) -> &str {
        &self.doc_context
    }

    pub fn top_improvements(&self) -> &[String] {
        &self.top_improvements
    }

    pub fn category_results(&self) -> &[ReconciledCategoryResult] {
        &self.category_results
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn max_score(&self) -> u32 {
        self.category_results.len() as u32 * u32::from(MAX_SCORE)
    }

    pub fn susceptibility(&self) -> SusceptibilityTier {
        self.susceptibility
    }

    /// Joins each result with its catalog narrative and remediation actions.
    pub fn briefings(&self, catalog: &CategoryCatalog) -> Vec<CategoryBriefing> {
        self.category_results
            .iter()
            .map(|result| {
                let definition = catalog.get(&result.category);
                let standing = SusceptibilityTier::for_category_score(result.verified_score);
                CategoryBriefing {
                    category: result.category.clone(),
                    verified_score: result.verified_score,
                    standing: standing.position_label(),
                    critique: result.critique.clone(),
                    question: result.question.clone(),
                    quote: result.quote.clone(),
                    narrative_context: definition
                        .map(|definition| definition.narrative_context)
                        .unwrap_or_default(),
                    remediation_actions: definition
                        .map(|definition| definition.remediation_actions.clone())
                        .unwrap_or_default(),
                }
            })
            .collect()
    }

    pub fn view(&self, catalog: &CategoryCatalog) -> AuditReportView {
        AuditReportView {
            doc_context: self.doc_context.clone(),
            total_score: self.total_score,
            max_score: self.max_score(),
            susceptibility: self.susceptibility,
            susceptibility_label: self.susceptibility.label(),
            susceptibility_description: self.susceptibility.description(),
            top_improvements: self.top_improvements.clone(),
            categories: self.briefings(catalog),
        }
    }
}

/// Per-category block consumed by rendering and export collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBriefing {
    pub category: String,
    pub verified_score: u8,
    pub standing: &'static str,
    pub critique: String,
    pub question: String,
    pub quote: String,
    pub narrative_context: &'static str,
    pub remediation_actions: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReportView {
    pub doc_context: String,
    pub total_score: u32,
    pub max_score: u32,
    pub susceptibility: SusceptibilityTier,
    pub susceptibility_label: &'static str,
    pub susceptibility_description: &'static str,
    pub top_improvements: Vec<String>,
    pub categories: Vec<CategoryBriefing>,
}
