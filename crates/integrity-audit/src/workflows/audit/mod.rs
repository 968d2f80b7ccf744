//! Integrity debt audit: prompt construction, tolerant recovery of the model
//! response, reconciliation onto the fixed category catalog, classification
//! and report assembly.

pub mod catalog;
pub mod classify;
pub mod normalizer;
mod payload;
pub mod prompt;
pub mod reconcile;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod submission;

pub use catalog::{CategoryCatalog, CategoryDefinition};
pub use classify::{classify, SusceptibilityTier};
pub use normalizer::{normalize, parse_response, MalformedResponse, NormalizedResponse};
pub use reconcile::{reconcile, ReconciledCategoryResult, Reconciliation};
pub use report::{
    assemble, AuditReport, AuditReportView, CategoryBriefing, IncompleteReconciliation,
};
pub use repository::{AuditRepository, AuditSubmissionRecord, LeadRecord, RepositoryError};
pub use router::audit_router;
pub use service::{AuditService, AuditServiceError};
pub use submission::{AssessmentSubmission, SubmissionError};

use crate::config::SubmissionLimits;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error(transparent)]
    Malformed(#[from] MalformedResponse),
    #[error(transparent)]
    Incomplete(#[from] IncompleteReconciliation),
}

/// Stateless pipeline over an immutable catalog. Every call is a pure
/// function of its inputs.
#[derive(Debug, Clone)]
pub struct IntegrityAuditor {
    catalog: CategoryCatalog,
    limits: SubmissionLimits,
}

impl IntegrityAuditor {
    pub fn new(catalog: CategoryCatalog, limits: SubmissionLimits) -> Self {
        Self { catalog, limits }
    }

    pub fn standard() -> Self {
        Self::new(CategoryCatalog::standard(), SubmissionLimits::default())
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn limits(&self) -> SubmissionLimits {
        self.limits
    }

    /// Validates the assessment text and renders the model prompt for it.
    pub fn prompt_for(&self, assessment_text: &str) -> Result<String, SubmissionError> {
        let submission = AssessmentSubmission::new(assessment_text, self.limits)?;
        Ok(prompt::build_prompt(&self.catalog, &submission))
    }

    /// Normalize, reconcile, classify and assemble one raw model response.
    pub fn audit_response(&self, raw_response: &str) -> Result<AuditReport, AuditError> {
        let normalized = parse_response(raw_response)?;
        let Reconciliation {
            results,
            total_score,
        } = reconcile(&normalized.value, &self.catalog);
        let tier = classify(i64::from(total_score));

        let report = assemble(
            &self.catalog,
            payload::doc_context(&normalized.value),
            payload::top_improvements(&normalized.value),
            results,
            total_score,
            tier,
        )?;

        info!(
            total_score,
            tier = tier.short_label(),
            repaired = normalized.was_repaired(),
            "assessment audit completed"
        );
        Ok(report)
    }
}

impl Default for IntegrityAuditor {
    fn default() -> Self {
        Self::standard()
    }
}
