use serde::{Deserialize, Serialize};

use super::reconcile::ReconciledCategoryResult;
use super::report::AuditReport;

/// Row handed to the persistence collaborator for a finished audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSubmissionRecord {
    pub email: String,
    pub audit_score: u32,
    /// Top-level tier name only, e.g. "Medium".
    pub susceptibility: String,
    pub categories: Vec<ReconciledCategoryResult>,
    pub assessment_context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_data: Option<Vec<u8>>,
}

impl AuditSubmissionRecord {
    pub fn from_report(contact: &str, report: &AuditReport, export: Option<Vec<u8>>) -> Self {
        Self {
            email: contact.trim().to_string(),
            audit_score: report.total_score(),
            susceptibility: report.susceptibility().short_label().to_string(),
            categories: report.category_results().to_vec(),
            assessment_context: report.doc_context().to_string(),
            pdf_data: export,
        }
    }
}

/// Follow-up interest left by a submitter after reading their report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_id: Option<String>,
    pub wants_strategy_call: bool,
}

impl LeadRecord {
    pub fn new(contact: &str, audit_id: Option<&str>, wants_strategy_call: bool) -> Self {
        Self {
            email: contact.trim().to_string(),
            audit_id: audit_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            wants_strategy_call,
        }
    }
}

/// Storage abstraction so the service can be exercised without a database.
pub trait AuditRepository: Send + Sync {
    fn insert(
        &self,
        record: AuditSubmissionRecord,
    ) -> Result<AuditSubmissionRecord, RepositoryError>;
    fn find_by_contact(
        &self,
        contact: &str,
    ) -> Result<Option<AuditSubmissionRecord>, RepositoryError>;
    /// Leads are append-only; the same contact may register interest twice.
    fn insert_lead(&self, lead: LeadRecord) -> Result<LeadRecord, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
