use std::sync::Arc;

use tracing::{info, warn};

use super::repository::{AuditRepository, AuditSubmissionRecord, LeadRecord, RepositoryError};
use super::report::AuditReport;
use super::submission::SubmissionError;
use super::{AuditError, IntegrityAuditor};
use crate::workflows::model::{ModelError, TextModel};

/// Service composing the auditor, the model collaborator and storage.
pub struct AuditService<M, R> {
    auditor: Arc<IntegrityAuditor>,
    model: Arc<M>,
    repository: Arc<R>,
}

impl<M, R> AuditService<M, R>
where
    M: TextModel + 'static,
    R: AuditRepository + 'static,
{
    pub fn new(auditor: IntegrityAuditor, model: Arc<M>, repository: Arc<R>) -> Self {
        Self {
            auditor: Arc::new(auditor),
            model,
            repository,
        }
    }

    pub fn auditor(&self) -> &IntegrityAuditor {
        &self.auditor
    }

    /// Full audit: guard the text, prompt the model, then score its reply.
    /// Blocks on the model call.
    pub fn audit(&self, assessment_text: &str) -> Result<AuditReport, AuditServiceError> {
        let prompt = self.auditor.prompt_for(assessment_text)?;
        let raw_response = self.model.generate(&prompt)?;
        self.score_response(&raw_response)
    }

    /// Scores an already obtained model response without calling the model.
    pub fn score_response(&self, raw_response: &str) -> Result<AuditReport, AuditServiceError> {
        self.auditor.audit_response(raw_response).map_err(|err| {
            if let AuditError::Malformed(malformed) = &err {
                warn!(
                    error = %malformed,
                    raw_chars = malformed.raw.len(),
                    "model response rejected"
                );
            }
            AuditServiceError::from(err)
        })
    }

    /// Persists a finished report against the submitter's contact.
    pub fn save(
        &self,
        contact: &str,
        report: &AuditReport,
        export: Option<Vec<u8>>,
    ) -> Result<AuditSubmissionRecord, AuditServiceError> {
        let record = AuditSubmissionRecord::from_report(contact, report, export);
        Ok(self.repository.insert(record)?)
    }

    /// Records follow-up interest. The contact is required.
    pub fn save_lead(
        &self,
        contact: &str,
        audit_id: Option<&str>,
        wants_strategy_call: bool,
    ) -> Result<LeadRecord, AuditServiceError> {
        if contact.trim().is_empty() {
            return Err(AuditServiceError::MissingContact);
        }
        let lead = self
            .repository
            .insert_lead(LeadRecord::new(contact, audit_id, wants_strategy_call))?;
        info!(wants_strategy_call, "lead captured");
        Ok(lead)
    }

    pub fn find(&self, contact: &str) -> Result<AuditSubmissionRecord, AuditServiceError> {
        let record = self
            .repository
            .find_by_contact(contact.trim())?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the audit service.
#[derive(Debug, thiserror::Error)]
pub enum AuditServiceError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Audit(#[from] AuditError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("a contact email is required")]
    MissingContact,
}
