use integrity_audit::config::ModelConfig;
use integrity_audit::workflows::audit::{
    AuditRepository, AuditSubmissionRecord, LeadRecord, RepositoryError,
};
use integrity_audit::workflows::model::{GeminiClient, ModelError, TextModel};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditRepository {
    records: Arc<Mutex<HashMap<String, AuditSubmissionRecord>>>,
    leads: Arc<Mutex<Vec<LeadRecord>>>,
}

#[cfg(test)]
impl InMemoryAuditRepository {
    pub(crate) fn leads(&self) -> Vec<LeadRecord> {
        self.leads.lock().expect("lead mutex poisoned").clone()
    }
}

impl AuditRepository for InMemoryAuditRepository {
    fn insert(
        &self,
        record: AuditSubmissionRecord,
    ) -> Result<AuditSubmissionRecord, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        if guard.contains_key(&record.email) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.email.clone(), record.clone());
        Ok(record)
    }

    fn find_by_contact(
        &self,
        contact: &str,
    ) -> Result<Option<AuditSubmissionRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        Ok(guard.get(contact).cloned())
    }

    fn insert_lead(&self, lead: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self
            .leads
            .lock()
            .map_err(|_| RepositoryError::Unavailable("lead mutex poisoned".to_string()))?;
        guard.push(lead.clone());
        Ok(lead)
    }
}

/// Model wired into the service. Without an API key the service still
/// starts; full audits fail with `MissingApiKey` while scoring keeps working.
#[derive(Debug)]
pub(crate) enum ConfiguredModel {
    Gemini(GeminiClient),
    Unconfigured,
}

impl ConfiguredModel {
    /// Builds the blocking HTTP client, so call it off the async workers.
    pub(crate) fn from_config(config: &ModelConfig) -> Result<Self, ModelError> {
        match GeminiClient::new(config) {
            Ok(client) => Ok(Self::Gemini(client)),
            Err(ModelError::MissingApiKey) => {
                warn!("GEMINI_API_KEY not set; full audits are disabled");
                Ok(Self::Unconfigured)
            }
            Err(err) => Err(err),
        }
    }
}

impl TextModel for ConfiguredModel {
    fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        match self {
            Self::Gemini(client) => client.generate(prompt),
            Self::Unconfigured => Err(ModelError::MissingApiKey),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_leaves_the_model_unconfigured() {
        let model = ConfiguredModel::from_config(&ModelConfig::default()).expect("builds");
        assert!(matches!(model, ConfiguredModel::Unconfigured));
        assert!(matches!(
            model.generate("prompt"),
            Err(ModelError::MissingApiKey)
        ));
    }

    #[test]
    fn repository_rejects_duplicate_contacts() {
        let repository = InMemoryAuditRepository::default();
        let record = AuditSubmissionRecord {
            email: "lecturer@example.ac.uk".to_string(),
            audit_score: 30,
            susceptibility: "Medium".to_string(),
            categories: Vec::new(),
            assessment_context: "Essay".to_string(),
            pdf_data: None,
        };

        repository.insert(record.clone()).expect("first insert");
        assert!(matches!(
            repository.insert(record.clone()),
            Err(RepositoryError::Conflict)
        ));
        assert_eq!(
            repository
                .find_by_contact("lecturer@example.ac.uk")
                .expect("lookup"),
            Some(record)
        );
    }

    #[test]
    fn leads_are_appended_per_registration() {
        let repository = InMemoryAuditRepository::default();
        let first = LeadRecord::new("lecturer@example.ac.uk", None, false);
        let second = LeadRecord::new("lecturer@example.ac.uk", None, true);

        repository.insert_lead(first.clone()).expect("first lead");
        repository.insert_lead(second.clone()).expect("second lead");

        assert_eq!(repository.leads(), vec![first, second]);
    }
}
