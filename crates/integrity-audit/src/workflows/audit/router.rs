use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use super::report::AuditReportView;
use super::repository::{AuditRepository, LeadRecord, RepositoryError};
use super::service::{AuditService, AuditServiceError};
use super::AuditError;
use crate::error::AppError;
use crate::workflows::model::TextModel;

pub const ANALYSIS_FAILED: &str = "Failed to analyze assessment";

#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    pub assessment_text: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub raw_response: String,
}

#[derive(Debug, Deserialize)]
pub struct LeadRequest {
    pub email: String,
    #[serde(default)]
    pub audit_id: Option<String>,
    #[serde(default)]
    pub wants_strategy_call: bool,
}

#[derive(Debug, Serialize)]
pub struct AuditResponse {
    #[serde(flatten)]
    pub report: AuditReportView,
    pub saved: bool,
}

/// Router builder exposing the audit endpoints.
pub fn audit_router<M, R>(service: Arc<AuditService<M, R>>) -> Router
where
    M: TextModel + 'static,
    R: AuditRepository + 'static,
{
    Router::new()
        .route("/api/v1/audits", post(audit_handler::<M, R>))
        .route("/api/v1/audits/score", post(score_handler::<M, R>))
        .route("/api/v1/audits/:email", get(record_handler::<M, R>))
        .route("/api/v1/leads", post(lead_handler::<M, R>))
        .with_state(service)
}

pub(crate) async fn audit_handler<M, R>(
    State(service): State<Arc<AuditService<M, R>>>,
    Json(request): Json<AuditRequest>,
) -> Response
where
    M: TextModel + 'static,
    R: AuditRepository + 'static,
{
    let worker = service.clone();
    let AuditRequest {
        assessment_text,
        email,
    } = request;

    let outcome = tokio::task::spawn_blocking(move || worker.audit(&assessment_text)).await;
    let report = match outcome {
        Ok(Ok(report)) => report,
        Ok(Err(err)) => return error_response(err),
        Err(join_error) => {
            error!(error = %join_error, "audit worker failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": ANALYSIS_FAILED })),
            )
                .into_response();
        }
    };

    // A failed save never costs the caller a report the model already paid for.
    let saved = match email.as_deref().map(str::trim) {
        Some(contact) if !contact.is_empty() => match service.save(contact, &report, None) {
            Ok(_) => true,
            Err(err) => {
                warn!(error = %err, "audit result not saved; returning report");
                false
            }
        },
        _ => false,
    };

    let body = AuditResponse {
        report: report.view(service.auditor().catalog()),
        saved,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn score_handler<M, R>(
    State(service): State<Arc<AuditService<M, R>>>,
    Json(request): Json<ScoreRequest>,
) -> Response
where
    M: TextModel + 'static,
    R: AuditRepository + 'static,
{
    match service.score_response(&request.raw_response) {
        Ok(report) => {
            let body = AuditResponse {
                report: report.view(service.auditor().catalog()),
                saved: false,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn record_handler<M, R>(
    State(service): State<Arc<AuditService<M, R>>>,
    Path(email): Path<String>,
) -> Response
where
    M: TextModel + 'static,
    R: AuditRepository + 'static,
{
    match service.find(&email) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn lead_handler<M, R>(
    State(service): State<Arc<AuditService<M, R>>>,
    Json(request): Json<LeadRequest>,
) -> Result<(StatusCode, Json<LeadRecord>), AppError>
where
    M: TextModel + 'static,
    R: AuditRepository + 'static,
{
    let lead = service.save_lead(
        &request.email,
        request.audit_id.as_deref(),
        request.wants_strategy_call,
    )?;
    Ok((StatusCode::CREATED, Json(lead)))
}

/// Single status mapping for audit failures; `AppError` responses use it too.
pub(crate) fn error_response(err: AuditServiceError) -> Response {
    let (status, message) = match &err {
        AuditServiceError::Submission(submission) => {
            (StatusCode::BAD_REQUEST, submission.to_string())
        }
        AuditServiceError::MissingContact => (StatusCode::BAD_REQUEST, err.to_string()),
        AuditServiceError::Model(_) | AuditServiceError::Audit(AuditError::Malformed(_)) => {
            error!(error = %err, "assessment analysis failed");
            (StatusCode::BAD_GATEWAY, ANALYSIS_FAILED.to_string())
        }
        AuditServiceError::Repository(RepositoryError::Conflict) => {
            (StatusCode::CONFLICT, "audit already recorded".to_string())
        }
        AuditServiceError::Repository(RepositoryError::NotFound) => {
            (StatusCode::NOT_FOUND, "audit not found".to_string())
        }
        AuditServiceError::Audit(AuditError::Incomplete(_))
        | AuditServiceError::Repository(RepositoryError::Unavailable(_)) => {
            error!(error = %err, "audit request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    };

    (status, Json(json!({ "error": message }))).into_response()
}
