use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredModel, InMemoryAuditRepository};
use crate::routes::with_audit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use integrity_audit::config::AppConfig;
use integrity_audit::error::AppError;
use integrity_audit::telemetry;
use integrity_audit::workflows::audit::{AuditService, CategoryCatalog, IntegrityAuditor};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let model_config = config.model.clone();
    let model = tokio::task::spawn_blocking(move || ConfiguredModel::from_config(&model_config))
        .await
        .map_err(|err| AppError::Io(std::io::Error::other(err)))??;

    let auditor = IntegrityAuditor::new(CategoryCatalog::standard(), config.limits);
    let audit_service = Arc::new(AuditService::new(
        auditor,
        Arc::new(model),
        Arc::new(InMemoryAuditRepository::default()),
    ));

    let app = with_audit_routes(audit_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, model = %config.model.model, "integrity audit service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
