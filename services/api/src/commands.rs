//! One-shot CLI commands: print a prompt, score a saved reply, or run a
//! full audit, rendering the report as text or JSON.

use clap::{Args, ValueEnum};
use integrity_audit::config::AppConfig;
use integrity_audit::error::AppError;
use integrity_audit::telemetry;
use integrity_audit::workflows::audit::{
    AuditReport, AuditService, CategoryCatalog, IntegrityAuditor,
};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::infra::{ConfiguredModel, InMemoryAuditRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct PromptArgs {
    /// Plain-text assessment brief
    pub(crate) brief: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// File holding a raw model response
    pub(crate) response: PathBuf,
    /// Output format for the report
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub(crate) format: ReportFormat,
}

#[derive(Args, Debug)]
pub(crate) struct AuditArgs {
    /// Plain-text assessment brief
    pub(crate) brief: PathBuf,
    /// Output format for the report
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub(crate) format: ReportFormat,
}

pub(crate) fn run_prompt(args: PromptArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let auditor = IntegrityAuditor::new(CategoryCatalog::standard(), config.limits);
    let brief = fs::read_to_string(&args.brief)?;
    println!("{}", auditor.prompt_for(&brief)?);
    Ok(())
}

/// Loads configuration and installs logging (on stderr) for a one-shot command.
fn prepare() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = prepare()?;
    let raw = fs::read_to_string(&args.response)?;

    // Scoring never calls the model.
    let service = AuditService::new(
        IntegrityAuditor::new(CategoryCatalog::standard(), config.limits),
        Arc::new(ConfiguredModel::Unconfigured),
        Arc::new(InMemoryAuditRepository::default()),
    );
    let report = service.score_response(&raw)?;
    println!(
        "{}",
        render(&report, service.auditor().catalog(), args.format)?
    );
    Ok(())
}

pub(crate) fn run_audit(args: AuditArgs) -> Result<(), AppError> {
    let config = prepare()?;
    let brief = fs::read_to_string(&args.brief)?;

    let model = ConfiguredModel::from_config(&config.model)?;
    let service = AuditService::new(
        IntegrityAuditor::new(CategoryCatalog::standard(), config.limits),
        Arc::new(model),
        Arc::new(InMemoryAuditRepository::default()),
    );

    let report = service.audit(&brief)?;
    println!(
        "{}",
        render(&report, service.auditor().catalog(), args.format)?
    );
    Ok(())
}

fn render(
    report: &AuditReport,
    catalog: &CategoryCatalog,
    format: ReportFormat,
) -> Result<String, AppError> {
    match format {
        ReportFormat::Json => serde_json::to_string_pretty(&report.view(catalog))
            .map_err(|err| AppError::Io(err.into())),
        ReportFormat::Text => Ok(render_text(report, catalog)),
    }
}

pub(crate) fn render_text(report: &AuditReport, catalog: &CategoryCatalog) -> String {
    let tier = report.susceptibility();
    let mut out = String::new();

    let _ = writeln!(out, "Integrity Debt Audit: {}", report.doc_context());
    let _ = writeln!(
        out,
        "Score: {}/{}  Susceptibility: {}",
        report.total_score(),
        report.max_score(),
        tier.label()
    );
    let _ = writeln!(out, "{}", tier.description());

    let _ = writeln!(out, "\nTop improvements:");
    for (index, improvement) in report.top_improvements().iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, improvement);
    }

    for briefing in report.briefings(catalog) {
        let _ = writeln!(
            out,
            "\n[{}/5] {} ({})",
            briefing.verified_score, briefing.category, briefing.standing
        );
        let _ = writeln!(out, "  Critique: {}", briefing.critique);
        let _ = writeln!(out, "  Question: {}", briefing.question);
        let _ = writeln!(out, "  Evidence: {}", briefing.quote);
        if !briefing.narrative_context.is_empty() {
            let _ = writeln!(out, "  Why it matters: {}", briefing.narrative_context);
        }
        for action in &briefing.remediation_actions {
            let _ = writeln!(out, "  - {}", action);
        }
    }

    out
}
