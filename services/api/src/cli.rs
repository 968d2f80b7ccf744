use crate::commands::{run_audit, run_prompt, run_score, AuditArgs, PromptArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use integrity_audit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Integrity Debt Audit",
    about = "Score assessment briefs for integrity debt from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the model prompt built for an assessment brief
    Prompt(PromptArgs),
    /// Score a saved model response without calling the model
    Score(ScoreArgs),
    /// Run a full audit of an assessment brief against the configured model
    Audit(AuditArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Prompt(args) => run_prompt(args),
        Command::Score(args) => run_score(args),
        // The model client blocks, so keep it off the async workers.
        Command::Audit(args) => tokio::task::spawn_blocking(move || run_audit(args))
            .await
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ReportFormat;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["integrity-audit-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_accepts_json_format() {
        let cli = Cli::try_parse_from([
            "integrity-audit-api",
            "score",
            "reply.json",
            "--format",
            "json",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.response.to_str(), Some("reply.json"));
                assert_eq!(args.format, ReportFormat::Json);
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn unknown_format_is_rejected() {
        let result = Cli::try_parse_from([
            "integrity-audit-api",
            "audit",
            "brief.txt",
            "--format",
            "pdf",
        ]);
        assert!(result.is_err());
    }
}
