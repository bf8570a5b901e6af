//! # COESI Logs Command (`coesi logs`)
//!
//! File: cli/src/commands/logs.rs
//!
//! Shows logs for one service or for all of them. Logs are not scoped to a
//! profile.
//!
use super::Session;
use crate::common::docker::OrchestrationCommand;
use crate::core::error::Result;
use clap::Parser;

/// # Logs Arguments (`LogsArgs`)
#[derive(Parser, Debug)]
#[command(about = "View logs for services")]
pub struct LogsArgs {
    /// Service to show logs for. All services when omitted.
    pub service: Option<String>,

    /// Follow log output.
    #[arg(short, long)]
    pub follow: bool,
}

/// Handles `coesi logs [SERVICE] [-f]`.
pub async fn handle_logs(args: LogsArgs, session: &mut Session<'_>) -> Result<()> {
    session.orchestrator.preflight().await?;

    match &args.service {
        Some(service) => session
            .out
            .line(&format!("Showing logs for service: {}", service)),
        None => session.out.line("Showing logs for all services..."),
    }

    let logs = OrchestrationCommand::logs(args.service, args.follow);
    session.orchestrator.execute(&logs).await
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{project_with_env, FakeOrchestrator};
    use crate::common::ui::Recorder;

    #[test]
    fn test_args_parsing() {
        let args = LogsArgs::try_parse_from(["logs", "core-api", "-f"]).unwrap();
        assert_eq!(args.service.as_deref(), Some("core-api"));
        assert!(args.follow);
        let args = LogsArgs::try_parse_from(["logs"]).unwrap();
        assert!(args.service.is_none());
        assert!(!args.follow);
    }

    #[tokio::test]
    async fn test_logs_for_service() {
        let (_dir, settings) = project_with_env(&[]);
        let fake = FakeOrchestrator::default();
        let mut out = Recorder::default();
        let mut session = Session {
            settings: &settings,
            orchestrator: &fake,
            out: &mut out,
        };

        let args = LogsArgs {
            service: Some("graphdb".to_string()),
            follow: true,
        };
        handle_logs(args, &mut session).await.unwrap();
        assert_eq!(fake.executed_args(), vec!["logs -f graphdb"]);
        assert!(out.saw("Showing logs for service: graphdb"));
    }

    #[tokio::test]
    async fn test_logs_for_all_services() {
        let (_dir, settings) = project_with_env(&[]);
        let fake = FakeOrchestrator::default();
        let mut out = Recorder::default();
        let mut session = Session {
            settings: &settings,
            orchestrator: &fake,
            out: &mut out,
        };

        let args = LogsArgs {
            service: None,
            follow: false,
        };
        handle_logs(args, &mut session).await.unwrap();
        assert_eq!(fake.executed_args(), vec!["logs"]);
        assert!(out.saw("Showing logs for all services..."));
    }
}
