//! # COESI Status Command (`coesi status`)
//!
//! File: cli/src/commands/status.rs
//!
//! Shows `ps` output for one profile, or for both under labelled headings.
//!
use super::Session;
use crate::common::docker::OrchestrationCommand;
use crate::core::error::Result;
use crate::core::profile::ProfileSelection;
use clap::Parser;

/// # Status Arguments (`StatusArgs`)
#[derive(Parser, Debug)]
#[command(about = "Show status of services")]
pub struct StatusArgs {
    /// Profile to show (dev, prod or all).
    #[arg(value_enum, default_value_t = ProfileSelection::All)]
    pub profile: ProfileSelection,
}

/// Handles `coesi status [dev|prod|all]`.
pub async fn handle_status(args: StatusArgs, session: &mut Session<'_>) -> Result<()> {
    session.orchestrator.preflight().await?;

    for (index, profile) in args.profile.profiles().into_iter().enumerate() {
        if index > 0 {
            session.out.line("");
        }
        session
            .out
            .heading(&format!("{} Services", profile.title()));
        session
            .orchestrator
            .execute(&OrchestrationCommand::ps(profile))
            .await?;
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{project_with_env, FakeOrchestrator};
    use crate::common::ui::Recorder;

    #[tokio::test]
    async fn test_status_all_has_labelled_sections() {
        let (_dir, settings) = project_with_env(&[]);
        let fake = FakeOrchestrator::default();
        let mut out = Recorder::default();
        let mut session = Session {
            settings: &settings,
            orchestrator: &fake,
            out: &mut out,
        };

        handle_status(StatusArgs { profile: ProfileSelection::All }, &mut session)
            .await
            .unwrap();
        assert_eq!(
            fake.executed_args(),
            vec!["--profile dev ps", "--profile prod ps"]
        );
        let dev = out
            .messages
            .iter()
            .position(|m| m == "heading: Development Services");
        let prod = out
            .messages
            .iter()
            .position(|m| m == "heading: Production Services");
        assert!(dev.is_some() && prod.is_some() && dev < prod);
    }

    #[tokio::test]
    async fn test_status_single_profile() {
        let (_dir, settings) = project_with_env(&[]);
        let fake = FakeOrchestrator::default();
        let mut out = Recorder::default();
        let mut session = Session {
            settings: &settings,
            orchestrator: &fake,
            out: &mut out,
        };

        handle_status(StatusArgs { profile: ProfileSelection::Dev }, &mut session)
            .await
            .unwrap();
        assert_eq!(fake.executed_args(), vec!["--profile dev ps"]);
        assert!(!out.saw("Production Services"));
    }

    #[tokio::test]
    async fn test_preflight_failure_aborts() {
        let (_dir, settings) = project_with_env(&[]);
        let fake = FakeOrchestrator::failing_preflight("Docker is not installed or not in PATH");
        let mut out = Recorder::default();
        let mut session = Session {
            settings: &settings,
            orchestrator: &fake,
            out: &mut out,
        };

        assert!(handle_status(StatusArgs { profile: ProfileSelection::All }, &mut session)
            .await
            .is_err());
        assert!(fake.executed().is_empty());
    }
}
