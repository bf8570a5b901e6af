//! # COESI Stop Command (`coesi stop`)
//!
//! File: cli/src/commands/stop.rs
//!
//! Stops the services of one profile, or of both when no profile is given.
//! Volumes are kept. The environment files are not read.
//!
use super::Session;
use crate::common::docker::OrchestrationCommand;
use crate::core::error::Result;
use crate::core::profile::ProfileSelection;
use clap::Parser;

/// # Stop Arguments (`StopArgs`)
#[derive(Parser, Debug)]
#[command(about = "Stop services")]
pub struct StopArgs {
    /// Profile to stop (dev, prod or all).
    #[arg(value_enum, default_value_t = ProfileSelection::All)]
    pub profile: ProfileSelection,
}

/// Handles `coesi stop [dev|prod|all]`.
pub async fn handle_stop(args: StopArgs, session: &mut Session<'_>) -> Result<()> {
    session.orchestrator.preflight().await?;

    match args.profile.single() {
        Some(profile) => session
            .out
            .line(&format!("Stopping {} services...", profile)),
        None => session.out.line("Stopping all services..."),
    }

    for profile in args.profile.profiles() {
        let down = OrchestrationCommand::down(profile, false, false);
        session.orchestrator.execute(&down).await?;
    }

    session.out.success("Services stopped successfully.");
    Ok(())
}
