//! # COESI Clean Command (`coesi clean`)
//!
//! File: cli/src/commands/clean.rs
//!
//! ## Overview
//!
//! Removes the containers, networks and volumes of one profile or of both.
//! Unless `--force` is given the operator must confirm first; declining is
//! not an error.
//!
//! Cleaning `all` additionally runs `docker system prune -f`. A prune failure
//! only produces a warning.
//!
use super::Session;
use crate::common::docker::OrchestrationCommand;
use crate::core::error::Result;
use crate::core::profile::ProfileSelection;
use clap::Parser;
use tracing::{info, warn};

/// # Clean Arguments (`CleanArgs`)
#[derive(Parser, Debug)]
#[command(about = "Clean containers and volumes")]
pub struct CleanArgs {
    /// Profile to clean (dev, prod or all).
    #[arg(value_enum, default_value_t = ProfileSelection::All)]
    pub profile: ProfileSelection,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub force: bool,
}

/// Handles `coesi clean [dev|prod|all] [-f]`.
pub async fn handle_clean(args: CleanArgs, session: &mut Session<'_>) -> Result<()> {
    session.orchestrator.preflight().await?;

    if !args.force && !confirm_clean(args.profile, session)? {
        session.out.line("Clean operation cancelled.");
        return Ok(());
    }

    for profile in args.profile.profiles() {
        info!("Cleaning profile {}", profile);
        let down = OrchestrationCommand::down(profile, true, true);
        session.orchestrator.execute(&down).await?;
    }

    match args.profile.single() {
        Some(profile) => {
            session
                .out
                .success(&format!("{} environment cleaned.", profile.title()));
        }
        None => {
            if let Err(e) = session.orchestrator.system_prune().await {
                warn!("docker system prune failed: {:#}", e);
                session.out.warning("Could not run docker system prune");
            }
            session.out.success("All environments cleaned.");
        }
    }
    Ok(())
}

fn confirm_clean(selection: ProfileSelection, session: &mut Session<'_>) -> Result<bool> {
    match selection.single() {
        Some(profile) => {
            session
                .out
                .line(&format!("Cleaning {} environment...", profile));
            session.out.line(&format!(
                "This will remove containers, networks, and volumes for {} profile.",
                profile
            ));
        }
        None => {
            session.out.line("Cleaning all environments...");
            session
                .out
                .line("This will remove all containers, networks, and volumes.");
        }
    }
    session.out.confirm("Are you sure?")
}
