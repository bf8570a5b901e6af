//! # COESI Restart Command (`coesi restart`)
//!
//! File: cli/src/commands/restart.rs
//!
//! Restarts the running services of a profile without rebuilding images,
//! then shows their status. The profile is required.
//!
use super::{load_environment, validate_env_file, Session};
use crate::common::docker::OrchestrationCommand;
use crate::common::network;
use crate::core::error::Result;
use crate::core::profile::{Profile, DEPLOY_IP_KEY, DEV_IP};
use clap::Parser;
use tracing::info;

/// # Restart Arguments (`RestartArgs`)
#[derive(Parser, Debug)]
#[command(about = "Restart services without rebuilding")]
pub struct RestartArgs {
    /// Profile to restart.
    #[arg(value_enum)]
    pub profile: Profile,
}

/// Handles `coesi restart <dev|prod>`.
pub async fn handle_restart(args: RestartArgs, session: &mut Session<'_>) -> Result<()> {
    let profile = args.profile;
    info!("Restarting profile {}", profile);
    session.orchestrator.preflight().await?;

    let env_path = validate_env_file(session, profile)?;
    let environment = load_environment(&env_path)?;
    let ip = environment
        .get(DEPLOY_IP_KEY)
        .unwrap_or_else(|| DEV_IP.to_string());
    if !network::validate_ip(&ip) {
        session.out.warning(&format!(
            "{} '{}' in {} is not a valid IP address",
            DEPLOY_IP_KEY,
            ip,
            profile.env_file_name()
        ));
    }

    session
        .out
        .heading(&format!("Restarting COESI Platform ({})", profile));
    session.out.line(&format!("Deploy IP: {}", ip));

    let restart = OrchestrationCommand::restart(profile).with_environment(environment.values.clone());
    session.orchestrator.execute(&restart).await?;

    session.out.line("");
    session.out.heading("Restart Status");
    let ps = OrchestrationCommand::ps(profile).with_environment(environment.values);
    session.orchestrator.execute(&ps).await
}
