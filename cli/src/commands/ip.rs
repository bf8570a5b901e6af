//! # COESI IP Command (`coesi ip`)
//!
//! File: cli/src/commands/ip.rs
//!
//! Changes the production IP by writing `DEPLOY_IP` into `.env.prod` in the
//! project directory. The file is created when missing. Nothing is deployed
//! and Docker is not consulted.
//!
use super::Session;
use crate::common::fs::envfile;
use crate::common::network;
use crate::core::error::{CoesiError, Result};
use crate::core::profile::{Profile, DEPLOY_IP_KEY};
use anyhow::anyhow;
use clap::Parser;
use tracing::debug;

/// # IP Arguments (`IpArgs`)
#[derive(Parser, Debug)]
#[command(about = "Change the production IP address")]
pub struct IpArgs {
    /// New production IP address.
    pub ip_address: String,
}

/// Handles `coesi ip <IP_ADDRESS>`.
pub async fn handle_ip(args: IpArgs, session: &mut Session<'_>) -> Result<()> {
    let ip = args.ip_address;
    if let Err(reason) = network::check_ip(&ip) {
        return Err(anyhow!(CoesiError::InvalidArgument(format!(
            "Invalid IP address '{}': {}",
            ip, reason
        ))));
    }

    let path = session.settings.project_path(&Profile::Prod.env_file_name());
    envfile::upsert(&path, DEPLOY_IP_KEY, &ip)?;
    debug!("Updated {} in {}", DEPLOY_IP_KEY, path.display());

    session
        .out
        .success(&format!("Production IP updated to: {}", ip));
    session.out.line("Run 'coesi prod' to deploy with new IP");
    Ok(())
}
