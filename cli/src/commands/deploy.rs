//! # COESI Deploy Commands (`coesi dev`, `coesi prod`)
//!
//! File: cli/src/commands/deploy.rs
//!
//! ## Overview
//!
//! Builds and starts the platform for one profile.
//!
//! - `coesi dev` always publishes on `localhost` and refuses an IP argument.
//! - `coesi prod [IP]` publishes on `IP`, or on the default production IP when
//!   none is given. An explicit IP is validated and written to `.env.prod`
//!   before the file is loaded.
//!
//! ## Workflow
//!
//! 1. Preflight: Docker, its daemon and Docker Compose must be available.
//! 2. Resolve the deploy IP for the profile.
//! 3. Validate `.env.<profile>` (missing keys only warn).
//! 4. Production with an explicit IP: upsert `DEPLOY_IP` into `.env.prod`.
//! 5. Load the file and resolve service ports (defaults fill the gaps).
//! 6. `down` (best-effort), then `up --build -d`.
//! 7. `ps`, then the table of service URLs.
//!
//! Any failure ends the workflow. Nothing is rolled back.
//!
use super::{load_environment, validate_env_file, Session};
use crate::common::docker::OrchestrationCommand;
use crate::common::fs::envfile;
use crate::common::network;
use crate::core::error::{CoesiError, Result};
use crate::core::profile::{DeploymentTarget, Profile, ServicePorts, DEPLOY_IP_KEY, DEV_IP};
use anyhow::anyhow;
use clap::Parser;
use tracing::{debug, info};

/// # Development Deploy Arguments (`DevArgs`)
#[derive(Parser, Debug)]
#[command(
    about = "Deploy development environment (localhost only)",
    long_about = "Deploy development environment (localhost only).\n\
                  Development profile always uses localhost for security and consistency.\n\
                  No IP parameter is allowed for development deployments."
)]
pub struct DevArgs {
    /// Not accepted. Present only to report a clear error when given.
    #[arg(hide = true)]
    ip: Option<String>,
}

/// # Production Deploy Arguments (`ProdArgs`)
#[derive(Parser, Debug)]
#[command(
    about = "Deploy production environment with optional IP address",
    long_about = "Deploy production environment with optional IP address.\n\
                  If no IP is provided, uses the default production IP."
)]
pub struct ProdArgs {
    /// Optional IP address for production deployment.
    ip: Option<String>,
}

/// Treats an empty argument like an absent one.
fn given(ip: Option<String>) -> Option<String> {
    ip.filter(|ip| !ip.is_empty())
}

/// Handles `coesi dev`.
pub async fn handle_dev(args: DevArgs, session: &mut Session<'_>) -> Result<()> {
    if given(args.ip).is_some() {
        return Err(anyhow!(CoesiError::InvalidArgument(
            "Development profile does not accept IP parameter. \
             Development always uses localhost for security and consistency. \
             For production with custom IP, use: coesi prod [IP_ADDRESS]"
                .to_string()
        )));
    }
    deploy_environment(Profile::Dev, None, session).await
}

/// Handles `coesi prod [IP]`.
pub async fn handle_prod(args: ProdArgs, session: &mut Session<'_>) -> Result<()> {
    let ip = given(args.ip);
    if let Some(ip) = &ip {
        if let Err(reason) = network::check_ip(ip) {
            return Err(anyhow!(CoesiError::InvalidArgument(format!(
                "Invalid IP address '{}': {}. Please provide a valid IP address for production deployment.",
                ip, reason
            ))));
        }
    }
    deploy_environment(Profile::Prod, ip, session).await
}

/// Runs the deployment workflow for `profile`.
///
/// `explicit_ip` is only honoured for production and must already be valid.
pub async fn deploy_environment(
    profile: Profile,
    explicit_ip: Option<String>,
    session: &mut Session<'_>,
) -> Result<()> {
    info!("Deploying profile {} (explicit IP: {:?})", profile, explicit_ip);
    session.orchestrator.preflight().await?;

    let deploy_ip = match profile {
        Profile::Dev => DEV_IP.to_string(),
        Profile::Prod => explicit_ip
            .clone()
            .unwrap_or_else(|| session.settings.default_prod_ip.clone()),
    };

    let env_path = validate_env_file(session, profile)?;

    if let (Profile::Prod, Some(ip)) = (profile, &explicit_ip) {
        envfile::upsert(&env_path, DEPLOY_IP_KEY, ip)?;
        debug!("Persisted {}={} to {}", DEPLOY_IP_KEY, ip, env_path.display());
    }

    let environment = load_environment(&env_path)?;
    let target = DeploymentTarget {
        profile,
        ip: deploy_ip,
        ports: ServicePorts::resolve(|key| environment.get(key)),
    };

    print_banner(&target, session);

    session.out.line("Stopping existing containers...");
    let down = OrchestrationCommand::down(profile, false, false)
        .with_environment(environment.values.clone());
    if let Err(e) = session.orchestrator.execute(&down).await {
        session
            .out
            .warning(&format!("Could not stop existing containers: {:#}", e));
    }

    session.out.line("Building and starting services...");
    let up = OrchestrationCommand::up(profile, true, true).with_environment(environment.values.clone());
    session.orchestrator.execute(&up).await?;

    session.out.line("");
    session.out.heading("Deployment Status");
    let ps = OrchestrationCommand::ps(profile).with_environment(environment.values);
    session.orchestrator.execute(&ps).await?;

    show_service_urls(&target, session);
    Ok(())
}

fn print_banner(target: &DeploymentTarget, session: &mut Session<'_>) {
    let ports = &target.ports;
    session.out.heading("Deploying COESI Platform");
    session.out.line(&format!("Profile: {}", target.profile));
    session.out.line(&format!("Deploy IP: {}", target.ip));
    session.out.line(&format!(
        "Ports: GraphDB:{}, Core:{}, Models:{}",
        ports.get("GRAPHDB_PORT"),
        ports.get("CORE_API_PORT"),
        ports.get("MODELS_MANAGER_PORT")
    ));
    session.out.line(&format!(
        "       Validation:{}, Scenarios:{}, React:{}",
        ports.get("VALIDATION_ENGINE_PORT"),
        ports.get("SCENARIO_MANAGER_PORT"),
        ports.get("REACT_DASHBOARD_PORT")
    ));
    session.out.line("");
}

fn show_service_urls(target: &DeploymentTarget, session: &mut Session<'_>) {
    session.out.line("");
    session.out.heading("Services Available At");
    let rows: Vec<Vec<String>> = target
        .service_urls()
        .into_iter()
        .map(|(label, url)| vec![label.to_string(), url])
        .collect();
    session.out.table(&["Service", "URL"], &rows);
}
