//! # COESI Docker Preflight Checks
//!
//! File: cli/src/common/docker/preflight.rs
//!
//! ## Overview
//!
//! Before any command touches the deployment, three capability probes run in
//! order, each bounded by the configured timeout (10 seconds by default):
//!
//! 1. `docker --version`: the engine CLI is installed.
//! 2. `docker info`: the daemon answers.
//! 3. `<compose command> --version`: Docker Compose is installed.
//!
//! The first failing probe ends the check with `CoesiError::PreconditionFailed`.
//!
use crate::common::process::{self, CommandLine, ProbeOutcome};
use crate::core::config::Settings;
use crate::core::error::{CoesiError, Result};
use anyhow::anyhow;
use std::time::Duration;
use tracing::{info, warn};

/// One probe and the message shown when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub command: CommandLine,
    pub failure: &'static str,
}

/// The probes for `settings`, in execution order.
pub fn checks(settings: &Settings) -> Vec<Check> {
    let docker = |arg: &str| CommandLine {
        program: settings.docker_command.clone(),
        args: vec![arg.to_string()],
    };

    let mut compose_argv = settings.compose_command.clone();
    compose_argv.push("--version".to_string());

    let mut checks = vec![
        Check {
            command: docker("--version"),
            failure: "Docker is not installed or not in PATH",
        },
        Check {
            command: docker("info"),
            failure: "Docker daemon is not running",
        },
    ];
    if let Some(command) = CommandLine::from_argv(compose_argv) {
        checks.push(Check {
            command,
            failure: "Docker Compose is not installed or not in PATH",
        });
    }
    checks
}

/// Runs every probe, stopping at the first failure.
pub async fn run(settings: &Settings) -> Result<()> {
    run_checks(&checks(settings), settings.preflight_timeout).await?;
    info!("Preflight checks passed.");
    Ok(())
}

async fn run_checks(checks: &[Check], timeout: Duration) -> Result<()> {
    for check in checks {
        let outcome = match process::probe(&check.command, timeout).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Probe '{}' could not run: {:#}", check.command.display(), e);
                return Err(anyhow!(CoesiError::PreconditionFailed(check.failure.to_string())));
            }
        };
        if outcome != ProbeOutcome::Success {
            warn!("Probe '{}' failed: {:?}", check.command.display(), outcome);
            return Err(anyhow!(CoesiError::PreconditionFailed(check.failure.to_string())));
        }
    }
    Ok(())
}
