//! # COESI Orchestration Facade
//!
//! File: cli/src/common/docker/compose.rs
//!
//! ## Overview
//!
//! Translates the five lifecycle intents (up, down, restart, ps, logs) into
//! Docker Compose invocations scoped with `--profile <name>`.
//!
//! ## Architecture
//!
//! - `OrchestrationCommand`: one request (profile, verb and flags, plus the
//!   environment handed to the child). It knows its own argument vector.
//! - `Orchestrator`: the seam the command handlers talk to. Besides executing
//!   commands it runs the preflight checks and the `docker system prune`
//!   used by `coesi clean all`.
//! - `ComposeCli`: the real implementation, running the configured compose
//!   command in the project directory with inherited stdio.
//!
//! ```rust
//! let up = OrchestrationCommand::up(Profile::Prod, true, true).with_environment(values);
//! orchestrator.execute(&up).await?; // docker-compose --profile prod up --build -d
//! ```
//!
use super::preflight;
use crate::common::process::{self, CommandLine};
use crate::core::config::Settings;
use crate::core::error::{CoesiError, Result};
use crate::core::profile::Profile;
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::debug;

/// The action requested from the orchestration tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Up { build: bool, detach: bool },
    Down { volumes: bool, remove_orphans: bool },
    Restart,
    Ps,
    Logs { service: Option<String>, follow: bool },
}

/// A single request to the orchestration tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestrationCommand {
    /// `None` only for `logs`, which spans all running services.
    pub profile: Option<Profile>,
    pub verb: Verb,
    /// Extra environment for the child process.
    pub environment: BTreeMap<String, String>,
}

impl OrchestrationCommand {
    fn scoped(profile: Profile, verb: Verb) -> Self {
        Self {
            profile: Some(profile),
            verb,
            environment: BTreeMap::new(),
        }
    }

    pub fn up(profile: Profile, build: bool, detach: bool) -> Self {
        Self::scoped(profile, Verb::Up { build, detach })
    }

    pub fn down(profile: Profile, volumes: bool, remove_orphans: bool) -> Self {
        Self::scoped(
            profile,
            Verb::Down {
                volumes,
                remove_orphans,
            },
        )
    }

    pub fn restart(profile: Profile) -> Self {
        Self::scoped(profile, Verb::Restart)
    }

    pub fn ps(profile: Profile) -> Self {
        Self::scoped(profile, Verb::Ps)
    }

    pub fn logs(service: Option<String>, follow: bool) -> Self {
        Self {
            profile: None,
            verb: Verb::Logs { service, follow },
            environment: BTreeMap::new(),
        }
    }

    pub fn with_environment(mut self, environment: BTreeMap<String, String>) -> Self {
        self.environment = environment;
        self
    }

    /// Arguments following the compose program (and its `-f` option).
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(profile) = self.profile {
            args.push("--profile".to_string());
            args.push(profile.name().to_string());
        }
        match &self.verb {
            Verb::Up { build, detach } => {
                args.push("up".to_string());
                if *build {
                    args.push("--build".to_string());
                }
                if *detach {
                    args.push("-d".to_string());
                }
            }
            Verb::Down {
                volumes,
                remove_orphans,
            } => {
                args.push("down".to_string());
                if *volumes {
                    args.push("-v".to_string());
                }
                if *remove_orphans {
                    args.push("--remove-orphans".to_string());
                }
            }
            Verb::Restart => args.push("restart".to_string()),
            Verb::Ps => args.push("ps".to_string()),
            Verb::Logs { service, follow } => {
                args.push("logs".to_string());
                if *follow {
                    args.push("-f".to_string());
                }
                if let Some(service) = service {
                    args.push(service.clone());
                }
            }
        }
        args
    }
}

/// Drives the external orchestration tool.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Verifies the engine, its daemon and the compose tool are usable.
    ///
    /// Fails with `CoesiError::PreconditionFailed`.
    async fn preflight(&self) -> Result<()>;

    /// Runs one command, blocking until the tool exits.
    ///
    /// Fails with `CoesiError::OrchestrationFailure` on a non-zero exit.
    async fn execute(&self, command: &OrchestrationCommand) -> Result<()>;

    /// Removes unused engine data (`docker system prune -f`).
    async fn system_prune(&self) -> Result<()>;
}

/// `Orchestrator` backed by the Docker Compose CLI.
#[derive(Debug, Clone)]
pub struct ComposeCli {
    settings: Settings,
}

impl ComposeCli {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Full command line for `command`, including the compose program.
    pub fn command_line(&self, command: &OrchestrationCommand) -> Result<CommandLine> {
        let mut argv = self.settings.compose_command.clone();
        if let Some(file) = &self.settings.compose_file {
            argv.push("-f".to_string());
            argv.push(file.to_string_lossy().into_owned());
        }
        argv.extend(command.args());
        CommandLine::from_argv(argv).ok_or_else(|| {
            anyhow!(CoesiError::Config(
                "compose.command must name a program".to_string()
            ))
        })
    }
}

#[async_trait]
impl Orchestrator for ComposeCli {
    async fn preflight(&self) -> Result<()> {
        preflight::run(&self.settings).await
    }

    async fn execute(&self, command: &OrchestrationCommand) -> Result<()> {
        let command_line = self.command_line(command)?;
        debug!("Orchestration request: {:?}", command);
        process::run_streamed(&command_line, &self.settings.project_dir, &command.environment).await
    }

    async fn system_prune(&self) -> Result<()> {
        let prune = CommandLine {
            program: self.settings.docker_command.clone(),
            args: vec!["system".to_string(), "prune".to_string(), "-f".to_string()],
        };
        process::run_streamed(&prune, &self.settings.project_dir, &BTreeMap::new()).await
    }
}
