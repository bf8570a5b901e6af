//! Test doubles for the command handlers.
//!
//! `FakeOrchestrator` records every call instead of running Docker Compose.
//! `project_with_env` creates a temporary project directory holding
//! `.env.<profile>` files.
use crate::common::docker::{OrchestrationCommand, Orchestrator};
use crate::core::config::Settings;
use crate::core::error::{CoesiError, Result};
use anyhow::anyhow;
use async_trait::async_trait;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

type Matcher = Box<dyn Fn(&OrchestrationCommand) -> bool + Send + Sync>;

#[derive(Default)]
pub struct FakeOrchestrator {
    preflight_failure: Option<String>,
    fail_when: Option<Matcher>,
    prune_fails: bool,
    pub preflights: Mutex<usize>,
    pub prunes: Mutex<usize>,
    executed: Mutex<Vec<OrchestrationCommand>>,
}

impl FakeOrchestrator {
    /// Preflight fails with `PreconditionFailed(reason)`.
    pub fn failing_preflight(reason: &str) -> Self {
        Self {
            preflight_failure: Some(reason.to_string()),
            ..Default::default()
        }
    }

    /// Commands matching `matcher` fail with exit code 1.
    pub fn failing_when<F>(matcher: F) -> Self
    where
        F: Fn(&OrchestrationCommand) -> bool + Send + Sync + 'static,
    {
        Self {
            fail_when: Some(Box::new(matcher)),
            ..Default::default()
        }
    }

    pub fn with_failing_prune(mut self) -> Self {
        self.prune_fails = true;
        self
    }

    /// Commands executed so far, in order.
    pub fn executed(&self) -> Vec<OrchestrationCommand> {
        self.executed.lock().unwrap().clone()
    }

    /// Executed commands rendered as compose arguments.
    pub fn executed_args(&self) -> Vec<String> {
        self.executed()
            .iter()
            .map(|command| command.args().join(" "))
            .collect()
    }

    pub fn preflight_count(&self) -> usize {
        *self.preflights.lock().unwrap()
    }

    pub fn prune_count(&self) -> usize {
        *self.prunes.lock().unwrap()
    }
}

#[async_trait]
impl Orchestrator for FakeOrchestrator {
    async fn preflight(&self) -> Result<()> {
        *self.preflights.lock().unwrap() += 1;
        match &self.preflight_failure {
            Some(reason) => Err(anyhow!(CoesiError::PreconditionFailed(reason.clone()))),
            None => Ok(()),
        }
    }

    async fn execute(&self, command: &OrchestrationCommand) -> Result<()> {
        self.executed.lock().unwrap().push(command.clone());
        if self.fail_when.as_ref().is_some_and(|matches| matches(command)) {
            return Err(anyhow!(CoesiError::OrchestrationFailure {
                cmd: format!("docker-compose {}", command.args().join(" ")),
                code: Some(1),
            }));
        }
        Ok(())
    }

    async fn system_prune(&self) -> Result<()> {
        *self.prunes.lock().unwrap() += 1;
        if self.prune_fails {
            return Err(anyhow!(CoesiError::OrchestrationFailure {
                cmd: "docker system prune -f".to_string(),
                code: Some(1),
            }));
        }
        Ok(())
    }
}

/// A temporary project directory with the given `(file name, content)` pairs.
pub fn project_with_env(files: &[(&str, &str)]) -> (TempDir, Settings) {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    let settings = Settings::for_project(dir.path());
    (dir, settings)
}

/// A complete environment file publishing on `ip`.
pub fn full_env(ip: &str) -> String {
    format!(
        "DEPLOY_IP={}\nGRAPHDB_PORT=7200\nCORE_API_PORT=8000\nMODELS_MANAGER_PORT=8001\n\
VALIDATION_ENGINE_PORT=8002\nSCENARIO_MANAGER_PORT=8003\nREACT_DASHBOARD_PORT=3000\n",
        ip
    )
}
