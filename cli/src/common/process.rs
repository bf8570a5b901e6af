//! # COESI Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Runs external programs from an argument vector, never through a shell.
//!
//! - `run_streamed`: inherits stdin/stdout/stderr so the operator sees the
//!   orchestration tool's own output. Blocks until the child exits and maps a
//!   non-zero status to `CoesiError::OrchestrationFailure`.
//! - `probe`: discards output and waits at most `timeout`. Used by preflight
//!   checks, where a hung daemon must not hang the CLI.
//!
//! No signal handler is installed. An interrupt from the terminal reaches the
//! child (same process group) and this process alike.
//!
use crate::core::error::{CoesiError, Result};
use anyhow::{anyhow, Context};
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, info, instrument};

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Splits `argv` into program and arguments. Returns `None` when empty.
    pub fn from_argv(argv: Vec<String>) -> Option<Self> {
        let mut parts = argv.into_iter();
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Space-joined rendering for messages and logs.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Outcome of a bounded probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The program ran and exited 0.
    Success,
    /// The program ran and exited non-zero (or was killed by a signal).
    Failed(Option<i32>),
    /// The program could not be found.
    NotFound,
    /// The program did not finish within the timeout and was killed.
    TimedOut,
}

/// Runs `command` with inherited stdio and waits for it to exit.
///
/// `envs` are added to the inherited environment of the child.
///
/// # Errors
///
/// - The program cannot be spawned (e.g., not installed).
/// - `CoesiError::OrchestrationFailure` if it exits non-zero.
#[instrument(skip(envs), fields(cmd = %command.display()))]
pub async fn run_streamed(
    command: &CommandLine,
    cwd: &Path,
    envs: &BTreeMap<String, String>,
) -> Result<()> {
    info!("Executing command: {}", command.display());
    let status = Command::new(&command.program)
        .args(&command.args)
        .current_dir(cwd)
        .envs(envs)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .with_context(|| {
            format!(
                "Failed to execute command '{}'. Is it installed and in PATH?",
                command.program
            )
        })?;

    if !status.success() {
        error!("Command '{}' failed with status {}", command.display(), status);
        return Err(anyhow!(CoesiError::OrchestrationFailure {
            cmd: command.display(),
            code: status.code(),
        }));
    }

    debug!("Command '{}' completed successfully.", command.display());
    Ok(())
}

/// Runs `command` with output discarded, bounded by `timeout`.
///
/// # Errors
///
/// Only spawn failures other than "not found" (e.g., permission denied) are
/// returned as errors. Every other result is a `ProbeOutcome`.
#[instrument(fields(cmd = %command.display()))]
pub async fn probe(command: &CommandLine, timeout: Duration) -> Result<ProbeOutcome> {
    let spawned = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Command '{}' not found.", command.program);
            return Ok(ProbeOutcome::NotFound);
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to execute command check for '{}'", command.program)))
        }
    };

    match tokio::time::timeout(timeout, child.wait()).await {
        Ok(status) => {
            let status = status
                .with_context(|| format!("Failed to wait for '{}'", command.display()))?;
            debug!("Probe '{}' exited with {}", command.display(), status);
            if status.success() {
                Ok(ProbeOutcome::Success)
            } else {
                Ok(ProbeOutcome::Failed(status.code()))
            }
        }
        Err(_) => {
            debug!("Probe '{}' timed out after {:?}", command.display(), timeout);
            // Best effort, the child is also killed on drop.
            let _ = child.kill().await;
            Ok(ProbeOutcome::TimedOut)
        }
    }
}
