//! # COESI Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the COESI CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading tool settings and building the command `Session`
//! - Routing execution to appropriate command handlers
//!
//! ## Architecture
//!
//! - Each top-level command (`dev`, `prod`, `restart`, ...) is a variant in the `Commands` enum
//! - Commands are mapped to handler functions in their respective modules
//! - All errors are propagated to this level, printed once and mapped to exit status 1
//!   (argument errors are reported by Clap with status 2)
//!
//! ## Examples
//!
//! ```bash
//! # Deploy the development environment
//! coesi dev
//!
//! # Deploy production on a specific IP with debug logging
//! coesi -vv prod 192.168.1.100
//!
//! # Follow the logs of one service
//! coesi logs core-api -f
//! ```
//!
//! The runtime is single-threaded. No signal handler is installed, so an
//! interrupt reaches the running `docker-compose` child directly.
//!
use clap::{CommandFactory, Parser};
use common::docker::ComposeCli;
use common::ui::{Console, Reporter};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

// Declare the top-level modules of the CLI crate.
mod commands; // Handles specific command logic (dev, prod, clean, etc.)
mod common; // Contains shared utilities (docker, fs, network, etc.)
mod core; // Core infrastructure (errors, config, profiles)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "coesi",
    about = "COESI Platform CLI - Command line interface for managing Docker deployments.",
    long_about = "COESI Platform CLI - Command line interface for managing Docker deployments.\n\
                  Deploys, restarts, stops and inspects the COESI services through Docker Compose.",
    disable_version_flag = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print version information.
    #[arg(long)]
    version: bool,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding docker-compose.yml and the .env.<profile> files.
    #[arg(long, global = true, env = "COESI_PROJECT_DIR")]
    project_dir: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    Dev(commands::deploy::DevArgs),
    Prod(commands::deploy::ProdArgs),
    Restart(commands::restart::RestartArgs),
    Stop(commands::stop::StopArgs),
    Status(commands::status::StatusArgs),
    Logs(commands::logs::LogsArgs),
    Clean(commands::clean::CleanArgs),
    Ip(commands::ip::IpArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if cli.version {
        println!("COESI CLI version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let mut console = Console;
    if let Err(e) = run(command, cli.project_dir, &mut console).await {
        tracing::error!("Command execution failed: {:?}", e);
        console.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Loads settings and dispatches `command` to its handler.
async fn run(
    command: Commands,
    project_dir: Option<PathBuf>,
    out: &mut dyn Reporter,
) -> anyhow::Result<()> {
    let settings = crate::core::config::load_settings(project_dir)?;
    tracing::debug!("Using settings: {:?}", settings);
    let orchestrator = ComposeCli::new(settings.clone());
    let mut session = commands::Session {
        settings: &settings,
        orchestrator: &orchestrator,
        out,
    };

    match command {
        Commands::Dev(args) => commands::deploy::handle_dev(args, &mut session).await,
        Commands::Prod(args) => commands::deploy::handle_prod(args, &mut session).await,
        Commands::Restart(args) => commands::restart::handle_restart(args, &mut session).await,
        Commands::Stop(args) => commands::stop::handle_stop(args, &mut session).await,
        Commands::Status(args) => commands::status::handle_status(args, &mut session).await,
        Commands::Logs(args) => commands::logs::handle_logs(args, &mut session).await,
        Commands::Clean(args) => commands::clean::handle_clean(args, &mut session).await,
        Commands::Ip(args) => commands::ip::handle_ip(args, &mut session).await,
    }
}

// --- Basic Integration Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn coesi_cmd() -> Command {
        Command::cargo_bin("coesi").expect("Failed to find coesi binary for testing")
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_main_help_flag() {
        coesi_cmd().arg("--help").assert().success();
    }

    #[test]
    fn test_main_version_flag() {
        coesi_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(format!(
                "COESI CLI version {}",
                env!("CARGO_PKG_VERSION")
            )));
    }
}
