//! # COESI Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the COESI CLI and the pieces
//! they share.
//!
//! ## Architecture
//!
//! - Each subcommand lives in its own file and exposes a Clap `*Args` struct
//!   and an async `handle_*` function.
//! - Every handler receives a `Session`: the resolved settings, the
//!   `Orchestrator` to drive and the `Reporter` to print through. `main.rs`
//!   builds the real session; tests build one around fakes.
//! - Helpers shared by several handlers (environment file validation and
//!   loading) are defined here.
//!
//! ## Commands
//!
//! - `deploy`: `coesi dev` and `coesi prod [IP]`
//! - `restart`: restart services without rebuilding
//! - `stop`: stop services of a profile or of both
//! - `status`: show service status
//! - `logs`: view service logs
//! - `clean`: remove containers, networks and volumes
//! - `ip`: change the production IP in `.env.prod`
//!
use crate::common::docker::Orchestrator;
use crate::common::fs::envfile;
use crate::common::ui::Reporter;
use crate::core::config::Settings;
use crate::core::error::Result;
use crate::core::profile::Profile;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Deploys a profile (`coesi dev`, `coesi prod`).
pub mod deploy;
/// Removes containers and volumes (`coesi clean`).
pub mod clean;
/// Updates the production IP (`coesi ip`).
pub mod ip;
/// Shows service logs (`coesi logs`).
pub mod logs;
/// Restarts services (`coesi restart`).
pub mod restart;
/// Shows service status (`coesi status`).
pub mod status;
/// Stops services (`coesi stop`).
pub mod stop;

#[cfg(test)]
pub(crate) mod testing;

/// Everything a handler needs for one invocation.
pub struct Session<'a> {
    pub settings: &'a Settings,
    pub orchestrator: &'a dyn Orchestrator,
    pub out: &'a mut dyn Reporter,
}

/// A profile's environment file after validation and loading.
#[derive(Debug, Clone)]
pub struct LoadedEnvironment {
    /// File values, overridden by values already in the process environment.
    pub values: BTreeMap<String, String>,
}

impl LoadedEnvironment {
    /// Effective value of `key`: the loaded values, then the process environment.
    pub fn get(&self, key: &str) -> Option<String> {
        self.get_with(key, envfile::process_env)
    }

    /// Like `get`, with `lookup` standing in for the process environment.
    pub fn get_with<F>(&self, key: &str, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.values.get(key).cloned().or_else(|| lookup(key))
    }
}

/// Validates the profile's environment file, warning about missing keys.
///
/// Returns the path of the file.
pub(crate) fn validate_env_file(session: &mut Session<'_>, profile: Profile) -> Result<PathBuf> {
    let path = session.settings.project_path(&profile.env_file_name());
    let validation = envfile::validate(&path)?;
    for key in validation.missing_keys {
        session.out.warning(&format!(
            "Required variable {} not found in {}",
            key,
            profile.env_file_name()
        ));
    }
    Ok(path)
}

/// Loads the environment file at `path` on top of the process environment.
pub(crate) fn load_environment(path: &Path) -> Result<LoadedEnvironment> {
    let values = envfile::overlay_process_env(envfile::load(path)?, envfile::process_env);
    Ok(LoadedEnvironment { values })
}
