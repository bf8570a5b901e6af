//! # COESI Tool Settings
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the settings of the CLI itself: which orchestration
//! command to run, which compose file to pass, the default production IP and
//! the preflight timeout. These are separate from the per-profile `.env.*`
//! files, which describe the deployed services (see `common::fs::envfile`).
//!
//! ## Architecture
//!
//! Settings sources (in order of precedence):
//! 1. Project-specific `.coesi.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`)
//! 2. User-specific `<config dir>/coesi/config.toml`
//! 3. Default values defined in the code
//!
//! Every field in the TOML files is optional. Files are merged field by field,
//! then resolved into a `Settings` value and validated.
//!
//! ## Examples
//!
//! ```toml
//! [compose]
//! command = ["docker", "compose"]
//! file = "~/coesi/docker-compose.yml"
//!
//! [deploy]
//! default_prod_ip = "10.20.0.4"
//!
//! [preflight]
//! timeout_secs = 5
//! ```
//!
use crate::common::network;
use crate::core::error::{CoesiError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const PROJECT_CONFIG_FILENAME: &str = ".coesi.toml";
const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";

/// Production IP used when `coesi prod` is run without an address.
pub const DEFAULT_PROD_IP: &str = "192.168.177.23";
/// Upper bound for each preflight probe.
pub const DEFAULT_PREFLIGHT_TIMEOUT_SECS: u64 = 10;

/// Settings file as written on disk. All fields are optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub compose: ComposeSection,
    #[serde(default)]
    pub docker: DockerSection,
    #[serde(default)]
    pub deploy: DeploySection,
    #[serde(default)]
    pub preflight: PreflightSection,
}

/// `[compose]`: how the orchestration tool is invoked.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ComposeSection {
    /// Program and leading arguments, e.g. `["docker", "compose"]`.
    pub command: Option<Vec<String>>,
    /// Compose file passed with `-f`. When unset the tool picks its own default.
    pub file: Option<String>,
}

/// `[docker]`: the container engine CLI used by preflight and `clean all`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DockerSection {
    pub command: Option<String>,
}

/// `[deploy]`
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DeploySection {
    pub default_prod_ip: Option<String>,
}

/// `[preflight]`
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PreflightSection {
    pub timeout_secs: Option<u64>,
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub compose_command: Vec<String>,
    pub compose_file: Option<PathBuf>,
    pub docker_command: String,
    pub default_prod_ip: String,
    pub preflight_timeout: Duration,
    /// Directory holding the compose file and the `.env.*` files.
    pub project_dir: PathBuf,
}

impl Settings {
    /// Default settings rooted at `project_dir`.
    pub fn for_project(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            compose_command: vec!["docker-compose".to_string()],
            compose_file: None,
            docker_command: "docker".to_string(),
            default_prod_ip: DEFAULT_PROD_IP.to_string(),
            preflight_timeout: Duration::from_secs(DEFAULT_PREFLIGHT_TIMEOUT_SECS),
            project_dir: project_dir.into(),
        }
    }

    /// Path of a file inside the project directory.
    pub fn project_path(&self, file_name: &str) -> PathBuf {
        self.project_dir.join(file_name)
    }
}

/// Loads, merges and validates settings.
///
/// `project_dir` comes from `--project-dir` / `COESI_PROJECT_DIR`. When it is
/// `None`, the nearest ancestor of the working directory holding the compose
/// file is used, falling back to the working directory itself.
pub fn load_settings(project_dir: Option<PathBuf>) -> Result<Settings> {
    let user = load_user_settings()?;
    let project = load_project_settings()?;
    let merged = merge_settings(user.unwrap_or_default(), project);

    let project_dir = match project_dir {
        Some(dir) => dir,
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            let marker = compose_marker(merged.compose.file.as_deref());
            find_project_root(&cwd, &marker).unwrap_or(cwd)
        }
    };

    let settings = resolve_settings(merged, project_dir)?;
    validate_settings(&settings).context("Settings validation failed")?;
    debug!("Final loaded settings: {:?}", settings);
    Ok(settings)
}

fn load_user_settings() -> Result<Option<SettingsFile>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "COESI", "coesi") else {
        debug!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.is_file() {
        info!("Loading user settings from: {}", config_path.display());
        load_settings_from_path(&config_path).map(Some)
    } else {
        debug!("User settings file not found at {}", config_path.display());
        Ok(None)
    }
}

fn load_project_settings() -> Result<Option<SettingsFile>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_settings_path(&current_dir) {
        Some(path) => {
            info!("Loading project settings from: {}", path.display());
            load_settings_from_path(&path).map(Some)
        }
        None => {
            debug!("No {} found in current directory or ancestors.", PROJECT_CONFIG_FILENAME);
            Ok(None)
        }
    }
}

fn find_project_settings_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let candidate = path.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if path.join(".git").is_dir() {
            debug!("Found .git directory at {}, stopping settings search.", path.display());
            return None;
        }
        path = path.parent()?;
    }
}

fn load_settings_from_path(path: &Path) -> Result<SettingsFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win over user values, field by field.
fn merge_settings(user: SettingsFile, project: Option<SettingsFile>) -> SettingsFile {
    let Some(project) = project else {
        return user;
    };
    SettingsFile {
        compose: ComposeSection {
            command: project.compose.command.or(user.compose.command),
            file: project.compose.file.or(user.compose.file),
        },
        docker: DockerSection {
            command: project.docker.command.or(user.docker.command),
        },
        deploy: DeploySection {
            default_prod_ip: project.deploy.default_prod_ip.or(user.deploy.default_prod_ip),
        },
        preflight: PreflightSection {
            timeout_secs: project.preflight.timeout_secs.or(user.preflight.timeout_secs),
        },
    }
}

fn resolve_settings(file: SettingsFile, project_dir: PathBuf) -> Result<Settings> {
    let defaults = Settings::for_project(project_dir);
    let compose_file = file.compose.file.map(|raw| {
        let expanded = PathBuf::from(shellexpand::tilde(&raw).into_owned());
        debug!("Expanded compose file path: {}", expanded.display());
        expanded
    });
    let timeout_secs = file
        .preflight
        .timeout_secs
        .unwrap_or(DEFAULT_PREFLIGHT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(anyhow!(CoesiError::Config(
            "preflight.timeout_secs must be greater than zero".to_string()
        )));
    }
    Ok(Settings {
        compose_command: file.compose.command.unwrap_or(defaults.compose_command),
        compose_file,
        docker_command: file.docker.command.unwrap_or(defaults.docker_command),
        default_prod_ip: file.deploy.default_prod_ip.unwrap_or(defaults.default_prod_ip),
        preflight_timeout: Duration::from_secs(timeout_secs),
        project_dir: defaults.project_dir,
    })
}

fn validate_settings(settings: &Settings) -> Result<()> {
    if settings
        .compose_command
        .first()
        .map_or(true, |program| program.trim().is_empty())
    {
        return Err(anyhow!(CoesiError::Config(
            "compose.command must name a program".to_string()
        )));
    }
    if settings.docker_command.trim().is_empty() {
        return Err(anyhow!(CoesiError::Config(
            "docker.command must not be empty".to_string()
        )));
    }
    if let Err(reason) = network::check_ip(&settings.default_prod_ip) {
        return Err(anyhow!(CoesiError::Config(format!(
            "deploy.default_prod_ip '{}' is not usable: {}",
            settings.default_prod_ip, reason
        ))));
    }
    Ok(())
}

/// Path, relative to the project root, that marks the root.
///
/// The whole configured path is kept so that `deploy/compose.yml` matches the
/// directory above `deploy/`, where `-f deploy/compose.yml` resolves.
fn compose_marker(compose_file: Option<&str>) -> String {
    compose_file
        .map(|raw| shellexpand::tilde(raw).into_owned())
        .unwrap_or_else(|| DEFAULT_COMPOSE_FILE.to_string())
}

/// Nearest directory, starting at `start`, where `marker` (a relative path) is a file.
pub fn find_project_root(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_file())
        .map(Path::to_path_buf)
}
