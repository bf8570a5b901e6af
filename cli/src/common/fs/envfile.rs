//! # COESI Environment File Store
//!
//! File: cli/src/common/fs/envfile.rs
//!
//! ## Overview
//!
//! Each profile has a `.env.<profile>` file of `KEY=VALUE` lines describing the
//! deployed services (deploy IP and service ports). This module reads,
//! validates and updates those files.
//!
//! - `validate`: the file must exist and be readable. Required keys that are
//!   missing are reported back to the caller as warnings, not as a failure.
//! - `upsert`: replaces the first line defining a key, or appends one. Lines
//!   that do not define the key are kept verbatim and in order. The rewrite
//!   goes through `io::write_string_atomic`.
//! - `load`: parses the file with `dotenvy`; later definitions win.
//! - `overlay_process_env`: values already present in the process
//!   environment take precedence over file values.
//!
//! There is no file locking. Two concurrent `coesi` invocations updating the
//! same file can lose an update.
//!
use super::io;
use crate::core::error::{CoesiError, Result};
use crate::core::profile::REQUIRED_KEYS;
use anyhow::anyhow;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of a successful validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvValidation {
    /// Required keys with no defining line, in `REQUIRED_KEYS` order.
    pub missing_keys: Vec<&'static str>,
}

pub fn exists(path: &Path) -> bool {
    path.is_file()
}

/// The key a line defines: everything before the first `=`, ignoring
/// leading whitespace.
fn line_key(line: &str) -> Option<&str> {
    line.trim_start().split_once('=').map(|(key, _)| key)
}

/// Checks that the file exists and reports which required keys it lacks.
///
/// # Errors
///
/// `CoesiError::ConfigurationInvalid` when the file is missing or unreadable.
pub fn validate(path: &Path) -> Result<EnvValidation> {
    if !exists(path) {
        return Err(anyhow!(CoesiError::ConfigurationInvalid(format!(
            "Environment file {} not found",
            path.display()
        ))));
    }
    let content = io::read_file_to_string(path).map_err(|e| {
        anyhow!(CoesiError::ConfigurationInvalid(format!(
            "Failed to read {}: {:#}",
            path.display(),
            e
        )))
    })?;

    let defined: Vec<&str> = content.lines().filter_map(line_key).collect();
    let missing_keys: Vec<&'static str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !defined.contains(key))
        .collect();
    if !missing_keys.is_empty() {
        debug!("{} is missing keys: {:?}", path.display(), missing_keys);
    }
    Ok(EnvValidation { missing_keys })
}

/// Replaces the first line defining `key`, or appends `key=value`.
fn upsert_lines(lines: &mut Vec<String>, key: &str, value: &str) {
    let entry = format!("{}={}", key, value);
    match lines.iter_mut().find(|line| line_key(line) == Some(key)) {
        Some(line) => *line = entry,
        None => lines.push(entry),
    }
}

/// Sets `key` to `value` in the file, creating the file if needed.
///
/// # Errors
///
/// Read failures of an existing file and all write failures are reported as
/// `CoesiError::Io`.
pub fn upsert(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut lines: Vec<String> = if exists(path) {
        io::read_file_to_string(path)
            .map_err(|e| anyhow!(CoesiError::Io(format!("{:#}", e))))?
            .lines()
            .map(str::to_string)
            .collect()
    } else {
        debug!("{} does not exist, creating it", path.display());
        Vec::new()
    };

    upsert_lines(&mut lines, key, value);

    let mut content = lines.join("\n");
    content.push('\n');
    io::write_string_atomic(path, &content)?;
    info!("Set {} in {}", key, path.display());
    Ok(())
}

/// Parses the file into a key/value map.
///
/// Lines `dotenvy` cannot parse are skipped with a warning.
///
/// # Errors
///
/// `CoesiError::ConfigurationInvalid` when the file cannot be opened.
pub fn load(path: &Path) -> Result<BTreeMap<String, String>> {
    let entries = dotenvy::from_path_iter(path).map_err(|e| {
        anyhow!(CoesiError::ConfigurationInvalid(format!(
            "Failed to load {}: {}",
            path.display(),
            e
        )))
    })?;

    let mut values = BTreeMap::new();
    for entry in entries {
        match entry {
            Ok((key, value)) => {
                values.insert(key, value);
            }
            Err(e) => warn!("Skipping unparsable line in {}: {}", path.display(), e),
        }
    }
    debug!("Loaded {} keys from {}", values.len(), path.display());
    Ok(values)
}

/// Replaces file values with values already set in the process environment.
///
/// `lookup` is `std::env::var(..).ok()` outside of tests.
pub fn overlay_process_env<F>(file_values: BTreeMap<String, String>, lookup: F) -> BTreeMap<String, String>
where
    F: Fn(&str) -> Option<String>,
{
    file_values
        .into_iter()
        .map(|(key, value)| {
            let effective = lookup(&key).unwrap_or(value);
            (key, effective)
        })
        .collect()
}

/// Looks up a key in the process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
