//! # COESI CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`main_tests.rs`,
//! `commands.rs`). Each of those files is compiled as a separate test crate
//! that drives the compiled `coesi` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// # Get COESI Command (`coesi_cmd`)
///
/// An `assert_cmd::Command` pointing to the compiled `coesi` binary.
/// `COESI_PROJECT_DIR` and `RUST_LOG` are cleared so the caller's shell does
/// not leak into the test.
///
/// ## Panics
/// Panics if the `coesi` binary cannot be found via `Command::cargo_bin`.
pub fn coesi_cmd() -> Command {
    let mut cmd = Command::cargo_bin("coesi").expect("Failed to find coesi binary for testing");
    cmd.env_remove("COESI_PROJECT_DIR").env_remove("RUST_LOG");
    cmd
}

/// A temporary project directory with an empty `docker-compose.yml`.
pub fn temp_project() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("docker-compose.yml"), "services: {}\n")
        .expect("Failed to write compose file");
    dir
}

/// Reads `name` inside `dir`.
pub fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).expect("Failed to read file")
}
