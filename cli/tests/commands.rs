//! # COESI Command Integration Tests
//!
//! File: cli/tests/commands.rs
//!
//! ## Overview
//!
//! Drives the subcommands through the compiled binary. Argument and IP
//! validation happen before Docker is consulted, so those paths run anywhere.
//! Tests needing a working Docker installation are marked `#[ignore]`.
//!

mod common;

use common::{coesi_cmd, read, temp_project};
use predicates::prelude::*;

#[test]
fn test_dev_rejects_ip_argument() {
    let project = temp_project();
    coesi_cmd()
        .arg("--project-dir")
        .arg(project.path())
        .args(["dev", "1.2.3.4"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Development profile does not accept IP parameter",
        ));
}

#[test]
fn test_prod_rejects_invalid_ip() {
    let project = temp_project();
    coesi_cmd()
        .arg("--project-dir")
        .arg(project.path())
        .args(["prod", "999.1.1.1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid IP address '999.1.1.1'"));
    assert!(!project.path().join(".env.prod").exists());
}

#[test]
fn test_ip_requires_an_argument() {
    coesi_cmd().arg("ip").assert().code(2);
}

#[test]
fn test_ip_rejects_out_of_range_octet() {
    let project = temp_project();
    coesi_cmd()
        .arg("--project-dir")
        .arg(project.path())
        .args(["ip", "300.1.1.1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("each octet must be between 0-255"));
}

#[test]
fn test_ip_writes_env_prod() {
    let project = temp_project();
    std::fs::write(
        project.path().join(".env.prod"),
        "DEPLOY_IP=192.168.177.23\nGRAPHDB_PORT=7200\n",
    )
    .unwrap();

    coesi_cmd()
        .arg("--project-dir")
        .arg(project.path())
        .args(["ip", "10.0.0.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Production IP updated to: 10.0.0.5"))
        .stdout(predicate::str::contains("Run 'coesi prod' to deploy with new IP"));

    assert_eq!(
        read(project.path(), ".env.prod"),
        "DEPLOY_IP=10.0.0.5\nGRAPHDB_PORT=7200\n"
    );
}

#[test]
fn test_project_dir_from_environment() {
    let project = temp_project();
    coesi_cmd()
        .env("COESI_PROJECT_DIR", project.path())
        .args(["ip", "10.1.2.3"])
        .assert()
        .success();
    assert_eq!(read(project.path(), ".env.prod"), "DEPLOY_IP=10.1.2.3\n");
}

#[test]
fn test_invalid_tool_settings_fail() {
    let project = temp_project();
    std::fs::create_dir(project.path().join(".git")).unwrap();
    std::fs::write(
        project.path().join(".coesi.toml"),
        "[preflight]\ntimeout_secs = 0\n",
    )
    .unwrap();

    coesi_cmd()
        .current_dir(project.path())
        .args(["ip", "10.1.2.3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

/// A project whose Docker and Compose commands are `true`, so preflight and
/// every orchestration call succeed without a container engine.
#[cfg(unix)]
fn project_with_stub_tools() -> tempfile::TempDir {
    let project = temp_project();
    std::fs::create_dir(project.path().join(".git")).unwrap();
    std::fs::write(
        project.path().join(".coesi.toml"),
        "[docker]\ncommand = \"true\"\n\n[compose]\ncommand = [\"true\"]\n",
    )
    .unwrap();
    project
}

#[cfg(unix)]
#[test]
fn test_clean_declined_on_piped_stdin() {
    let project = project_with_stub_tools();
    coesi_cmd()
        .current_dir(project.path())
        .args(["clean", "all"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Clean operation cancelled."));
}

#[cfg(unix)]
#[test]
fn test_clean_confirmed_on_piped_stdin() {
    let project = project_with_stub_tools();
    coesi_cmd()
        .current_dir(project.path())
        .args(["clean", "all"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("All environments cleaned."));
}

#[cfg(unix)]
#[test]
fn test_clean_with_closed_stdin_declines() {
    let project = project_with_stub_tools();
    coesi_cmd()
        .current_dir(project.path())
        .args(["clean", "dev"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Clean operation cancelled."));
}

#[cfg(unix)]
#[test]
fn test_missing_keys_are_reported_once() {
    let project = project_with_stub_tools();
    std::fs::write(project.path().join(".env.dev"), "DEPLOY_IP=localhost\n").unwrap();
    coesi_cmd()
        .current_dir(project.path())
        .args(["restart", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Required variable GRAPHDB_PORT not found in .env.dev",
        ))
        .stderr(predicate::str::contains("missing keys").not());
}

#[test]
fn test_restart_requires_profile() {
    coesi_cmd().arg("restart").assert().code(2);
}

#[test]
fn test_bad_profile_is_usage_error() {
    coesi_cmd().args(["stop", "bogus"]).assert().code(2);
    coesi_cmd().args(["status", "staging"]).assert().code(2);
    coesi_cmd().args(["clean", "qa", "--force"]).assert().code(2);
}

#[test]
#[ignore] // Requires a running Docker daemon
fn test_status_with_docker() {
    let project = temp_project();
    coesi_cmd()
        .arg("--project-dir")
        .arg(project.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Development Services ==="));
}

#[test]
#[ignore] // Requires a running Docker daemon
fn test_clean_dev_with_docker() {
    let project = temp_project();
    coesi_cmd()
        .arg("--project-dir")
        .arg(project.path())
        .args(["clean", "dev", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Development environment cleaned."));
}
