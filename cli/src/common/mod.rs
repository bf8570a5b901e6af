//! # COESI Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities used by the command handlers, kept apart from
//! command-specific logic (`commands::`) and core infrastructure (`core::`).
//!
//! - **`docker`**: The orchestration facade (`docker-compose` invocations) and preflight probes.
//! - **`fs`**: Atomic file writes and the `.env.<profile>` store.
//! - **`network`**: Deployment IP validation.
//! - **`process`**: Argument-vector subprocess execution, streamed or bounded by a timeout.
//! - **`ui`**: The `Reporter` output sink and its terminal implementation.
//!

/// Docker Compose facade and preflight checks.
pub mod docker;
/// Filesystem utilities and the environment file store.
pub mod fs;
/// IP address validation.
pub mod network;
/// External process execution.
pub mod process;
/// User-facing output.
pub mod ui;
