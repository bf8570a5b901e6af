//! # COESI Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the COESI CLI. Every
//! failure that can end an invocation maps onto one variant of `CoesiError`,
//! which keeps the messages shown to the operator consistent.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `CoesiError`: A custom error enum using `thiserror` for the failure taxonomy
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The taxonomy:
//! - `InvalidArgument`: bad IP address, or an IP given to the development profile
//! - `ConfigurationInvalid`: a `.env.<profile>` file that is missing or unreadable
//! - `PreconditionFailed`: Docker, its daemon or Docker Compose is unavailable
//! - `OrchestrationFailure`: the orchestration tool exited non-zero
//! - `Io`: writing an environment file failed
//! - `Config`: the tool's own `.coesi.toml` settings are malformed
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !validate_ip(ip) {
//!     return Err(CoesiError::InvalidArgument(format!("Invalid IP address '{}'", ip)))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
//! None of these errors are retried. `main` prints the message and exits with
//! status 1.
//!
use thiserror::Error;

/// Custom error type for the COESI CLI.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoesiError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    ConfigurationInvalid(String),

    #[error("Docker validation failed: {0}")]
    PreconditionFailed(String),

    /// `code` is `None` when the child was terminated by a signal.
    #[error("Command '{cmd}' failed with exit code {}", exit_code_label(.code))]
    OrchestrationFailure { cmd: String, code: Option<i32> },

    #[error("{0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn exit_code_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "?".to_string(), |c| c.to_string())
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
