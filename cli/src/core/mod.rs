//! # COESI Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure shared by every command:
//! - `config`: Tool settings loading, merging and validation (`.coesi.toml`)
//! - `error`: The error taxonomy and the `Result` alias
//! - `profile`: Deployment profiles, service ports and the deployment target
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config::Settings;
//! use crate::core::error::{CoesiError, Result};
//! use crate::core::profile::{Profile, ServicePorts};
//! ```
//!
pub mod config;
pub mod error;
pub mod profile;
