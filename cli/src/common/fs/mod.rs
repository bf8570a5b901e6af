//! # COESI Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers used by the commands:
//!
//! - **`io`**: Reading files with path context and atomic (temp file + rename) writes.
//! - **`envfile`**: The `.env.<profile>` store: validate, upsert and load.
//!
//! ```rust
//! use crate::common::fs::envfile;
//! use std::path::Path;
//!
//! let path = Path::new(".env.prod");
//! envfile::validate(path)?;
//! envfile::upsert(path, "DEPLOY_IP", "10.0.0.4")?;
//! let values = envfile::load(path)?;
//! ```
//!

/// The `.env.<profile>` key/value store.
pub mod envfile;
/// Basic file I/O: contextual reads and atomic writes.
pub mod io;
