//! # COESI Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` that attach the file path to any error, plus
//! `write_string_atomic`, which replaces a file by writing a sibling temporary
//! file and renaming it over the target. A reader never observes a partially
//! written file.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//! use std::path::Path;
//!
//! let path = Path::new(".env.prod");
//! let content = io::read_file_to_string(path)?;
//! io::write_string_atomic(path, &content)?;
//! ```
//!
use crate::core::error::{CoesiError, Result};
use anyhow::{anyhow, Context};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be found, opened, or read, with context
/// naming the file.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Replaces the content of `path` with `content` atomically.
///
/// The temporary file is created in the target's directory so the final
/// rename stays on one filesystem. The parent directory must already exist.
///
/// An existing target keeps its permissions, and a symlinked target is
/// resolved first so the link itself survives and its destination is rewritten.
///
/// # Errors
///
/// Returns `CoesiError::Io` if the temporary file cannot be created, written,
/// flushed, or renamed over the target.
pub fn write_string_atomic(path: &Path, content: &str) -> Result<()> {
    let existing = fs::metadata(path).ok();
    let target = match existing {
        Some(_) => fs::canonicalize(path)
            .with_context(|| format!("Failed to resolve {}", path.display()))?,
        None => path.to_path_buf(),
    };
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let io_error = |action: &str, e: std::io::Error| {
        anyhow!(CoesiError::Io(format!(
            "Failed to {} {}: {}",
            action,
            path.display(),
            e
        )))
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| io_error("stage write for", e))?;
    debug!("Staging write of {} via {}", path.display(), tmp.path().display());
    if let Some(metadata) = &existing {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| io_error("copy permissions to", e))?;
    }
    tmp.write_all(content.as_bytes())
        .map_err(|e| io_error("write", e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| io_error("flush", e))?;
    tmp.persist(&target).map_err(|e| io_error("replace", e.error))?;

    info!("Wrote content to file: {}", path.display());
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_then_read() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join(".env.dev");
        write_string_atomic(&file_path, "DEPLOY_IP=localhost\n")?;
        assert_eq!(read_file_to_string(&file_path)?, "DEPLOY_IP=localhost\n");
        Ok(())
    }

    #[test]
    fn test_atomic_write_replaces_and_leaves_no_temp_files() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join(".env.prod");
        fs::write(&file_path, "OLD=1\n")?;
        write_string_atomic(&file_path, "NEW=2\n")?;
        assert_eq!(fs::read_to_string(&file_path)?, "NEW=2\n");

        let entries = fs::read_dir(dir.path())?.count();
        assert_eq!(entries, 1, "only the target file should remain");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_keeps_permissions() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let file_path = dir.path().join(".env.prod");
        fs::write(&file_path, "OLD=1\n")?;
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o644))?;

        write_string_atomic(&file_path, "NEW=2\n")?;
        let mode = fs::metadata(&file_path)?.permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_through_symlink_keeps_link() -> Result<()> {
        let dir = tempdir()?;
        let real = dir.path().join("shared.env");
        let link = dir.path().join(".env.prod");
        fs::write(&real, "OLD=1\n")?;
        std::os::unix::fs::symlink(&real, &link)?;

        write_string_atomic(&link, "NEW=2\n")?;
        assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real)?, "NEW=2\n");
        Ok(())
    }

    #[test]
    fn test_atomic_write_missing_directory_is_io_error() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("missing/.env.prod");
        let err = write_string_atomic(&file_path, "A=1\n").unwrap_err();
        assert!(matches!(err.downcast_ref::<CoesiError>(), Some(CoesiError::Io(_))));
        Ok(())
    }

    #[test]
    fn test_read_file_not_found() -> Result<()> {
        let dir = tempdir()?;
        let result = read_file_to_string(&dir.path().join("nonexistent.txt"));
        assert!(result.is_err());
        Ok(())
    }
}
