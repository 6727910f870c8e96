//! File access for configuration documents.
//!
//! Responsibilities:
//! - Read a config file into memory.
//! - Write a config file atomically (temporary sibling file + rename).
//!
//! Does NOT handle:
//! - Choosing or running a codec (see `manager.rs`).
//!
//! Invariants:
//! - A failed write never leaves the target partially written.
//! - Parent directories are created on write.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Reads the whole file at `path`.
pub(crate) fn read_config_bytes(path: &Path) -> Result<Vec<u8>, ConfigError> {
    std::fs::read(path).map_err(|e| ConfigError::io(path, e))
}

/// Path of the temporary file used while saving `path` (`config.json` -> `config.json.tmp`).
pub(crate) fn temp_path_for(path: &Path) -> Result<PathBuf, ConfigError> {
    let Some(file_name) = path.file_name() else {
        return Err(ConfigError::io(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "config path has no file name",
            ),
        ));
    };
    let mut temp_name = file_name.to_os_string();
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

/// Atomically replaces the file at `path` with `bytes`.
///
/// Writes to a temporary file first, then renames it to the target path.
/// This ensures the config file is never left in a partially written state.
pub(crate) fn atomic_write(path: &Path, bytes: &[u8]) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
    }

    let temp_path = temp_path_for(path)?;
    std::fs::write(&temp_path, bytes).map_err(|e| ConfigError::io(&temp_path, e))?;

    if let Err(e) = std::fs::rename(&temp_path, path) {
        // Best effort: do not leave the temporary file behind.
        let _ = std::fs::remove_file(&temp_path);
        return Err(ConfigError::io(path, e));
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Config saved atomically");
    Ok(())
}
