//! Configuration file context for commands.
//!
//! Responsibilities:
//! - Resolve the target file and forced format from the global flags.
//! - Load the file into a `ConfigManager`, optionally applying the environment overlay.
//!
//! Does NOT handle:
//! - Output formatting (see `formatters`).
//!
//! Invariants:
//! - A blank `--file` / `CONFMGR_FILE` is treated as unset.
//! - The overlay is applied only when `--env` is passed.

use std::path::{Path, PathBuf};

use anyhow::Result;
use confmgr_config::{ConfigManager, EnvOverlay, Format, NestedValue, read_document};

use crate::args::Cli;
use crate::error::CliError;

/// Global options shared by every command that reads a file.
#[derive(Debug, Clone)]
pub(crate) struct ConfigContext {
    file: Option<PathBuf>,
    format: Option<Format>,
    env: bool,
    env_prefix: Option<String>,
}

impl ConfigContext {
    pub(crate) fn from_cli(cli: &Cli) -> Self {
        Self {
            file: cli
                .file
                .clone()
                .filter(|p| !p.to_string_lossy().trim().is_empty()),
            format: cli.format,
            env: cli.env,
            env_prefix: cli.env_prefix.clone(),
        }
    }

    pub(crate) fn path(&self) -> Result<&Path, CliError> {
        self.file.as_deref().ok_or(CliError::MissingFile)
    }

    pub(crate) fn env_enabled(&self) -> bool {
        self.env
    }

    pub(crate) fn overlay(&self) -> EnvOverlay {
        match &self.env_prefix {
            Some(prefix) => EnvOverlay::with_prefix(prefix.as_str()),
            None => EnvOverlay::new(),
        }
    }

    /// Loads the file, applying environment overrides when `--env` was given
    /// and `with_env` allows it.
    pub(crate) fn load(&self, with_env: bool) -> Result<ConfigManager> {
        let path = self.path()?;
        let mut manager = ConfigManager::new();
        let format = match self.format {
            Some(format) => {
                manager.load_file_as(path, format)?;
                format
            }
            None => manager.load_file(path)?,
        };
        tracing::info!(
            path = %path.display(),
            format = %format,
            keys = manager.store().len(),
            "Loaded config file"
        );

        if with_env && self.env {
            let overridden = manager.apply_env(&self.overlay())?;
            tracing::debug!(keys = ?overridden, "Environment overlay applied to loaded config");
        }
        Ok(manager)
    }

    /// Reads and decodes the file without flattening it.
    pub(crate) fn read(&self) -> Result<(Format, NestedValue)> {
        let path = self.path()?;
        Ok(read_document(path, self.format)?)
    }
}
