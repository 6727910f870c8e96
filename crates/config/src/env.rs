//! Environment variable overlay and `.env` loading.
//!
//! Responsibilities:
//! - Map flat keys to environment variable names (`database.port` -> `DATABASE_PORT`).
//! - Overwrite store values whose variable is set, as one atomic batch.
//! - Load a `.env` file into the process environment on request.
//!
//! Does NOT handle:
//! - Type coercion: overrides are stored as strings.
//! - Adding keys: only keys that are already loaded can be overridden.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.
//! - Environment lookups happen before the store lock is taken.

use crate::error::ConfigError;
use crate::store::Store;
use crate::value::{FlatMap, Scalar};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Environment variable name for a flat key: uppercase, `.` replaced by `_`.
pub fn overlay_name(key: &str) -> String {
    key.replace('.', "_").to_uppercase()
}

/// Overrides loaded values from environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvOverlay {
    prefix: Option<String>,
}

impl EnvOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefixes every variable name, e.g. `MYAPP` maps `server.port` to `MYAPP_SERVER_PORT`.
    ///
    /// Blank prefixes are ignored; a trailing `_` is not doubled.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = prefix.trim().trim_end_matches('_').to_uppercase();
        Self {
            prefix: (!prefix.is_empty()).then_some(prefix),
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn name_for(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, overlay_name(key)),
            None => overlay_name(key),
        }
    }

    /// Applies overrides from the process environment.
    ///
    /// Returns the keys that were overridden, sorted.
    pub fn apply(&self, store: &Store) -> Result<Vec<String>, ConfigError> {
        self.apply_with(store, env_var_or_none)
    }

    /// Applies overrides using `lookup` in place of the process environment.
    ///
    /// `lookup` receives variable names and should return `None` for unset
    /// variables. Blank results are ignored and values are trimmed.
    ///
    /// # Errors
    /// Returns `ConfigError::KeyNotFound` if the store was reloaded between
    /// listing its keys and applying the batch; nothing is applied in that case.
    pub fn apply_with<F>(&self, store: &Store, lookup: F) -> Result<Vec<String>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut updates = FlatMap::new();
        for key in store.keys() {
            let name = self.name_for(&key);
            let Some(value) = lookup(&name) else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            tracing::debug!(key = %key, var = %name, "Overriding config value from environment");
            updates.insert(key, Scalar::from(value));
        }

        let overridden: Vec<String> = updates.keys().cloned().collect();
        if !updates.is_empty() {
            store.update_many(updates)?;
            tracing::info!(count = overridden.len(), "Applied environment overrides");
        }
        Ok(overridden)
    }
}

/// Check if dotenv loading is disabled via environment variable.
fn dotenv_disabled() -> bool {
    matches!(
        std::env::var("DOTENV_DISABLED").ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Load environment variables from a `.env` file in the working directory, if present.
///
/// If `DOTENV_DISABLED` is set to "true" or "1", nothing is loaded.
///
/// # Errors
///
/// Returns an error if:
/// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
/// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
///
/// Missing `.env` files are silently ignored.
///
/// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
pub fn load_dotenv() -> Result<(), ConfigError> {
    if dotenv_disabled() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if is_not_found(&e) => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(ConfigError::DotenvParse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(ConfigError::DotenvUnknown),
    }
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}
