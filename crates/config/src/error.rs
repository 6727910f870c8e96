//! Error types for loading, updating and saving configuration.
//!
//! Responsibilities:
//! - Define one error enum for every failure the library can report.
//! - Classify each variant so callers can tell I/O problems, format problems,
//!   structural conflicts and unknown keys apart without string matching.
//!
//! Does NOT handle:
//! - Exit-code mapping (see `crates/cli/src/error.rs`).
//!
//! Invariants:
//! - Every variant carries the path, key or format that caused it.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, updating or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported config file extension: '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("Could not recognise the contents of {path} as JSON, TOML, YAML or INI")]
    UnrecognizedContent { path: PathBuf },

    #[error("Failed to parse {format} data: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },

    #[error("Failed to encode {format} data: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },

    #[error("Value at '{path}' cannot be represented in {format}: {reason}")]
    Unrepresentable {
        format: &'static str,
        path: String,
        reason: String,
    },

    #[error("Key '{key}' conflicts with '{prefix}': a path cannot be both a value and a section")]
    PathConflict { key: String, prefix: String },

    #[error("Key '{key}' contains an empty path segment")]
    EmptySegment { key: String },

    #[error("Empty container at '{path}' would be lost when flattened")]
    LossyRoundTrip { path: String },

    #[error("Key '{key}' does not exist")]
    KeyNotFound { key: String },

    #[error("No config file has been loaded, so there is nowhere to save")]
    NoSourcePath,

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

/// Coarse classification of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Reading or writing a file failed.
    Io,
    /// The bytes are not valid for the format, or the document cannot be written in it.
    Format,
    /// Flat keys disagree about the shape of the document.
    Structure,
    /// An update targeted a key that is not loaded.
    UnknownKey,
    /// The API was used out of order.
    Usage,
}

impl ConfigError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConfigError::Io { .. } | ConfigError::DotenvIo { .. } | ConfigError::DotenvUnknown => {
                ErrorCategory::Io
            }
            ConfigError::UnsupportedFormat { .. }
            | ConfigError::UnrecognizedContent { .. }
            | ConfigError::Decode { .. }
            | ConfigError::Encode { .. }
            | ConfigError::Unrepresentable { .. }
            | ConfigError::DotenvParse { .. } => ErrorCategory::Format,
            ConfigError::PathConflict { .. }
            | ConfigError::EmptySegment { .. }
            | ConfigError::LossyRoundTrip { .. } => ErrorCategory::Structure,
            ConfigError::KeyNotFound { .. } => ErrorCategory::UnknownKey,
            ConfigError::NoSourcePath => ErrorCategory::Usage,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn decode(format: &'static str, err: impl std::fmt::Display) -> Self {
        ConfigError::Decode {
            format,
            message: err.to_string(),
        }
    }

    pub(crate) fn encode(format: &'static str, err: impl std::fmt::Display) -> Self {
        ConfigError::Encode {
            format,
            message: err.to_string(),
        }
    }
}
