//! CLI errors and exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ConfigError` categories and CLI usage errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit code 2 is shared with clap's own usage errors.
//! - Errors are found anywhere in the anyhow chain, so `.context()` never changes the code.

use confmgr_config::{ConfigError, ErrorCategory};
use thiserror::Error;

/// Structured exit codes for confmgr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Usage error - missing or invalid arguments.
    UsageError = 2,

    /// I/O error - the file could not be read or written.
    IoError = 3,

    /// Format error - the contents are not valid for the format, or cannot be written in it.
    FormatError = 4,

    /// Structure error - keys disagree about the document's shape, or structure would be lost.
    StructureError = 5,

    /// Unknown key - the key is not present in the loaded file.
    ///
    /// Only existing keys can be read or updated.
    UnknownKey = 6,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<ErrorCategory> for ExitCode {
    fn from(category: ErrorCategory) -> Self {
        match category {
            ErrorCategory::Io => ExitCode::IoError,
            ErrorCategory::Format => ExitCode::FormatError,
            ErrorCategory::Structure => ExitCode::StructureError,
            ErrorCategory::UnknownKey => ExitCode::UnknownKey,
            ErrorCategory::Usage => ExitCode::UsageError,
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        ExitCode::from(err.category())
    }
}

/// Errors raised by the CLI itself rather than the config library.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("No config file given. Pass --file or set CONFMGR_FILE")]
    MissingFile,

    #[error("Invalid output format: {0}. Valid options: table, json")]
    InvalidOutputFormat(String),
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
            if cause.downcast_ref::<CliError>().is_some() {
                return ExitCode::UsageError;
            }
        }

        ExitCode::GeneralError
    }
}
