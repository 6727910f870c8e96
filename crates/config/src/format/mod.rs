//! Format backends for JSON, YAML, TOML and INI files.
//!
//! Responsibilities:
//! - Define the `Codec` seam between the flat core and concrete file formats.
//! - Provide the built-in `Format` backends and extension-based selection.
//! - Provide content sniffing as a fallback with a fixed precedence (see `detect.rs`).
//!
//! Does NOT handle:
//! - Reading or writing files (see `manager.rs`).
//! - Flattening (codecs hand over and receive whole `NestedValue` trees).
//!
//! Invariants:
//! - Every decoder returns a map at the root.
//! - Encoders reject values the format cannot represent with
//!   `ConfigError::Unrepresentable` instead of silently changing them.

mod detect;
mod ini;
mod json;
mod toml;
mod yaml;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::value::NestedValue;

pub use detect::sniff;

/// A decode/encode pair for one file format.
///
/// Implement this to plug a custom backend into
/// [`ConfigManager::load_file_with`](crate::ConfigManager::load_file_with).
pub trait Codec: Send + Sync {
    /// Human-readable format name used in errors and logs.
    fn name(&self) -> &'static str;

    fn decode(&self, bytes: &[u8]) -> Result<NestedValue, ConfigError>;

    fn encode(&self, value: &NestedValue) -> Result<Vec<u8>, ConfigError>;
}

/// Built-in file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Toml,
    Ini,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Json, Format::Yaml, Format::Toml, Format::Ini];

    /// Maps a file extension (without the dot, any case) to a format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "toml" => Some(Format::Toml),
            "ini" | "cfg" | "conf" => Some(Format::Ini),
            _ => None,
        }
    }

    /// Selects a format from the path's extension.
    ///
    /// # Errors
    /// Returns `ConfigError::UnsupportedFormat` when the extension is missing or unknown.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_extension(&extension).ok_or(ConfigError::UnsupportedFormat { extension })
    }

    /// Canonical extension used when writing a file of this format.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
            Format::Ini => "ini",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s.trim()).ok_or_else(|| ConfigError::UnsupportedFormat {
            extension: s.to_string(),
        })
    }
}

impl Codec for Format {
    fn name(&self) -> &'static str {
        match self {
            Format::Json => json::NAME,
            Format::Yaml => yaml::NAME,
            Format::Toml => toml::NAME,
            Format::Ini => ini::NAME,
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<NestedValue, ConfigError> {
        match self {
            Format::Json => json::decode(bytes),
            Format::Yaml => yaml::decode(bytes),
            Format::Toml => toml::decode(bytes),
            Format::Ini => ini::decode(bytes),
        }
    }

    fn encode(&self, value: &NestedValue) -> Result<Vec<u8>, ConfigError> {
        match self {
            Format::Json => json::encode(value),
            Format::Yaml => yaml::encode(value),
            Format::Toml => toml::encode(value),
            Format::Ini => ini::encode(value),
        }
    }
}

/// Decodes bytes as UTF-8 text, reporting failures against `format`.
pub(crate) fn utf8<'a>(format: &'static str, bytes: &'a [u8]) -> Result<&'a str, ConfigError> {
    std::str::from_utf8(bytes).map_err(|e| ConfigError::decode(format, e))
}

/// Joins a child segment onto a dotted path for error reporting.
pub(crate) fn child_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Shared documents for the per-format tests.

    use crate::value::{FlatMap, Scalar};

    /// The flat view every text fixture below should decode to, modulo value types.
    pub fn expected_typed() -> FlatMap {
        [
            ("database.user", Scalar::from("dbuser")),
            ("database.password", Scalar::from("dbpass")),
            ("database.host", Scalar::from("localhost")),
            ("database.port", Scalar::Integer(5432)),
            ("server.host", Scalar::from("localhost")),
            ("server.port", Scalar::Integer(8080)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}
