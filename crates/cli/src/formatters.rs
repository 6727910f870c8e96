//! Output formatters for CLI commands.
//!
//! Provides two output formats: a human-readable table and JSON.

use std::collections::BTreeMap;

use anyhow::Result;
use confmgr_config::{FlatMap, Scalar};
use serde::Serialize;

use crate::error::CliError;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self, CliError> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(CliError::InvalidOutputFormat(s.to_string())),
        }
    }
}

/// Result of `check`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub file: String,
    pub format: String,
    pub keys: usize,
}

/// Environment variable name for one key.
#[derive(Debug, Clone, Serialize)]
pub struct EnvName {
    pub key: String,
    pub variable: String,
}

/// Formatter trait for different output types.
pub trait Formatter {
    /// Format a set of flat entries.
    fn format_entries(&self, entries: &FlatMap) -> Result<String>;

    /// Format a single value.
    fn format_value(&self, value: &Scalar) -> Result<String>;

    /// Format key to environment variable mappings.
    fn format_env_names(&self, names: &[EnvName]) -> Result<String>;

    /// Format a successful check.
    fn format_check(&self, report: &CheckReport) -> Result<String>;
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_entries(&self, entries: &FlatMap) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(entries)?))
    }

    fn format_value(&self, value: &Scalar) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string(value)?))
    }

    fn format_env_names(&self, names: &[EnvName]) -> Result<String> {
        let map: BTreeMap<&str, &str> = names
            .iter()
            .map(|n| (n.key.as_str(), n.variable.as_str()))
            .collect();
        Ok(format!("{}\n", serde_json::to_string_pretty(&map)?))
    }

    fn format_check(&self, report: &CheckReport) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(report)?))
    }
}

/// Table formatter: one `key = value` line per entry, keys padded to align.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_entries(&self, entries: &FlatMap) -> Result<String> {
        if entries.is_empty() {
            return Ok("No keys found.\n".to_string());
        }
        let width = entries.keys().map(|k| k.len()).max().unwrap_or(0);
        let mut output = String::new();
        for (key, value) in entries {
            output.push_str(&format!("{:<width$} = {}\n", key, value, width = width));
        }
        Ok(output)
    }

    fn format_value(&self, value: &Scalar) -> Result<String> {
        Ok(format!("{}\n", value))
    }

    fn format_env_names(&self, names: &[EnvName]) -> Result<String> {
        if names.is_empty() {
            return Ok("No keys found.\n".to_string());
        }
        let width = names.iter().map(|n| n.key.len()).max().unwrap_or(0).max(3);
        let mut output = format!("{:<width$}  VARIABLE\n", "KEY", width = width);
        for name in names {
            output.push_str(&format!(
                "{:<width$}  {}\n",
                name.key,
                name.variable,
                width = width
            ));
        }
        Ok(output)
    }

    fn format_check(&self, report: &CheckReport) -> Result<String> {
        Ok(format!(
            "OK: {} ({}, {} keys)\n",
            report.file, report.format, report.keys
        ))
    }
}

/// Get a formatter for the specified output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
