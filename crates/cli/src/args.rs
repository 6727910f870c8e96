//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//! - Parse `KEY=VALUE` assignments for `set`.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load configuration files (see `config_context` module).

use clap::{Parser, Subcommand};
use confmgr_config::Format;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "confmgr")]
#[command(about = "Inspect, update and convert JSON, YAML, TOML and INI configuration files", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  confmgr -f config.yaml show\n  confmgr -f config.yaml get database.port\n  confmgr -f config.yaml set database.port=6543 --typed\n  confmgr -f config.yaml --env --env-prefix MYAPP show\n  confmgr -f config.yaml convert config.toml\n  confmgr -f config.json check\n"
)]
pub struct Cli {
    /// Configuration file to operate on
    #[arg(short, long, global = true, env = "CONFMGR_FILE", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Input format (json, yaml, toml, ini); detected from the extension or contents when omitted
    #[arg(long, global = true, env = "CONFMGR_FORMAT", value_name = "FORMAT")]
    pub format: Option<Format>,

    /// Override loaded values from environment variables (e.g. DATABASE_PORT)
    #[arg(long, global = true)]
    pub env: bool,

    /// Prefix for override variables (e.g. MYAPP maps database.port to MYAPP_DATABASE_PORT)
    #[arg(long, global = true, env = "CONFMGR_ENV_PREFIX", value_name = "PREFIX")]
    pub env_prefix: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every key and its value
    Show,

    /// Print the value of one key, or every key below a section
    Get {
        /// Dotted key (e.g. database.port)
        key: String,
    },

    /// Update existing keys and save the file in place
    Set {
        /// Assignments to apply, all or nothing
        #[arg(required = true, value_name = "KEY=VALUE", value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,

        /// Parse true/false/null and numbers instead of storing strings
        #[arg(long)]
        typed: bool,

        /// Print the updated document instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// List the environment variable that overrides each key
    EnvNames,

    /// Write the configuration to another file, possibly in another format
    Convert {
        /// Destination file
        #[arg(value_name = "OUTPUT")]
        destination: PathBuf,

        /// Output format; defaults to the destination's extension
        #[arg(long, value_name = "FORMAT")]
        to: Option<Format>,
    },

    /// Verify that the file survives flattening without losing structure
    Check,
}

/// Parses a `KEY=VALUE` pair; the value may itself contain `=`.
fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(format!("expected KEY=VALUE, got '{}'", raw));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}
