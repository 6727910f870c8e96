//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//! - Resolve the output format once for every command.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Loading files (see `config_context`).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::config_context::ConfigContext;
use crate::formatters::OutputFormat;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let context = ConfigContext::from_cli(&cli);
    let output = OutputFormat::from_str(&cli.output)?;

    match cli.command {
        Commands::Show => commands::show::run(&context, output)?,
        Commands::Get { key } => commands::get::run(&context, &key, output)?,
        Commands::Set {
            assignments,
            typed,
            dry_run,
        } => commands::set::run(&context, assignments, typed, dry_run)?,
        Commands::EnvNames => commands::env_names::run(&context, output)?,
        Commands::Convert { destination, to } => {
            commands::convert::run(&context, &destination, to)?
        }
        Commands::Check => commands::check::run(&context, output)?,
    }

    Ok(())
}
