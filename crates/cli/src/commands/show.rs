//! Show command implementation.

use anyhow::Result;

use crate::config_context::ConfigContext;
use crate::formatters::{OutputFormat, get_formatter};

pub fn run(context: &ConfigContext, output_format: OutputFormat) -> Result<()> {
    let manager = context.load(true)?;
    let output = get_formatter(output_format).format_entries(&manager.store().get())?;
    print!("{}", output);
    Ok(())
}
