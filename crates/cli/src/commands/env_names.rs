//! Env-names command implementation.

use anyhow::Result;

use crate::config_context::ConfigContext;
use crate::formatters::{EnvName, OutputFormat, get_formatter};

pub fn run(context: &ConfigContext, output_format: OutputFormat) -> Result<()> {
    let manager = context.load(false)?;
    let overlay = context.overlay();
    let names: Vec<EnvName> = manager
        .store()
        .keys()
        .into_iter()
        .map(|key| EnvName {
            variable: overlay.name_for(&key),
            key,
        })
        .collect();
    print!("{}", get_formatter(output_format).format_env_names(&names)?);
    Ok(())
}
