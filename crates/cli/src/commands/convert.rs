//! Convert command implementation.

use std::path::Path;

use anyhow::Result;
use confmgr_config::Format;

use crate::config_context::ConfigContext;

pub fn run(context: &ConfigContext, output: &Path, to: Option<Format>) -> Result<()> {
    let manager = context.load(true)?;
    let format = match to {
        Some(format) => {
            manager.save_file_as(output, format)?;
            format
        }
        None => manager.save_file(output)?,
    };
    tracing::info!(path = %output.display(), format = %format, "Converted config file");
    eprintln!("Wrote {} ({})", output.display(), format);
    Ok(())
}
