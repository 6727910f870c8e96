//! Get command implementation.
//!
//! An exact key prints its value. A section prefix (e.g. `database`) prints
//! every key below it. Anything else is an unknown key.

use anyhow::Result;
use confmgr_config::{ConfigError, FlatMap};

use crate::config_context::ConfigContext;
use crate::formatters::{OutputFormat, get_formatter};

pub fn run(context: &ConfigContext, key: &str, output_format: OutputFormat) -> Result<()> {
    let manager = context.load(true)?;
    let store = manager.store();
    let formatter = get_formatter(output_format);

    if let Some(value) = store.get_key(key) {
        print!("{}", formatter.format_value(&value)?);
        return Ok(());
    }

    let section = section_entries(&store.get(), key);
    if section.is_empty() {
        return Err(ConfigError::KeyNotFound {
            key: key.to_string(),
        }
        .into());
    }
    print!("{}", formatter.format_entries(&section)?);
    Ok(())
}

/// Entries whose key starts with `prefix.`.
fn section_entries(entries: &FlatMap, prefix: &str) -> FlatMap {
    let lead = format!("{}.", prefix);
    entries
        .range(lead.clone()..)
        .take_while(|(k, _)| k.starts_with(&lead))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
