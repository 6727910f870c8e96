//! Set command implementation.
//!
//! Applies every assignment as one atomic batch, then saves the file in place
//! in the format it was loaded with. Environment overrides are never written
//! back to the file.

use anyhow::{Context, Result};
use confmgr_config::{FlatMap, Scalar};

use crate::config_context::ConfigContext;

pub fn run(
    context: &ConfigContext,
    assignments: Vec<(String, String)>,
    typed: bool,
    dry_run: bool,
) -> Result<()> {
    if context.env_enabled() {
        tracing::warn!("--env is ignored by set; environment overrides are not saved");
    }

    let manager = context.load(false)?;
    let updates = build_updates(assignments, typed);
    let count = updates.len();
    for (key, from, to) in type_changes(&manager.store().get(), &updates) {
        tracing::warn!(
            key = %key,
            from,
            to,
            "Assignment changes the value's type; pass --typed to keep numbers and booleans"
        );
    }
    manager.store().update_many(updates)?;

    if dry_run {
        let format = manager
            .source_format()
            .context("Loaded config has no built-in format")?;
        let rendered = manager.render(&format)?;
        print!("{}", String::from_utf8_lossy(&rendered));
        return Ok(());
    }

    let path = manager.save()?;
    eprintln!("Updated {} key(s) in {}", count, path.display());
    Ok(())
}

/// Converts raw assignments into updates; later assignments to the same key win.
fn build_updates(assignments: Vec<(String, String)>, typed: bool) -> FlatMap {
    assignments
        .into_iter()
        .map(|(key, raw)| {
            let value = if typed {
                Scalar::infer(&raw)
            } else {
                Scalar::String(raw)
            };
            (key, value)
        })
        .collect()
}

/// Lists updates that replace a value of one type with another, ignoring nulls.
fn type_changes<'a>(
    current: &FlatMap,
    updates: &'a FlatMap,
) -> Vec<(&'a str, &'static str, &'static str)> {
    updates
        .iter()
        .filter_map(|(key, new)| {
            let old = current.get(key)?;
            let (from, to) = (old.type_name(), new.type_name());
            (from != to && from != "null" && to != "null").then_some((key.as_str(), from, to))
        })
        .collect()
}
