//! Check command implementation.
//!
//! Decodes the file, flattens it strictly and rebuilds it. The file passes
//! only if the rebuilt document equals the decoded one, so empty sections,
//! dotted keys, index-like keys and value/section clashes are all reported.

use anyhow::Result;
use confmgr_config::{ConfigError, NestedValue, flatten_strict, unflatten};

use crate::config_context::ConfigContext;
use crate::formatters::{CheckReport, OutputFormat, get_formatter};

pub fn run(context: &ConfigContext, output_format: OutputFormat) -> Result<()> {
    let (format, doc) = context.read()?;
    let flat = flatten_strict(&doc)?;
    let rebuilt = unflatten(&flat)?;

    if let Some(path) = first_difference(&doc, &rebuilt, "") {
        return Err(ConfigError::LossyRoundTrip { path }.into());
    }

    let report = CheckReport {
        file: context.path()?.display().to_string(),
        format: format.to_string(),
        keys: flat.len(),
    };
    print!("{}", get_formatter(output_format).format_check(&report)?);
    Ok(())
}

/// Dotted path of the first node where `a` and `b` disagree.
fn first_difference(a: &NestedValue, b: &NestedValue, path: &str) -> Option<String> {
    match (a, b) {
        (NestedValue::Map(left), NestedValue::Map(right)) => {
            for (key, value) in left {
                let child = join(path, key);
                match right.get(key) {
                    Some(other) => {
                        if let Some(diff) = first_difference(value, other, &child) {
                            return Some(diff);
                        }
                    }
                    None => return Some(child),
                }
            }
            right
                .keys()
                .find(|key| !left.contains_key(*key))
                .map(|key| join(path, key))
        }
        (NestedValue::Seq(left), NestedValue::Seq(right)) if left.len() == right.len() => left
            .iter()
            .zip(right)
            .enumerate()
            .find_map(|(i, (l, r))| first_difference(l, r, &join(path, &i.to_string()))),
        _ if a == b => None,
        _ => Some(path.to_string()),
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}
