//! INI backend.
//!
//! Keys of the unnamed general section become top-level keys and every named
//! section becomes one nested map. INI has no types, so every decoded value is a
//! string, and only two levels (section and key) can be written back.

use ::ini::Ini;

use super::{child_path, utf8};
use crate::error::ConfigError;
use crate::value::{NestedMap, NestedValue, Scalar};

pub(super) const NAME: &str = "INI";

pub(super) fn decode(bytes: &[u8]) -> Result<NestedValue, ConfigError> {
    let text = utf8(NAME, bytes)?;
    let ini = Ini::load_from_str(text).map_err(|e| ConfigError::decode(NAME, e))?;

    let mut root = NestedMap::new();
    for (section, properties) in ini.iter() {
        match section {
            None => {
                for (key, value) in properties.iter() {
                    if matches!(root.get(key), Some(NestedValue::Map(_))) {
                        return Err(section_clash(key));
                    }
                    root.insert(key.to_string(), Scalar::from(value).into());
                }
            }
            Some(name) => {
                let entry = root
                    .entry(name.to_string())
                    .or_insert_with(NestedValue::empty_map);
                let NestedValue::Map(section_map) = entry else {
                    return Err(section_clash(name));
                };
                for (key, value) in properties.iter() {
                    section_map.insert(key.to_string(), Scalar::from(value).into());
                }
            }
        }
    }
    Ok(NestedValue::Map(root))
}

fn section_clash(name: &str) -> ConfigError {
    ConfigError::decode(
        NAME,
        format!("'{name}' is used both as a top-level key and as a section name"),
    )
}

pub(super) fn encode(value: &NestedValue) -> Result<Vec<u8>, ConfigError> {
    let NestedValue::Map(root) = value else {
        return Err(unrepresentable("", "the top level must be a map"));
    };

    let mut ini = Ini::new();
    // General-section keys first so they are written before any header.
    for (key, child) in root {
        match child {
            NestedValue::Scalar(scalar) => {
                ini.with_section(None::<String>)
                    .set(key.as_str(), scalar.to_string());
            }
            NestedValue::Map(_) => {}
            NestedValue::Seq(_) => return Err(unrepresentable(key, "INI has no lists")),
        }
    }
    for (section, child) in root {
        let NestedValue::Map(entries) = child else {
            continue;
        };
        for (key, entry) in entries {
            let path = child_path(section, key);
            match entry {
                NestedValue::Scalar(scalar) => {
                    ini.with_section(Some(section.as_str()))
                        .set(key.as_str(), scalar.to_string());
                }
                NestedValue::Map(_) => {
                    return Err(unrepresentable(
                        &path,
                        "INI supports only one level of sections",
                    ));
                }
                NestedValue::Seq(_) => return Err(unrepresentable(&path, "INI has no lists")),
            }
        }
    }

    let mut bytes = Vec::new();
    ini.write_to(&mut bytes)
        .map_err(|e| ConfigError::encode(NAME, e))?;
    Ok(bytes)
}

fn unrepresentable(path: &str, reason: &str) -> ConfigError {
    ConfigError::Unrepresentable {
        format: NAME,
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
