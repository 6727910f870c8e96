//! YAML backend.

use serde_yaml::{Mapping, Number, Value};

use super::{child_path, utf8};
use crate::error::ConfigError;
use crate::value::{NestedMap, NestedValue, Scalar};

pub(super) const NAME: &str = "YAML";

pub(super) fn decode(bytes: &[u8]) -> Result<NestedValue, ConfigError> {
    let text = utf8(NAME, bytes)?;
    let value: Value = serde_yaml::from_str(text).map_err(|e| ConfigError::decode(NAME, e))?;
    match value {
        // An empty document is an empty configuration.
        Value::Null => Ok(NestedValue::empty_map()),
        Value::Mapping(mapping) => from_mapping(mapping, ""),
        other => Err(ConfigError::decode(
            NAME,
            format!("expected a mapping at the top level, found {}", kind(&other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn from_mapping(mapping: Mapping, path: &str) -> Result<NestedValue, ConfigError> {
    let mut map = NestedMap::new();
    for (key, value) in mapping {
        let key = key_to_string(key, path)?;
        let key_path = child_path(path, &key);
        let child = from_yaml(value, &key_path)?;
        // `1` and `"1"` are distinct YAML keys but the same flat segment.
        if map.insert(key, child).is_some() {
            return Err(ConfigError::decode(
                NAME,
                format!("duplicate key '{}' after key stringification", key_path),
            ));
        }
    }
    Ok(NestedValue::Map(map))
}

/// Scalar keys are stringified the way they are written; collection keys are rejected.
fn key_to_string(key: Value, path: &str) -> Result<String, ConfigError> {
    match key {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Tagged(tagged) => key_to_string(tagged.value, path),
        other => Err(ConfigError::decode(
            NAME,
            format!(
                "{} used as a mapping key under '{}' is not supported",
                kind(&other),
                path
            ),
        )),
    }
}

fn from_yaml(value: Value, path: &str) -> Result<NestedValue, ConfigError> {
    Ok(match value {
        Value::Null => NestedValue::Scalar(Scalar::Null),
        Value::Bool(b) => NestedValue::Scalar(Scalar::Bool(b)),
        Value::Number(n) => NestedValue::Scalar(number(&n)),
        Value::String(s) => NestedValue::Scalar(Scalar::String(s)),
        Value::Sequence(items) => NestedValue::Seq(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| from_yaml(item, &child_path(path, &i.to_string())))
                .collect::<Result<_, _>>()?,
        ),
        Value::Mapping(mapping) => from_mapping(mapping, path)?,
        Value::Tagged(tagged) => from_yaml(tagged.value, path)?,
    })
}

fn number(n: &Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Integer(i)
    } else if let Some(u) = n.as_u64() {
        Scalar::Unsigned(u)
    } else {
        Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

pub(super) fn encode(value: &NestedValue) -> Result<Vec<u8>, ConfigError> {
    let text = serde_yaml::to_string(&to_yaml(value)).map_err(|e| ConfigError::encode(NAME, e))?;
    Ok(text.into_bytes())
}

fn to_yaml(value: &NestedValue) -> Value {
    match value {
        NestedValue::Scalar(Scalar::Null) => Value::Null,
        NestedValue::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
        NestedValue::Scalar(Scalar::Integer(i)) => Value::Number(Number::from(*i)),
        NestedValue::Scalar(Scalar::Unsigned(u)) => Value::Number(Number::from(*u)),
        NestedValue::Scalar(Scalar::Float(x)) => Value::Number(Number::from(*x)),
        NestedValue::Scalar(Scalar::String(s)) => Value::String(s.clone()),
        NestedValue::Seq(items) => Value::Sequence(items.iter().map(to_yaml).collect()),
        NestedValue::Map(map) => Value::Mapping(
            map.iter()
                .map(|(k, v)| (Value::String(k.clone()), to_yaml(v)))
                .collect(),
        ),
    }
}
