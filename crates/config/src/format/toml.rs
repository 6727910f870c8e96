//! TOML backend.

use ::toml::{Table, Value};

use super::{child_path, utf8};
use crate::error::ConfigError;
use crate::value::{NestedValue, Scalar};

pub(super) const NAME: &str = "TOML";

pub(super) fn decode(bytes: &[u8]) -> Result<NestedValue, ConfigError> {
    let text = utf8(NAME, bytes)?;
    let table: Table = ::toml::from_str(text).map_err(|e| ConfigError::decode(NAME, e))?;
    Ok(from_table(table))
}

fn from_table(table: Table) -> NestedValue {
    NestedValue::Map(table.into_iter().map(|(k, v)| (k, from_toml(v))).collect())
}

fn from_toml(value: Value) -> NestedValue {
    match value {
        Value::String(s) => NestedValue::Scalar(Scalar::String(s)),
        Value::Integer(i) => NestedValue::Scalar(Scalar::Integer(i)),
        Value::Float(x) => NestedValue::Scalar(Scalar::Float(x)),
        Value::Boolean(b) => NestedValue::Scalar(Scalar::Bool(b)),
        // No datetime scalar in the flat model; keep the RFC 3339 text.
        Value::Datetime(dt) => NestedValue::Scalar(Scalar::String(dt.to_string())),
        Value::Array(items) => NestedValue::Seq(items.into_iter().map(from_toml).collect()),
        Value::Table(table) => from_table(table),
    }
}

pub(super) fn encode(value: &NestedValue) -> Result<Vec<u8>, ConfigError> {
    let Value::Table(table) = to_toml(value, "")? else {
        return Err(ConfigError::Unrepresentable {
            format: NAME,
            path: String::new(),
            reason: "the top level must be a table".to_string(),
        });
    };
    let text = ::toml::to_string(&table).map_err(|e| ConfigError::encode(NAME, e))?;
    Ok(text.into_bytes())
}

fn to_toml(value: &NestedValue, path: &str) -> Result<Value, ConfigError> {
    Ok(match value {
        NestedValue::Scalar(Scalar::Null) => {
            return Err(ConfigError::Unrepresentable {
                format: NAME,
                path: path.to_string(),
                reason: "TOML has no null value".to_string(),
            });
        }
        NestedValue::Scalar(Scalar::Bool(b)) => Value::Boolean(*b),
        NestedValue::Scalar(Scalar::Integer(i)) => Value::Integer(*i),
        NestedValue::Scalar(Scalar::Unsigned(u)) => {
            return Err(ConfigError::Unrepresentable {
                format: NAME,
                path: path.to_string(),
                reason: format!("{u} does not fit a 64-bit signed TOML integer"),
            });
        }
        NestedValue::Scalar(Scalar::Float(x)) => Value::Float(*x),
        NestedValue::Scalar(Scalar::String(s)) => Value::String(s.clone()),
        NestedValue::Seq(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| to_toml(item, &child_path(path, &i.to_string())))
                .collect::<Result<_, _>>()?,
        ),
        NestedValue::Map(map) => {
            let mut table = Table::new();
            for (key, child) in map {
                table.insert(key.clone(), to_toml(child, &child_path(path, key))?);
            }
            Value::Table(table)
        }
    })
}
