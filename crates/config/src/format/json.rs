//! JSON backend.

use serde_json::{Map, Number, Value};

use super::child_path;
use crate::error::ConfigError;
use crate::value::{NestedValue, Scalar};

pub(super) const NAME: &str = "JSON";

pub(super) fn decode(bytes: &[u8]) -> Result<NestedValue, ConfigError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| ConfigError::decode(NAME, e))?;
    match value {
        Value::Object(_) => Ok(from_json(value)),
        other => Err(ConfigError::decode(
            NAME,
            format!("expected an object at the top level, found {}", kind(&other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn from_json(value: Value) -> NestedValue {
    match value {
        Value::Null => NestedValue::Scalar(Scalar::Null),
        Value::Bool(b) => NestedValue::Scalar(Scalar::Bool(b)),
        Value::Number(n) => NestedValue::Scalar(number(&n)),
        Value::String(s) => NestedValue::Scalar(Scalar::String(s)),
        Value::Array(items) => NestedValue::Seq(items.into_iter().map(from_json).collect()),
        Value::Object(map) => {
            NestedValue::Map(map.into_iter().map(|(k, v)| (k, from_json(v))).collect())
        }
    }
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
    let json = to_json(value, "")?;
    let mut bytes = serde_json::to_vec_pretty(&json).map_err(|e| ConfigError::encode(NAME, e))?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn to_json(value: &NestedValue, path: &str) -> Result<Value, ConfigError> {
    Ok(match value {
        NestedValue::Scalar(Scalar::Null) => Value::Null,
        NestedValue::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
        NestedValue::Scalar(Scalar::Integer(i)) => Value::Number(Number::from(*i)),
        NestedValue::Scalar(Scalar::Unsigned(u)) => Value::Number(Number::from(*u)),
        NestedValue::Scalar(Scalar::Float(x)) => {
            Value::Number(Number::from_f64(*x).ok_or_else(|| ConfigError::Unrepresentable {
                format: NAME,
                path: path.to_string(),
                reason: format!("{x} is not a finite number"),
            })?)
        }
        NestedValue::Scalar(Scalar::String(s)) => Value::String(s.clone()),
        NestedValue::Seq(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| to_json(item, &child_path(path, &i.to_string())))
                .collect::<Result<_, _>>()?,
        ),
        NestedValue::Map(map) => {
            let mut object = Map::new();
            for (key, child) in map {
                object.insert(key.clone(), to_json(child, &child_path(path, key))?);
            }
            Value::Object(object)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use crate::format::fixtures::expected_typed;

    const CONFIG: &str = r#"
{
    "database": {
        "user": "dbuser",
        "password": "dbpass",
        "host": "localhost",
        "port": 5432
    },
    "server": {
        "host": "localhost",
        "port": 8080
    }
}
"#;

    #[test]
    fn test_decode_fixture() {
        let doc = decode(CONFIG.as_bytes()).unwrap();
        assert_eq!(flatten(&doc), expected_typed());
    }

    #[test]
    fn test_decode_number_kinds() {
        let doc = decode(br#"{"i": -7, "f": 1.5, "big": 18446744073709551615}"#).unwrap();
        let flat = flatten(&doc);
        assert_eq!(flat["i"], Scalar::Integer(-7));
        assert_eq!(flat["f"], Scalar::Float(1.5));
        assert_eq!(flat["big"], Scalar::Unsigned(u64::MAX));
    }

    #[test]
    fn test_encode_keeps_large_unsigned_exact() {
        let doc = decode(br#"{"max_bytes": 18446744073709551615}"#).unwrap();
        let text = String::from_utf8(encode(&doc).unwrap()).unwrap();
        assert!(text.contains("\"max_bytes\": 18446744073709551615"), "{}", text);
        assert_eq!(decode(text.as_bytes()).unwrap(), doc);
    }

    #[test]
    fn test_decode_rejects_non_object_root() {
        let err = decode(b"[1, 2]").unwrap_err();
        assert!(err.to_string().contains("an array"));
        assert!(matches!(decode(b"{ not json"), Err(ConfigError::Decode { .. })));
    }

    #[test]
    fn test_encode_is_indented_with_trailing_newline() {
        let doc = decode(br#"{"a": {"b": 1}}"#).unwrap();
        let text = String::from_utf8(encode(&doc).unwrap()).unwrap();
        assert_eq!(text, "{\n  \"a\": {\n    \"b\": 1\n  }\n}\n");
    }

    #[test]
    fn test_encode_rejects_nan() {
        let doc = NestedValue::Map(
            [("ratio".to_string(), NestedValue::Scalar(Scalar::Float(f64::NAN)))]
                .into_iter()
                .collect(),
        );
        let err = encode(&doc).unwrap_err();
        assert!(matches!(err, ConfigError::Unrepresentable { ref path, .. } if path == "ratio"));
    }

    #[test]
    fn test_round_trip_preserves_document() {
        let doc = decode(CONFIG.as_bytes()).unwrap();
        assert_eq!(decode(&encode(&doc).unwrap()).unwrap(), doc);
    }
}
