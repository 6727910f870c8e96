//! Value model shared by the flattener, the store and the format backends.
//!
//! Responsibilities:
//! - Define `Scalar`, the only kind of value the flat view ever holds.
//! - Define `NestedValue`, the self-describing document tree every codec produces and consumes.
//! - Define `FlatMap`, the dotted-path view held by the store.
//!
//! Does NOT handle:
//! - Converting between the nested and the flat shapes (see `flatten.rs`).
//! - Parsing or printing any file format (see `format/`).
//!
//! Invariants:
//! - `FlatMap` keys are sorted, so every listing and every encoder sees a deterministic order.
//! - `Scalar::Float` may hold non-finite values; encoders that cannot represent them reject them.
//! - `Scalar::Unsigned` only holds values above `i64::MAX`; smaller whole numbers are `Integer`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Flat view of a configuration document: dotted path to scalar.
pub type FlatMap = BTreeMap<String, Scalar>;

/// Children of a mapping node.
pub type NestedMap = BTreeMap<String, NestedValue>;

/// A leaf configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    /// Whole number too large for `Integer`.
    Unsigned(u64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Parses a command-line literal into the narrowest matching scalar.
    ///
    /// `true`/`false`, `null`, integers and floats are recognised; anything else
    /// is kept as a string.
    pub fn infer(raw: &str) -> Self {
        match raw {
            "true" => return Scalar::Bool(true),
            "false" => return Scalar::Bool(false),
            "null" => return Scalar::Null,
            _ => {}
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Scalar::Integer(i);
        }
        if let Ok(u) = raw.parse::<u64>() {
            return Scalar::Unsigned(u);
        }
        if let Ok(f) = raw.parse::<f64>()
            && f.is_finite()
        {
            return Scalar::Float(f);
        }
        Scalar::String(raw.to_string())
    }

    /// Short type label used in listings and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Integer(_) | Scalar::Unsigned(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::String(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders the value the way INI files and environment variables spell it.
///
/// Null renders as the empty string.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Unsigned(u) => write!(f, "{}", u),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Integer(i) => serializer.serialize_i64(*i),
            Scalar::Unsigned(u) => serializer.serialize_u64(*u),
            Scalar::Float(x) => serializer.serialize_f64(*x),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(i64::from(value))
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Scalar::Integer(i),
            Err(_) => Scalar::Unsigned(value),
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

/// A parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum NestedValue {
    Scalar(Scalar),
    Map(NestedMap),
    Seq(Vec<NestedValue>),
}

impl NestedValue {
    /// An empty mapping, the shape of an empty document.
    pub fn empty_map() -> Self {
        NestedValue::Map(NestedMap::new())
    }

    pub fn as_map(&self) -> Option<&NestedMap> {
        match self {
            NestedValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, NestedValue::Scalar(_))
    }

    /// Looks up a dotted path, descending through maps and sequence indices.
    pub fn lookup(&self, path: &str) -> Option<&NestedValue> {
        path.split('.').try_fold(self, |node, segment| match node {
            NestedValue::Map(map) => map.get(segment),
            NestedValue::Seq(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            NestedValue::Scalar(_) => None,
        })
    }
}

impl From<Scalar> for NestedValue {
    fn from(value: Scalar) -> Self {
        NestedValue::Scalar(value)
    }
}

impl From<NestedMap> for NestedValue {
    fn from(value: NestedMap) -> Self {
        NestedValue::Map(value)
    }
}

impl From<Vec<NestedValue>> for NestedValue {
    fn from(value: Vec<NestedValue>) -> Self {
        NestedValue::Seq(value)
    }
}
