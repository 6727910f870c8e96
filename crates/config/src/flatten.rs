//! Conversion between nested documents and the flat dotted-key view.
//!
//! Responsibilities:
//! - Flatten a `NestedValue` into a `FlatMap` keyed by dot-joined path segments.
//! - Rebuild a `NestedValue` from a `FlatMap`, rejecting keys that disagree about
//!   whether a path is a value or a section.
//!
//! Does NOT handle:
//! - Locking or ownership of the flat view (see `store.rs`).
//! - Any file format (see `format/`).
//!
//! Invariants:
//! - Sequence elements are addressed by their zero-based index as a path segment.
//! - Empty maps and sequences produce no keys; `flatten_strict` reports them instead.
//! - `unflatten` always returns a map at the root.
//! - A map whose keys are exactly `0..n` (canonical decimal, no leading zeros) is
//!   rebuilt as a sequence, so sequences survive a flatten/unflatten round trip.
//! - Map keys containing `.` cannot be told apart from nesting; this is accepted.

use crate::error::ConfigError;
use crate::value::{FlatMap, NestedMap, NestedValue, Scalar};

/// Path separator for flat keys.
pub const SEPARATOR: char = '.';

/// Flattens a document into dotted keys, silently dropping empty containers.
pub fn flatten(root: &NestedValue) -> FlatMap {
    let mut out = FlatMap::new();
    let mut dropped = Vec::new();
    flatten_into(root, "", &mut out, &mut dropped);
    if !dropped.is_empty() {
        tracing::debug!(
            count = dropped.len(),
            paths = ?dropped,
            "Dropped empty containers while flattening"
        );
    }
    out
}

/// Flattens a document, failing if any part of it would not survive the round trip.
///
/// # Errors
/// Returns `ConfigError::LossyRoundTrip` naming the first empty map or sequence
/// below the root, or the root itself when it is a bare scalar.
pub fn flatten_strict(root: &NestedValue) -> Result<FlatMap, ConfigError> {
    if root.is_scalar() {
        return Err(ConfigError::LossyRoundTrip {
            path: String::new(),
        });
    }
    let mut out = FlatMap::new();
    let mut dropped = Vec::new();
    flatten_into(root, "", &mut out, &mut dropped);
    match dropped.into_iter().next() {
        Some(path) => Err(ConfigError::LossyRoundTrip { path }),
        None => Ok(out),
    }
}

fn flatten_into(node: &NestedValue, prefix: &str, out: &mut FlatMap, dropped: &mut Vec<String>) {
    match node {
        NestedValue::Map(map) => {
            if map.is_empty() && !prefix.is_empty() {
                dropped.push(prefix.to_string());
            }
            for (key, child) in map {
                flatten_into(child, &join(prefix, key), out, dropped);
            }
        }
        NestedValue::Seq(items) => {
            if items.is_empty() && !prefix.is_empty() {
                dropped.push(prefix.to_string());
            }
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, &join(prefix, &index.to_string()), out, dropped);
            }
        }
        NestedValue::Scalar(value) => {
            if !prefix.is_empty() {
                out.insert(prefix.to_string(), value.clone());
            }
        }
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        let mut path = String::with_capacity(prefix.len() + 1 + segment.len());
        path.push_str(prefix);
        path.push(SEPARATOR);
        path.push_str(segment);
        path
    }
}

/// Rebuilds a nested document from dotted keys.
///
/// # Errors
/// - `ConfigError::EmptySegment` if a key is empty or has an empty segment (`a..b`, `.a`).
/// - `ConfigError::PathConflict` if one key is a strict prefix of another (`a` and `a.b`).
pub fn unflatten(flat: &FlatMap) -> Result<NestedValue, ConfigError> {
    let mut root = NestedMap::new();
    for (key, value) in flat {
        insert_path(&mut root, key, value)?;
    }

    let root = root
        .into_iter()
        .map(|(key, child)| (key, rebuild_sequences(child)))
        .collect();
    Ok(NestedValue::Map(root))
}

fn insert_path(root: &mut NestedMap, key: &str, value: &Scalar) -> Result<(), ConfigError> {
    let segments: Vec<&str> = key.split(SEPARATOR).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(ConfigError::EmptySegment {
            key: key.to_string(),
        });
    }
    let Some((last, parents)) = segments.split_last() else {
        return Err(ConfigError::EmptySegment {
            key: key.to_string(),
        });
    };

    let mut node = root;
    for (depth, segment) in parents.iter().enumerate() {
        node = match node
            .entry((*segment).to_string())
            .or_insert_with(NestedValue::empty_map)
        {
            NestedValue::Map(children) => children,
            _ => {
                return Err(ConfigError::PathConflict {
                    key: key.to_string(),
                    prefix: segments[..=depth].join("."),
                });
            }
        };
    }

    if matches!(node.get(*last), Some(NestedValue::Map(_))) {
        return Err(ConfigError::PathConflict {
            key: key.to_string(),
            prefix: key.to_string(),
        });
    }
    node.insert((*last).to_string(), NestedValue::Scalar(value.clone()));
    Ok(())
}

fn rebuild_sequences(node: NestedValue) -> NestedValue {
    let NestedValue::Map(map) = node else {
        return node;
    };
    let map: NestedMap = map
        .into_iter()
        .map(|(key, child)| (key, rebuild_sequences(child)))
        .collect();

    let len = map.len();
    let indices: Option<Vec<usize>> = map
        .keys()
        .map(|key| canonical_index(key).filter(|&i| i < len))
        .collect();
    let Some(indices) = indices else {
        return NestedValue::Map(map);
    };
    if len == 0 {
        return NestedValue::Map(map);
    }

    let mut items: Vec<(usize, NestedValue)> = indices.into_iter().zip(map.into_values()).collect();
    items.sort_by_key(|(index, _)| *index);
    NestedValue::Seq(items.into_iter().map(|(_, child)| child).collect())
}

/// Parses a segment written the way `flatten` writes sequence indices.
fn canonical_index(segment: &str) -> Option<usize> {
    let bytes = segment.as_bytes();
    let canonical = match bytes {
        [b'0'] => true,
        [first, rest @ ..] => {
            (b'1'..=b'9').contains(first) && rest.iter().all(|b| b.is_ascii_digit())
        }
        [] => false,
    };
    if canonical { segment.parse().ok() } else { None }
}
