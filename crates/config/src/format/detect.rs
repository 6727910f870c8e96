//! Content sniffing for files whose extension does not name a format.
//!
//! Only used as a fallback: the extension always wins when it is known.
//!
//! Invariants:
//! - Formats are tried in the fixed order JSON, TOML, YAML, INI; the first acceptable parse wins.
//! - YAML and INI accept almost any text, so they only win with a non-empty mapping
//!   (YAML) or at least one parsed key (INI).

use super::{Codec, Format};
use crate::value::NestedValue;

/// Precedence used by [`sniff`].
pub(crate) const SNIFF_ORDER: [Format; 4] = [Format::Json, Format::Toml, Format::Yaml, Format::Ini];

/// Tries each built-in format in turn and returns the first that accepts `bytes`.
pub fn sniff(bytes: &[u8]) -> Option<(Format, NestedValue)> {
    for format in SNIFF_ORDER {
        match format.decode(bytes) {
            Ok(doc) if acceptable(format, &doc) => {
                tracing::debug!(format = %format, "Detected config format from content");
                return Some((format, doc));
            }
            Ok(_) => {
                tracing::debug!(format = %format, "Parsed as empty document, trying next format");
            }
            Err(e) => {
                tracing::debug!(format = %format, error = %e, "Content is not valid for format");
            }
        }
    }
    None
}

fn acceptable(format: Format, doc: &NestedValue) -> bool {
    match format {
        Format::Json | Format::Toml => true,
        Format::Yaml | Format::Ini => doc.as_map().is_some_and(|map| !map.is_empty()),
    }
}
