//! Named endpoint-color presets loaded from JSON.
//!
//! Two layouts are accepted:
//!
//! ```json
//! { "Kushan": { "primary": "#aa2200", "secondary": "#ffcc00" } }
//! ```
//!
//! ```json
//! [ { "faction": "Kushan", "primary": "#aa2200", "secondary": "#ffcc00" } ]
//! ```
//!
//! Entries whose colors cannot be parsed are dropped; a file with no usable
//! entry is an error.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{TeamColorError, TeamColorResult};

/// File names tried, in order, when no explicit preset file is given.
pub const DEFAULT_PRESET_FILES: [&str; 2] = [
    "faction_color_presets_named.json",
    "faction_color_presets.json",
];

const NAME_KEYS: [&str; 3] = ["faction", "name", "key"];
const PRIMARY_KEYS: [&str; 3] = ["primary", "primary_hex", "p"];
const SECONDARY_KEYS: [&str; 3] = ["secondary", "secondary_hex", "s"];

/// Primary/secondary endpoint colors of one preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PresetPair {
    pub primary: Rgb8,
    pub secondary: Rgb8,
}

/// Ordered name → color pair lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PresetBook {
    entries: Vec<(String, PresetPair)>,
    source: Option<PathBuf>,
}

impl PresetBook {
    pub fn from_json_str(s: &str) -> TeamColorResult<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Map(serde_json::Map<String, Value>),
            List(Vec<Value>),
        }

        let repr: Repr = serde_json::from_str(s).map_err(|e| TeamColorError::serde(e.to_string()))?;
        let mut book = Self::default();
        match repr {
            Repr::Map(map) => {
                for (name, v) in map {
                    if let Some(obj) = v.as_object() {
                        book.push_entry(name, obj);
                    }
                }
            }
            Repr::List(items) => {
                for item in items {
                    let Some(obj) = item.as_object() else {
                        continue;
                    };
                    if let Some(name) = first_str(obj, &NAME_KEYS).filter(|n| !n.is_empty()) {
                        book.push_entry(name.to_owned(), obj);
                    }
                }
            }
        }

        if book.entries.is_empty() {
            return Err(TeamColorError::validation(
                "preset file contains no recognizable color pairs",
            ));
        }
        Ok(book)
    }

    pub fn from_path(path: &Path) -> TeamColorResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read presets '{}'", path.display()))?;
        let mut book = Self::from_json_str(&text)?;
        book.source = Some(path.to_path_buf());
        Ok(book)
    }

    /// Load the first usable preset file: `explicit` first, then
    /// [`DEFAULT_PRESET_FILES`] under `dir`.
    ///
    /// Files that parse but hold no pairs are skipped with a warning; a file
    /// that exists but is malformed stops the search with its error.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> TeamColorResult<Option<Self>> {
        let candidates = explicit
            .map(Path::to_path_buf)
            .into_iter()
            .chain(DEFAULT_PRESET_FILES.iter().map(|f| dir.join(f)));

        for path in candidates {
            if !path.is_file() {
                continue;
            }
            match Self::from_path(&path) {
                Ok(book) => {
                    tracing::debug!(path = %path.display(), count = book.len(), "presets loaded");
                    return Ok(Some(book));
                }
                Err(TeamColorError::Validation(msg)) => {
                    tracing::warn!(path = %path.display(), "{msg}");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File the book was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn resolve(&self, name: &str) -> Option<PresetPair> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, pair)| *pair)
    }

    /// Names containing `query`, case-insensitively, in book order.
    pub fn filter<'a>(&'a self, query: &str) -> Vec<&'a str> {
        let query = query.to_lowercase();
        self.names()
            .filter(|n| n.to_lowercase().contains(&query))
            .collect()
    }

    fn push_entry(&mut self, name: String, obj: &serde_json::Map<String, Value>) {
        let primary = normalize_hex(first_str(obj, &PRIMARY_KEYS).unwrap_or(""));
        let secondary = normalize_hex(first_str(obj, &SECONDARY_KEYS).unwrap_or(""));
        match (Rgb8::from_hex(&primary), Rgb8::from_hex(&secondary)) {
            (Ok(primary), Ok(secondary)) => {
                let pair = PresetPair { primary, secondary };
                // Later duplicates replace earlier ones in place.
                if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
                    slot.1 = pair;
                } else {
                    self.entries.push((name, pair));
                }
            }
            _ => tracing::debug!(%name, %primary, %secondary, "skipping preset with invalid color"),
        }
    }
}

/// Canonical `#rrggbb` spelling: trimmed, `#`-prefixed, short form expanded,
/// lower-cased. Empty input becomes `#000000`.
pub fn normalize_hex(h: &str) -> String {
    let h = h.trim();
    if h.is_empty() {
        return "#000000".to_owned();
    }
    let h = h.strip_prefix('#').unwrap_or(h);
    let body: String = if h.len() == 3 {
        h.chars().flat_map(|c| [c, c]).collect()
    } else {
        h.to_owned()
    };
    format!("#{}", body.to_lowercase())
}

fn first_str<'a>(obj: &'a serde_json::Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/presets.rs"]
mod tests;
