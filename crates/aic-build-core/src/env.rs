//! Ordered environment records and their two serialization forms.

use serde_json::{Map, Value};

/// Ordered mapping of environment keys to scalar values.
///
/// Backed by `serde_json::Map` with the `preserve_order` feature, so keys
/// keep the order they first appeared in the template document. Merging an
/// overlay overwrites values in place without moving the key.
#[derive(Debug, Clone, Default)]
pub struct EnvRecord {
    entries: Map<String, Value>,
}

impl EnvRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record seeded from a defaults mapping.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            entries: map.clone(),
        }
    }

    /// Merge an overlay on top of this record; overlay values win on conflict.
    pub fn merge(&mut self, overlay: &Map<String, Value>) {
        for (key, value) in overlay {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Set a single key.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.entries.insert(key.to_string(), value.into());
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Line-oriented `KEY=VALUE` form.
    ///
    /// Booleans serialize as the JSON literals `true`/`false`; strings as
    /// their raw text (no quotes); anything else as its JSON text.
    pub fn to_dotenv(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(&scalar_text(value));
            out.push('\n');
        }
        out
    }

    /// Indented JSON form.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
