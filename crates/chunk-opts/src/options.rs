//! Ordered option mappings.

use crate::extract::ExtractError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Literal emitted for a checked tri-state control.
pub const TRUE_LITERAL: &str = "TRUE";
/// Literal emitted for an unchecked tri-state control.
pub const FALSE_LITERAL: &str = "FALSE";

/// An insertion-ordered mapping from option name to raw option value.
///
/// Keys are unique. Overwriting a key keeps its original position; new keys are appended.
///
/// ```rust
/// use chunk_opts::OptionMap;
///
/// let mut options = OptionMap::new();
/// options.insert("fig.width", "6");
/// options.insert("echo", "TRUE");
/// options.insert("fig.width", "7");
///
/// let keys: Vec<&str> = options.keys().collect();
/// assert_eq!(keys, ["fig.width", "echo"]);
/// assert_eq!(options.get("fig.width"), Some("7"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    entries: Vec<(String, String)>,
}

impl OptionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A copy with entries sorted by key.
    pub fn sorted(&self) -> Self {
        let mut entries = self.entries.clone();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        Self { entries }
    }

    /// Build a map from a JSON object such as an extraction service reply.
    ///
    /// Strings are kept verbatim, booleans become `TRUE`/`FALSE`, `null` becomes `NULL`, and
    /// numbers keep their JSON text. Nested arrays/objects are kept as compact JSON.
    pub fn from_json(value: &Value) -> Result<Self, ExtractError> {
        let Value::Object(object) = value else {
            return Err(ExtractError::NotAnObject(json_type_name(value)));
        };

        Ok(object
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Bool(true) => TRUE_LITERAL.to_string(),
                    Value::Bool(false) => FALSE_LITERAL.to_string(),
                    Value::Null => "NULL".to_string(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for OptionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
