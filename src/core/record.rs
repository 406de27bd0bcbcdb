//! Emitted log record

use super::field::FieldValue;
use super::level::Level;

/// A flat, ordered list of key-value pairs handed to a sink.
///
/// Keys may repeat; readers that need a single value take the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    level: Level,
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            fields: Vec::new(),
        }
    }

    pub fn with_capacity(level: Level, capacity: usize) -> Self {
        Self {
            level,
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.push((key.into(), value.into()));
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    /// Last value written under `key`.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Collapse to a JSON object; a repeated key keeps its last value.
    pub fn to_json_map(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::with_capacity(self.fields.len());
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.to_json_value());
        }
        map
    }
}
