//! Insertion-ordered rows handed from the projector to the formatters.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::FieldValue;

/// An ordered mapping of column key to value.
///
/// Iteration and serialization follow insertion order; the text table takes
/// its column sequence from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    entries: Vec<(String, FieldValue)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing an existing entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder method to add a value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a row from a provider-native document, keeping its key order.
    ///
    /// Non-object documents become a single `value` entry.
    pub fn from_raw(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Object(map) => Self {
                entries: map
                    .into_iter()
                    .map(|(k, v)| (k, FieldValue::Json(v)))
                    .collect(),
            },
            other => Self::new().with("value", FieldValue::Json(other)),
        }
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut row = Row::new().with("b", "1").with("a", "2");
        row.insert("b", "3");

        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(row.get("b"), Some(&FieldValue::from("3")));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_serialize_in_insertion_order() {
        let row = Row::new().with("zeta", "z").with("alpha", "a");
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"zeta":"z","alpha":"a"}"#);
    }

    #[test]
    fn test_from_raw_non_object() {
        let row = Row::from_raw(serde_json::json!([1, 2]));
        assert!(row.contains_key("value"));
    }
}
