//! Normalized task fields and their values.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A normalized field of a task record.
///
/// The key strings are the stable schema every provider is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    JobId,
    JobName,
    TaskId,
    UserId,
    Status,
    StatusMessage,
    StatusDetail,
    CreateTime,
    LastUpdate,
    EndTime,
    InternalId,
    Logging,
    Inputs,
    Outputs,
    Envs,
    Labels,
}

impl Field {
    /// Schema key of the field.
    pub fn key(&self) -> &'static str {
        match self {
            Self::JobId => "job-id",
            Self::JobName => "job-name",
            Self::TaskId => "task-id",
            Self::UserId => "user-id",
            Self::Status => "status",
            Self::StatusMessage => "status-message",
            Self::StatusDetail => "status-detail",
            Self::CreateTime => "create-time",
            Self::LastUpdate => "last-update",
            Self::EndTime => "end-time",
            Self::InternalId => "internal-id",
            Self::Logging => "logging",
            Self::Inputs => "inputs",
            Self::Outputs => "outputs",
            Self::Envs => "envs",
            Self::Labels => "labels",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Value of a single field in a row.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Field has no value and its column declares no default.
    Null,
    Text(String),
    Timestamp(DateTime<Utc>),
    Mapping(BTreeMap<String, String>),
    /// Provider-native value, only produced by raw rows.
    Json(serde_json::Value),
}

impl FieldValue {
    /// Whether an optional column holding this value is shown.
    ///
    /// Absent, empty and zero values all count as false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Text(s) => !s.is_empty(),
            Self::Timestamp(_) => true,
            Self::Mapping(m) => !m.is_empty(),
            Self::Json(v) => json_truthy(v),
        }
    }

    /// Returns the text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Timestamp rendering shared by the structured encodings.
    pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

fn json_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Timestamp(ts) => serializer.serialize_str(&Self::format_timestamp(ts)),
            Self::Mapping(m) => m.serialize(serializer),
            Self::Json(v) => v.serialize(serializer),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<BTreeMap<String, String>> for FieldValue {
    fn from(m: BTreeMap<String, String>) -> Self {
        Self::Mapping(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!FieldValue::Null.is_truthy());
        assert!(!FieldValue::from("").is_truthy());
        assert!(FieldValue::from("2").is_truthy());
        assert!(!FieldValue::Mapping(BTreeMap::new()).is_truthy());
        assert!(!FieldValue::Json(json!(0)).is_truthy());
        assert!(!FieldValue::Json(json!({})).is_truthy());
        assert!(FieldValue::Json(json!(3)).is_truthy());
        assert!(FieldValue::Timestamp(Utc.timestamp_opt(0, 0).unwrap()).is_truthy());
    }

    #[test]
    fn test_timestamp_serializes_as_string() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let value = serde_json::to_value(FieldValue::from(ts)).unwrap();
        assert_eq!(value, json!("2024-01-01T00:00:00Z"));
    }
}
