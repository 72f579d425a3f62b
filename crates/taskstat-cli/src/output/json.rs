//! JSON output.

use taskstat_core::Row;

use crate::OutputError;

/// Pretty-printed JSON array output, two-space indent.
///
/// Timestamps are written as RFC 3339 strings.
#[derive(Debug, Clone, Default)]
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    pub fn render_table(&self, rows: &[Row]) -> Result<String, OutputError> {
        let mut out = serde_json::to_string_pretty(rows)?;
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;
    use taskstat_core::FieldValue;

    #[test]
    fn test_render_indent_and_timestamps() {
        let row = Row::new()
            .with("job-name", "align")
            .with(
                "create-time",
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            )
            .with("status", FieldValue::Null);

        let rendered = JsonOutput::new().render_table(&[row]).unwrap();
        let expected = r#"[
  {
    "job-name": "align",
    "create-time": "2024-01-01T00:00:00Z",
    "status": null
  }
]
"#;
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_round_trip_reconstructs_pairs() {
        let mut inputs = BTreeMap::new();
        inputs.insert("bam".to_string(), "gs://bucket/a.bam".to_string());
        let row = Row::new()
            .with("job-id", "align--alice--1")
            .with("inputs", inputs)
            .with(
                "last-update",
                Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap(),
            );

        let rendered = JsonOutput::new().render_table(&[row.clone()]).unwrap();
        let parsed: Vec<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed.len(), 1);
        let keys: Vec<&str> = parsed[0].keys().map(String::as_str).collect();
        assert_eq!(keys, row.keys().collect::<Vec<_>>());
        assert_eq!(parsed[0]["job-id"], "align--alice--1");
        assert_eq!(parsed[0]["inputs"]["bam"], "gs://bucket/a.bam");
        assert_eq!(parsed[0]["last-update"], "2024-05-06T07:08:09Z");
    }

    #[test]
    fn test_raw_rows_pass_through() {
        let raw = serde_json::json!({"name": "operations/123", "done": false, "metadata": {"x": 1}});
        let rendered = JsonOutput::new()
            .render_table(&[Row::from_raw(raw.clone())])
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, serde_json::json!([raw]));
    }
}
