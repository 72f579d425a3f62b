//! Plain text tables.

use std::collections::BTreeMap;

use taskstat_core::{FieldValue, Row};
use unicode_width::UnicodeWidthStr;

const MAX_STATUS_LENGTH: usize = 30;

const ELLIPSIS: &str = "...";

const COLUMN_SEPARATOR: &str = "  ";

#[derive(Debug, Clone, Copy)]
enum Transform {
    Plain,
    /// Truncated unless full output was requested.
    Status,
    KeyValues,
}

/// Field key, display label and transform, in display order.
const COLUMN_MAP: [(&str, &str, Transform); 13] = [
    ("job-id", "Job ID", Transform::Plain),
    ("job-name", "Job Name", Transform::Plain),
    ("task-id", "Task", Transform::Plain),
    ("status-message", "Status", Transform::Status),
    ("status-detail", "Status-details", Transform::Status),
    ("last-update", "Last Update", Transform::Plain),
    ("create-time", "Created", Transform::Plain),
    ("end-time", "Ended", Transform::Plain),
    ("user-id", "User", Transform::Plain),
    ("internal-id", "Internal ID", Transform::Plain),
    ("logging", "Logging", Transform::Plain),
    ("inputs", "Inputs", Transform::KeyValues),
    ("outputs", "Outputs", Transform::KeyValues),
];

/// Text table output.
#[derive(Debug, Clone)]
pub struct TextOutput {
    full: bool,
}

impl TextOutput {
    pub fn new(full: bool) -> Self {
        Self { full }
    }

    /// Relabel the known fields of `row` in display order.
    ///
    /// Fields without a label are not shown.
    pub fn prepare_output(&self, row: &Row) -> Row {
        let mut display = Row::new();
        for (key, label, transform) in COLUMN_MAP {
            let Some(value) = row.get(key) else {
                continue;
            };

            let text = match transform {
                Transform::Plain => display_value(value),
                Transform::Status => self.format_status(&display_value(value)),
                Transform::KeyValues => match value {
                    FieldValue::Mapping(values) => format_key_values(values),
                    other => display_value(other),
                },
            };
            display.insert(label, text);
        }
        display
    }

    fn format_status(&self, status: &str) -> String {
        if self.full {
            return status.to_string();
        }
        trim_display_field(status, MAX_STATUS_LENGTH)
    }

    /// Render rows as one table, followed by a blank line.
    ///
    /// Headers are the row keys in first-seen order; rows lacking a column
    /// leave it blank.
    pub fn render_table(&self, rows: &[Row]) -> String {
        let mut headers: Vec<&str> = Vec::new();
        for row in rows {
            for key in row.keys() {
                if !headers.contains(&key) {
                    headers.push(key);
                }
            }
        }

        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .map(|header| row.get(header).map(display_value).unwrap_or_default())
                    .map(|cell| cell.replace('\n', " "))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                cells
                    .iter()
                    .map(|line| line[i].width())
                    .chain(std::iter::once(header.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        if !headers.is_empty() {
            push_line(&mut out, headers.iter().copied(), &widths);
            let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            push_line(&mut out, rules.iter().map(String::as_str), &widths);
            for line in &cells {
                push_line(&mut out, line.iter().map(String::as_str), &widths);
            }
        }
        out.push('\n');
        out
    }
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_SEPARATOR);
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Shorten `value` to `max_length` characters, ending in an ellipsis.
fn trim_display_field(value: &str, max_length: usize) -> String {
    if value.chars().count() <= max_length {
        return value.to_string();
    }
    let kept: String = value
        .chars()
        .take(max_length.saturating_sub(ELLIPSIS.len()))
        .collect();
    kept + ELLIPSIS
}

/// `key=value` pairs, sorted by key, comma separated.
fn format_key_values(values: &BTreeMap<String, String>) -> String {
    values
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => String::new(),
        FieldValue::Text(text) => text.clone(),
        FieldValue::Timestamp(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        FieldValue::Mapping(values) => format_key_values(values),
        FieldValue::Json(serde_json::Value::String(text)) => text.clone(),
        FieldValue::Json(serde_json::Value::Null) => String::new(),
        FieldValue::Json(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const LONG_DETAIL: &str = "Error in job align: exit status 137 (out of memory)";

    fn short_row() -> Row {
        Row::new()
            .with("job-name", "align")
            .with("task-id", "2")
            .with(
                "last-update",
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            )
            .with("status-message", "RUNNING")
    }

    #[test]
    fn test_trim_display_field() {
        assert_eq!(trim_display_field("Hi", 30), "Hi");
        assert_eq!(trim_display_field("", 30), "");

        let trimmed = trim_display_field(LONG_DETAIL, 30);
        assert_eq!(trimmed.chars().count(), 30);
        assert_eq!(trimmed, format!("{}...", &LONG_DETAIL[..27]));

        let exact = "x".repeat(30);
        assert_eq!(trim_display_field(&exact, 30), exact);
    }

    #[test]
    fn test_status_detail_truncated_unless_full() {
        let row = Row::new().with("status-detail", LONG_DETAIL);

        let short = TextOutput::new(false).prepare_output(&row);
        assert_eq!(
            short.get("Status-details").and_then(|v| v.as_text()),
            Some("Error in job align: exit st...")
        );

        let full = TextOutput::new(true).prepare_output(&row);
        assert_eq!(
            full.get("Status-details").and_then(|v| v.as_text()),
            Some(LONG_DETAIL)
        );
    }

    #[test]
    fn test_labels_follow_column_map_order() {
        let row = Row::new()
            .with("status-message", "RUNNING")
            .with("job-id", "j1")
            .with("job-name", "align");

        let prepared = TextOutput::new(false).prepare_output(&row);
        assert_eq!(
            prepared.keys().collect::<Vec<_>>(),
            vec!["Job ID", "Job Name", "Status"]
        );
    }

    #[test]
    fn test_key_values_sorted() {
        let mut inputs = BTreeMap::new();
        inputs.insert("zeta".to_string(), "2".to_string());
        inputs.insert("alpha".to_string(), "1".to_string());
        let row = Row::new().with("inputs", inputs).with("outputs", BTreeMap::new());

        let prepared = TextOutput::new(false).prepare_output(&row);
        assert_eq!(
            prepared.get("Inputs").and_then(|v| v.as_text()),
            Some("alpha=1, zeta=2")
        );
        assert_eq!(prepared.get("Outputs").and_then(|v| v.as_text()), Some(""));
    }

    #[test]
    fn test_render_table() {
        let output = TextOutput::new(false);
        let second = Row::new()
            .with("job-name", "qc")
            .with(
                "last-update",
                Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            )
            .with("status-message", "SUCCESS");
        let rows = vec![
            output.prepare_output(&short_row()),
            output.prepare_output(&second),
        ];

        let rendered = output.render_table(&rows);
        let expected = "\
Job Name  Task  Status   Last Update
--------  ----  -------  -------------------
align     2     RUNNING  2024-01-01 00:00:00
qc              SUCCESS  2024-01-02 03:04:05

";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_empty_batch() {
        assert_eq!(TextOutput::new(false).render_table(&[]), "\n");
    }
}
