//! Field projection: which fields of a task a row shows.
//!
//! Two fixed column sets share a common prefix. The short set is meant for
//! a narrow table; the full set carries every normalized field.

use std::collections::BTreeMap;

use crate::{Field, FieldValue, Row, TaskRecord};

/// Value used when a task lacks a non-optional column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldDefault {
    Null,
    Text(&'static str),
    EmptyMapping,
}

impl FieldDefault {
    fn resolve(self) -> FieldValue {
        match self {
            Self::Null => FieldValue::Null,
            Self::Text(s) => FieldValue::Text(s.to_string()),
            Self::EmptyMapping => FieldValue::Mapping(BTreeMap::new()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Column {
    field: Field,
    /// Omit the column when its value is empty, zero or absent.
    optional: bool,
    default: FieldDefault,
}

const fn col(field: Field) -> Column {
    Column {
        field,
        optional: false,
        default: FieldDefault::Null,
    }
}

const fn optional(field: Field) -> Column {
    Column {
        field,
        optional: true,
        default: FieldDefault::Null,
    }
}

const fn with_default(field: Field, default: FieldDefault) -> Column {
    Column {
        field,
        optional: false,
        default,
    }
}

// Job ID stays out of the short set: it is long and would crowd the status
// and update columns.
const DEFAULT_COLUMNS: [Column; 3] = [
    col(Field::JobName),
    optional(Field::TaskId),
    col(Field::LastUpdate),
];

const SHORT_COLUMNS: [Column; 1] = [col(Field::StatusMessage)];

const FULL_COLUMNS: [Column; 12] = [
    col(Field::JobId),
    col(Field::UserId),
    col(Field::Status),
    col(Field::StatusDetail),
    col(Field::CreateTime),
    with_default(Field::EndTime, FieldDefault::Text("NA")),
    col(Field::InternalId),
    col(Field::Logging),
    with_default(Field::Inputs, FieldDefault::EmptyMapping),
    with_default(Field::Outputs, FieldDefault::EmptyMapping),
    with_default(Field::Envs, FieldDefault::EmptyMapping),
    with_default(Field::Labels, FieldDefault::EmptyMapping),
];

/// Project a task onto the short or full column set.
///
/// Keys appear in column-set order regardless of how the provider ordered
/// them.
pub fn prepare_row(task: &TaskRecord, full: bool) -> Row {
    let extra: &[Column] = if full { &FULL_COLUMNS } else { &SHORT_COLUMNS };

    let mut row = Row::new();
    for column in DEFAULT_COLUMNS.iter().chain(extra) {
        let value = task
            .get_field(column.field)
            .unwrap_or_else(|| column.default.resolve());

        if !column.optional || value.is_truthy() {
            row.insert(column.field.key(), value);
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskStatus;
    use chrono::{TimeZone, Utc};

    fn ts() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_short_projection_scenario() {
        let task = TaskRecord::new("align--alice--1", ts())
            .with_job_name("align")
            .with_task_id("2")
            .with_last_update(ts())
            .with_status(TaskStatus::Running, "RUNNING");

        let row = prepare_row(&task, false);

        let expected = Row::new()
            .with("job-name", "align")
            .with("task-id", "2")
            .with("last-update", ts())
            .with("status-message", "RUNNING");
        assert_eq!(row, expected);
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"job-name":"align","task-id":"2","last-update":"2024-01-01T00:00:00Z","status-message":"RUNNING"}"#
        );
    }

    #[test]
    fn test_optional_task_id_omitted_when_absent_or_empty() {
        let task = TaskRecord::new("j", ts()).with_job_name("single");
        assert!(!prepare_row(&task, false).contains_key("task-id"));

        let task = task.with_task_id("");
        assert!(!prepare_row(&task, true).contains_key("task-id"));
    }

    #[test]
    fn test_missing_required_fields_use_defaults() {
        let task = TaskRecord::new("j", ts());
        let row = prepare_row(&task, true);

        assert_eq!(row.get("job-name"), Some(&FieldValue::Null));
        assert_eq!(row.get("last-update"), Some(&FieldValue::Null));
        assert_eq!(row.get("end-time"), Some(&FieldValue::from("NA")));
        assert_eq!(
            row.get("inputs"),
            Some(&FieldValue::Mapping(BTreeMap::new()))
        );
        assert_eq!(row.get("status"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_full_column_order() {
        let task = TaskRecord::new("j", ts()).with_task_id("1");
        let row = prepare_row(&task, true);

        let keys: Vec<&str> = row.keys().collect();
        assert_eq!(
            keys,
            vec![
                "job-name",
                "task-id",
                "last-update",
                "job-id",
                "user-id",
                "status",
                "status-detail",
                "create-time",
                "end-time",
                "internal-id",
                "logging",
                "inputs",
                "outputs",
                "envs",
                "labels",
            ]
        );
    }

    #[test]
    fn test_projection_is_idempotent() {
        let task = TaskRecord::new("j", ts())
            .with_job_name("align")
            .with_input("bam", "gs://bucket/a.bam")
            .with_end_time(ts());

        let first = prepare_row(&task, true);
        let second = prepare_row(&task, true);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
