//! Normalized task records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Field, FieldValue, JobId, TaskStatus};

/// One execution attempt of one task within a job.
///
/// Records are built fresh on every poll cycle and never mutated once handed
/// to the projector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TaskRecord {
    /// Job this task belongs to.
    pub job_id: JobId,

    /// User-supplied short label for the job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,

    /// Sibling index within an array job; absent for single-task jobs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// Submitting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    /// Short human-readable status summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,

    /// Extended diagnostic text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_detail: Option<String>,

    pub create_time: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,

    /// Absent while the task is still running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    /// Provider-specific low-level identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<String>,

    /// Location of the task logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<String>,

    #[serde(default)]
    pub inputs: BTreeMap<String, String>,

    #[serde(default)]
    pub outputs: BTreeMap<String, String>,

    #[serde(default)]
    pub envs: BTreeMap<String, String>,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    /// Provider-native document this record was normalized from.
    #[serde(skip)]
    raw: serde_json::Value,
}

impl TaskRecord {
    /// Create a new TaskRecord with only the always-present fields set.
    pub fn new(job_id: impl Into<JobId>, create_time: DateTime<Utc>) -> Self {
        Self {
            job_id: job_id.into(),
            job_name: None,
            task_id: None,
            user_id: None,
            status: None,
            status_message: None,
            status_detail: None,
            create_time,
            last_update: None,
            end_time: None,
            internal_id: None,
            logging: None,
            inputs: BTreeMap::new(),
            outputs: BTreeMap::new(),
            envs: BTreeMap::new(),
            labels: BTreeMap::new(),
            raw: serde_json::Value::Null,
        }
    }

    /// Normalize a provider document written in the kebab-case schema.
    ///
    /// The document itself is kept as the record's raw data.
    pub fn from_document(document: serde_json::Value) -> Result<Self, serde_json::Error> {
        let mut record: TaskRecord = serde_json::from_value(document.clone())?;
        record.raw = document;
        Ok(record)
    }

    /// Builder method to set the job name.
    pub fn with_job_name(mut self, name: impl Into<String>) -> Self {
        self.job_name = Some(name.into());
        self
    }

    /// Builder method to set the task id.
    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// Builder method to set the submitting user.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Builder method to set the status and its summary message.
    pub fn with_status(mut self, status: TaskStatus, message: impl Into<String>) -> Self {
        self.status = Some(status);
        self.status_message = Some(message.into());
        self
    }

    /// Builder method to set the status detail.
    pub fn with_status_detail(mut self, detail: impl Into<String>) -> Self {
        self.status_detail = Some(detail.into());
        self
    }

    /// Builder method to set the last update time.
    pub fn with_last_update(mut self, ts: DateTime<Utc>) -> Self {
        self.last_update = Some(ts);
        self
    }

    /// Builder method to set the end time.
    pub fn with_end_time(mut self, ts: DateTime<Utc>) -> Self {
        self.end_time = Some(ts);
        self
    }

    /// Builder method to add a label.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Builder method to add an input parameter.
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(key.into(), value.into());
        self
    }

    /// Builder method to set the raw provider document.
    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = raw;
        self
    }

    /// Check if the task is still running.
    pub fn is_running(&self) -> bool {
        self.status == Some(TaskStatus::Running)
    }

    /// Provider-native view of the task, unnormalized.
    ///
    /// Falls back to the normalized schema when the provider kept no document.
    pub fn raw_task_data(&self) -> serde_json::Value {
        if self.raw.is_null() {
            serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
        } else {
            self.raw.clone()
        }
    }

    /// Look up a normalized field; `None` when the task lacks it.
    pub fn get_field(&self, field: Field) -> Option<FieldValue> {
        let text = |value: &Option<String>| value.clone().map(FieldValue::Text);
        let mapping = |value: &BTreeMap<String, String>| Some(FieldValue::Mapping(value.clone()));

        match field {
            Field::JobId => Some(FieldValue::Text(self.job_id.to_string())),
            Field::JobName => text(&self.job_name),
            Field::TaskId => text(&self.task_id),
            Field::UserId => text(&self.user_id),
            Field::Status => self.status.map(|s| FieldValue::Text(s.to_string())),
            Field::StatusMessage => text(&self.status_message),
            Field::StatusDetail => text(&self.status_detail),
            Field::CreateTime => Some(FieldValue::Timestamp(self.create_time)),
            Field::LastUpdate => self.last_update.map(FieldValue::Timestamp),
            Field::EndTime => self.end_time.map(FieldValue::Timestamp),
            Field::InternalId => text(&self.internal_id),
            Field::Logging => text(&self.logging),
            Field::Inputs => mapping(&self.inputs),
            Field::Outputs => mapping(&self.outputs),
            Field::Envs => mapping(&self.envs),
            Field::Labels => mapping(&self.labels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_from_document_keeps_raw() {
        let doc = json!({
            "job-id": "align--alice--1",
            "job-name": "align",
            "task-id": "3",
            "status": "FAILURE",
            "create-time": "2024-01-01T00:00:00Z",
            "labels": {"batch": "7"},
            "provider-extra": 42
        });

        let task = TaskRecord::from_document(doc.clone()).unwrap();

        assert_eq!(task.job_id.as_str(), "align--alice--1");
        assert_eq!(task.status, Some(TaskStatus::Failure));
        assert_eq!(task.labels.get("batch").map(String::as_str), Some("7"));
        assert!(task.inputs.is_empty());
        assert_eq!(task.raw_task_data(), doc);
    }

    #[test]
    fn test_from_document_requires_create_time() {
        let doc = json!({"job-id": "j"});
        assert!(TaskRecord::from_document(doc).is_err());
    }

    #[test]
    fn test_get_field_absent() {
        let task = TaskRecord::new("j", Utc.timestamp_opt(0, 0).unwrap());
        assert_eq!(task.get_field(Field::JobName), None);
        assert_eq!(task.get_field(Field::EndTime), None);
        assert_eq!(
            task.get_field(Field::Envs),
            Some(FieldValue::Mapping(BTreeMap::new()))
        );
    }

    #[test]
    fn test_raw_falls_back_to_schema() {
        let task = TaskRecord::new("j", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
            .with_status(TaskStatus::Running, "RUNNING");
        let raw = task.raw_task_data();
        assert_eq!(raw["job-id"], json!("j"));
        assert_eq!(raw["status"], json!("RUNNING"));
    }
}
