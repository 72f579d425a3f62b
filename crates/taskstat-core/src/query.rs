//! Task selection filters passed to providers.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::{CoreError, TaskRecord, TaskStatus};

/// Either every value, or an explicit list of accepted values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<T> {
    /// Match anything (`*` on the command line).
    Any,
    Only(Vec<T>),
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::Any => true,
            Self::Only(values) => values.contains(value),
        }
    }

    /// Like [`Selector::matches`], for fields a task may lack.
    ///
    /// A missing value only passes an `Any` selector.
    pub fn matches_opt(&self, value: Option<&T>) -> bool {
        match value {
            Some(v) => self.matches(v),
            None => matches!(self, Self::Any),
        }
    }
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self::Any
    }
}

/// A `KEY=VALUE` label every returned task must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub key: String,
    pub value: String,
}

impl Label {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl FromStr for Label {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok(Self::new(key, value)),
            _ => Err(CoreError::InvalidLabel(s.to_string())),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Filters for one provider lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQuery {
    pub statuses: Selector<TaskStatus>,
    pub users: Selector<String>,
    pub job_ids: Selector<String>,
    /// All labels must match.
    pub labels: Vec<Label>,
    /// Only tasks created at or after this instant.
    pub create_time: Option<DateTime<Utc>>,
    /// Upper bound on tasks returned by a single lookup.
    pub max_tasks: Option<usize>,
}

impl TaskQuery {
    /// Whether a task passes every per-task filter.
    ///
    /// `max_tasks` is not a per-task filter and is left to the provider.
    pub fn matches(&self, task: &TaskRecord) -> bool {
        self.statuses.matches_opt(task.status.as_ref())
            && self.users.matches_opt(task.user_id.as_ref())
            && self.job_ids.matches(&task.job_id.to_string())
            && self
                .labels
                .iter()
                .all(|label| task.labels.get(&label.key) == Some(&label.value))
            && self.create_time.map_or(true, |min| task.create_time >= min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task() -> TaskRecord {
        TaskRecord::new("job-1", Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap())
            .with_user("alice")
            .with_status(TaskStatus::Running, "RUNNING")
            .with_label("batch", "7")
    }

    #[test]
    fn test_default_query_matches_everything() {
        assert!(TaskQuery::default().matches(&task()));
    }

    #[test]
    fn test_status_and_user_filters() {
        let query = TaskQuery {
            statuses: Selector::Only(vec![TaskStatus::Success]),
            ..Default::default()
        };
        assert!(!query.matches(&task()));

        let query = TaskQuery {
            users: Selector::Only(vec!["bob".to_string()]),
            ..Default::default()
        };
        assert!(!query.matches(&task()));
    }

    #[test]
    fn test_labels_are_and_matched() {
        let query = TaskQuery {
            labels: vec![Label::new("batch", "7"), Label::new("stage", "qc")],
            ..Default::default()
        };
        assert!(!query.matches(&task()));
        assert!(query.matches(&task().with_label("stage", "qc")));
    }

    #[test]
    fn test_create_time_bound() {
        let query = TaskQuery {
            create_time: Some(Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        assert!(!query.matches(&task()));
    }

    #[test]
    fn test_parse_label() {
        assert_eq!("a=b=c".parse::<Label>().unwrap(), Label::new("a", "b=c"));
        assert_eq!("empty=".parse::<Label>().unwrap(), Label::new("empty", ""));
        assert!("=x".parse::<Label>().is_err());
        assert!("novalue".parse::<Label>().is_err());
    }
}
