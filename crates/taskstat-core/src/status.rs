//! Task status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Status of one task attempt as reported by a provider.
///
/// Transitions only go forward: `Running` into one of the terminal states,
/// which never revert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task is still executing.
    #[default]
    Running,
    /// Task completed successfully.
    Success,
    /// Task failed.
    Failure,
    /// Task was canceled by user or system.
    Canceled,
}

impl TaskStatus {
    /// All statuses, in the order they are listed to users.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Running,
        TaskStatus::Success,
        TaskStatus::Failure,
        TaskStatus::Canceled,
    ];

    /// Returns true if the task is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failure | Self::Canceled)
    }

    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::InvalidStatus(s.to_string()))
    }
}
