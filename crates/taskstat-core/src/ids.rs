//! Newtype wrapper for job identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a job, shared by every task attempt of that job.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Create a new JobId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = JobId::new("align--alice--240101-000000-00");
        assert_eq!(format!("{}", id), "align--alice--240101-000000-00");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = JobId::from("job-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"job-1\"");
    }
}
