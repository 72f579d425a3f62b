//! Job-execution providers for taskstat.
//!
//! A provider answers one question: which tasks match a [`TaskQuery`] right
//! now. Transport, auth and retry are the provider's own business; callers
//! treat every lookup as a single call that either succeeds or fails.

pub mod error;
pub mod failing;
pub mod local;
#[cfg(any(test, feature = "test-util"))]
pub mod scripted;

use async_trait::async_trait;
use taskstat_core::{TaskQuery, TaskRecord};

pub use error::ProviderError;
pub use failing::FailingProvider;
pub use local::LocalProvider;
#[cfg(any(test, feature = "test-util"))]
pub use scripted::ScriptedProvider;

/// Source of task records.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short provider name, as accepted by `--provider`.
    fn name(&self) -> &'static str;

    /// Look up the tasks matching `query`, at most `query.max_tasks` of them.
    async fn lookup_job_tasks(&self, query: &TaskQuery) -> Result<Vec<TaskRecord>, ProviderError>;
}
