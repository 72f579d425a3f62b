//! Provider whose every lookup fails.

use async_trait::async_trait;
use taskstat_core::{TaskQuery, TaskRecord};
use tracing::debug;

use crate::{Provider, ProviderError};

/// Provider that rejects every lookup, for exercising error handling.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingProvider;

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &'static str {
        "test-fails"
    }

    async fn lookup_job_tasks(&self, query: &TaskQuery) -> Result<Vec<TaskRecord>, ProviderError> {
        debug!(?query, "Failing lookup on purpose");
        Err(ProviderError::Lookup(
            "test-fails provider never returns tasks".to_string(),
        ))
    }
}
