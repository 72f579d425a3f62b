//! Error types for taskstat.

use taskstat_core::CoreError;
use taskstat_provider::ProviderError;
use thiserror::Error;

/// Errors raised while encoding a batch.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Top-level errors.
#[derive(Debug, Error)]
pub enum StatError {
    /// Flag validation failed; raised before any provider call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A filter value could not be parsed.
    #[error(transparent)]
    Filter(#[from] CoreError),

    /// Provider lookup failed. Never retried.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
