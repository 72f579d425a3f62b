//! Error types for providers.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while looking up tasks.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Failed to read provider storage.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A task document could not be normalized.
    #[error("malformed task record {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A job ID that cannot name a directory under the provider root.
    #[error("invalid job id {0:?}")]
    InvalidJobId(String),

    /// The lookup itself failed.
    #[error("lookup failed: {0}")]
    Lookup(String),
}
