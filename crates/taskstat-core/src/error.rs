//! Core domain errors.

use thiserror::Error;

/// Core domain errors for taskstat.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown task status word.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Malformed label filter.
    #[error("Invalid label '{0}': expected KEY=VALUE")]
    InvalidLabel(String),
}
