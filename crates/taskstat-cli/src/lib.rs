//! taskstat - poll a job-execution provider and render task status.
//!
//! The binary is a thin wrapper: [`config::Config`] turns flags into a
//! validated query, [`producer::JobProducer`] runs the poll loop, and
//! [`output::OutputFormatter`] renders each batch.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod params;
pub mod producer;

pub use config::{Config, ProviderKind};
pub use error::{OutputError, StatError};
pub use output::{OutputFormat, OutputFormatter};
pub use producer::{JobProducer, ProducerOptions};
