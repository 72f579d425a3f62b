//! taskstat Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Providers or their transports
//! - Output encodings
//! - Runtime specifics
//!
//! Everything a poll cycle needs to normalize provider tasks lives here:
//! the task record, the field model, query filters and the field projector.

pub mod error;
pub mod field;
pub mod ids;
pub mod projection;
pub mod query;
pub mod row;
pub mod status;
pub mod task;

// Re-export commonly used types
pub use error::CoreError;
pub use field::{Field, FieldValue};
pub use ids::JobId;
pub use projection::prepare_row;
pub use query::{Label, Selector, TaskQuery};
pub use row::Row;
pub use status::TaskStatus;
pub use task::TaskRecord;
