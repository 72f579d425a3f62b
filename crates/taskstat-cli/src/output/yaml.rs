//! YAML output.

use taskstat_core::Row;

use crate::OutputError;

/// Block-style YAML output.
///
/// Strings containing a newline are emitted as literal block scalars, so
/// multi-line status details stay readable; everything else uses the
/// default scalar style. The choice lives in the serializer call, not in
/// any process-wide representer registry.
#[derive(Debug, Clone, Default)]
pub struct YamlOutput;

impl YamlOutput {
    pub fn new() -> Self {
        Self
    }

    pub fn render_table(&self, rows: &[Row]) -> Result<String, OutputError> {
        Ok(serde_yaml::to_string(rows)?)
    }
}
