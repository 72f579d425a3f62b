//! Output formatters.
//!
//! The format set is closed: text tables, YAML and JSON. Each formatter
//! prepares rows for display and renders one batch at a time.

mod json;
mod text;
mod yaml;

use clap::ValueEnum;
use taskstat_core::Row;

use crate::OutputError;

pub use json::JsonOutput;
pub use text::TextOutput;
pub use yaml::YamlOutput;

/// Formats selectable with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
    /// JSON of the provider-native task data, unnormalized.
    ProviderJson,
}

impl OutputFormat {
    /// Whether rows bypass field projection.
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::ProviderJson)
    }
}

/// A renderer for batches of rows.
#[derive(Debug, Clone)]
pub enum OutputFormatter {
    Text(TextOutput),
    Yaml(YamlOutput),
    Json(JsonOutput),
}

impl OutputFormatter {
    /// Build the formatter for `format`; `full` disables text truncation.
    pub fn new(format: OutputFormat, full: bool) -> Self {
        match format {
            OutputFormat::Text => Self::Text(TextOutput::new(full)),
            OutputFormat::Yaml => Self::Yaml(YamlOutput::new()),
            OutputFormat::Json | OutputFormat::ProviderJson => Self::Json(JsonOutput::new()),
        }
    }

    /// Turn a projected row into its display form.
    pub fn prepare_output(&self, row: Row) -> Row {
        match self {
            Self::Text(text) => text.prepare_output(&row),
            Self::Yaml(_) | Self::Json(_) => row,
        }
    }

    /// Render one batch as a single block, trailing newline included.
    pub fn render_table(&self, rows: &[Row]) -> Result<String, OutputError> {
        match self {
            Self::Text(text) => Ok(text.render_table(rows)),
            Self::Yaml(yaml) => yaml.render_table(rows),
            Self::Json(json) => json.render_table(rows),
        }
    }
}
