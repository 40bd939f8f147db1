//! Rendering a result for the terminal.

use clap::ValueEnum;
use randkit_core::GenerationResult;
use serde::{Deserialize, Serialize};

/// How a result is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The display rendering only
    #[default]
    Text,
    /// The whole result as one line of JSON
    Json,
    /// The whole result as indented JSON
    Pretty,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Render `result` for stdout.
///
/// Warnings are part of the JSON forms; in text form they are left to the
/// caller (see [`warning_lines`]).
pub fn render(result: &GenerationResult, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(result.formatted.clone()),
        OutputFormat::Json => serde_json::to_string(result),
        OutputFormat::Pretty => serde_json::to_string_pretty(result),
    }
}

pub fn warning_lines(result: &GenerationResult) -> Vec<String> {
    result
        .warnings
        .iter()
        .map(|warning| format!("warning: {warning}"))
        .collect()
}
