//! Output formatters for lint diagnostics.

mod text;

pub use text::*;

use crate::linter::LintResult;
use serde::Serialize;

/// Output format for lint results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Rich terminal output with code snippets
    #[default]
    Text,
    /// ESLint-style JSON for tooling integration
    Json,
}

/// Format lint results according to the specified format
///
/// `color` only affects text output.
pub fn format_results(
    results: &[LintResult],
    sources: &[(String, String)],
    format: OutputFormat,
    color: bool,
) -> String {
    match format {
        OutputFormat::Text => format_text(results, sources, color),
        OutputFormat::Json => format_json(results),
    }
}

/// JSON output structure for a single file
#[derive(Debug, Serialize)]
pub struct JsonFileResult<'r> {
    pub file: &'r str,
    pub messages: Vec<JsonMessage<'r>>,
    #[serde(rename = "errorCount")]
    pub error_count: usize,
    #[serde(rename = "warningCount")]
    pub warning_count: usize,
}

/// JSON output structure for a single message
///
/// Lines and columns are 1-based, columns in UTF-16 code units; the end is exclusive.
#[derive(Debug, Serialize)]
pub struct JsonMessage<'r> {
    #[serde(rename = "ruleId")]
    pub rule_id: &'static str,
    #[serde(rename = "messageId", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<&'static str>,
    pub severity: u8,
    pub message: &'r str,
    pub line: u32,
    pub column: u32,
    #[serde(rename = "endLine")]
    pub end_line: u32,
    #[serde(rename = "endColumn")]
    pub end_column: u32,
}

/// Format results as JSON
pub fn format_json(results: &[LintResult]) -> String {
    let json_results: Vec<JsonFileResult<'_>> = results
        .iter()
        .map(|r| JsonFileResult {
            file: &r.filename,
            messages: r
                .diagnostics
                .iter()
                .map(|d| JsonMessage {
                    rule_id: d.rule_name,
                    message_id: d.message_id,
                    severity: d.severity.as_number(),
                    message: &d.message,
                    line: d.start.line,
                    column: d.start.column,
                    end_line: d.end.line,
                    end_column: d.end.column,
                })
                .collect(),
            error_count: r.error_count,
            warning_count: r.warning_count,
        })
        .collect();

    serde_json::to_string_pretty(&json_results).unwrap_or_else(|_| "[]".to_string())
}
