//! Rich terminal output using oxc_diagnostics.

use crate::linter::LintResult;
use litmus_carton::FxHashMap;
use oxc_diagnostics::{GraphicalReportHandler, GraphicalTheme, NamedSource};
use std::sync::Arc;

/// Format lint results as rich terminal output
pub fn format_text(results: &[LintResult], sources: &[(String, String)], color: bool) -> String {
    let mut output = String::new();
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme);

    let source_map: FxHashMap<&str, &str> = sources
        .iter()
        .map(|(f, s)| (f.as_str(), s.as_str()))
        .collect();

    for result in results {
        if result.diagnostics.is_empty() {
            continue;
        }

        let source = source_map
            .get(result.filename.as_str())
            .copied()
            .unwrap_or("");
        let named_source = Arc::new(NamedSource::new(&result.filename, source.to_string()));

        for diagnostic in &result.diagnostics {
            let (scope, rule) = diagnostic
                .rule_name
                .split_once('/')
                .unwrap_or(("litmus", diagnostic.rule_name));
            let oxc_diag = diagnostic
                .clone()
                .into_oxc_diagnostic()
                .with_error_code(scope, rule);
            let report = oxc_diag.with_source_code(Arc::clone(&named_source));

            let mut buf = String::new();
            if handler.render_report(&mut buf, report.as_ref()).is_ok() {
                output.push_str(&buf);
                output.push('\n');
            }
        }
    }

    output
}

/// Format a summary line
pub fn format_summary(error_count: usize, warning_count: usize, file_count: usize) -> String {
    let plural = |n: usize| if n == 1 { "" } else { "s" };
    let mut parts = Vec::new();

    if error_count > 0 {
        parts.push(format!("{} error{}", error_count, plural(error_count)));
    }
    if warning_count > 0 {
        parts.push(format!("{} warning{}", warning_count, plural(warning_count)));
    }

    if parts.is_empty() {
        format!("No problems found in {} file{}", file_count, plural(file_count))
    } else {
        format!(
            "{} in {} file{}",
            parts.join(", "),
            file_count,
            plural(file_count)
        )
    }
}
