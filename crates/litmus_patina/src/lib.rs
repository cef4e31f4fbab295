//! # litmus_patina
//!
//! Patina - The quality checker for litmus.
//! Linter for HTML markup in `html` tagged template literals.
//!
//! ## Name Origin
//!
//! **Patina** (/ˈpætɪnə/) refers to the layer that forms on copper and
//! bronze over time, valued as a sign of authenticity. `litmus_patina`
//! examines the markup living inside JavaScript to show whether it is
//! the real thing.
//!
//! ## Features
//!
//! - Rich diagnostic output with code snippets and suggestions (like oxlint)
//! - eslint-plugin-lit compatible rules
//! - Inline suppression with `litmus-disable` comments
//!
//! ## Usage
//!
//! ```rust
//! use litmus_patina::{format_results, Linter, OutputFormat};
//!
//! let source = r#"const view = html`<a title="1 > 0">link</a>`;"#;
//! let result = Linter::new().lint_source(source, "view.js");
//! assert!(result.has_errors());
//!
//! let sources = [("view.js".to_string(), source.to_string())];
//! let output = format_results(&[result], &sources, OutputFormat::Json, false);
//! assert!(output.contains("lit/attribute-value-entities"));
//! ```
//!
//! ## Rules
//!
//! - `lit/attribute-value-entities` - Disallow unencoded HTML entities in attribute values

mod context;
mod diagnostic;
pub mod disable;
mod linter;
pub mod output;
mod rule;
pub mod rules;
pub mod script;
mod visitor;

pub use context::LintContext;
pub use diagnostic::{LintDiagnostic, LintSummary, Severity};
pub use linter::{LintResult, Linter};
pub use litmus_carton::i18n::Locale;
pub use output::{format_results, format_summary, OutputFormat};
pub use rule::{Rule, RuleCategory, RuleMeta, RuleRegistry};

/// Lint a script source with default rules
///
/// This is a convenience function for simple use cases.
/// For more control, use `Linter::new()` directly.
pub fn lint(source: &str, filename: &str) -> LintResult {
    Linter::new().lint_source(source, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_function() {
        let result = lint(r#"html`<x-foo attr="bar>"></x-foo>`;"#, "test.js");
        assert!(result.has_errors());
    }

    #[test]
    fn test_lint_valid_template() {
        let result = lint(r#"html`<x-foo attr="bar&gt;"></x-foo>`;"#, "test.js");
        assert!(!result.has_errors());
    }
}
