//! Diagnostic types for litmus_patina linter.
//!
//! Uses `CompactString` for efficient small string storage.

use litmus_carton::CompactString;
use litmus_relief::{Position, SourceLocation};
use oxc_diagnostics::OxcDiagnostic;
use oxc_span::Span;
use serde::Serialize;

/// Lint diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// ESLint-compatible numeric severity
    #[inline]
    pub const fn as_number(self) -> u8 {
        match self {
            Self::Error => 2,
            Self::Warning => 1,
        }
    }
}

/// A lint diagnostic with rich information for display.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// Rule that triggered this diagnostic
    pub rule_name: &'static str,
    /// Stable identifier of the message within the rule
    pub message_id: Option<&'static str>,
    pub severity: Severity,
    pub message: CompactString,
    /// Start of the flagged range in the file
    pub start: Position,
    /// End of the flagged range in the file (exclusive)
    pub end: Position,
    pub help: Option<CompactString>,
}

impl LintDiagnostic {
    /// Create a new error diagnostic
    #[inline]
    pub fn error(
        rule_name: &'static str,
        message: impl Into<CompactString>,
        loc: &SourceLocation,
    ) -> Self {
        Self::new(rule_name, Severity::Error, message, loc)
    }

    /// Create a new warning diagnostic
    #[inline]
    pub fn warn(
        rule_name: &'static str,
        message: impl Into<CompactString>,
        loc: &SourceLocation,
    ) -> Self {
        Self::new(rule_name, Severity::Warning, message, loc)
    }

    #[inline]
    pub fn new(
        rule_name: &'static str,
        severity: Severity,
        message: impl Into<CompactString>,
        loc: &SourceLocation,
    ) -> Self {
        Self {
            rule_name,
            message_id: None,
            severity,
            message: message.into(),
            start: loc.start,
            end: loc.end,
            help: None,
        }
    }

    /// Add a help message
    #[inline]
    pub fn with_help(mut self, help: impl Into<CompactString>) -> Self {
        self.help = Some(help.into());
        self
    }

    #[inline]
    pub fn with_message_id(mut self, message_id: &'static str) -> Self {
        self.message_id = Some(message_id);
        self
    }

    /// Byte range in the file
    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.start.offset, self.end.offset)
    }

    /// Convert to OxcDiagnostic for rich rendering
    #[inline]
    pub fn into_oxc_diagnostic(self) -> OxcDiagnostic {
        let mut diag = match self.severity {
            Severity::Error => OxcDiagnostic::error(self.message.to_string()),
            Severity::Warning => OxcDiagnostic::warn(self.message.to_string()),
        };

        diag = diag.with_label(Span::new(self.start.offset, self.end.offset));

        if let Some(help) = self.help {
            diag = diag.with_help(help.to_string());
        }

        diag
    }
}

/// Summary of lint results
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub file_count: usize,
}

impl LintSummary {
    #[inline]
    pub fn add(&mut self, diagnostic: &LintDiagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}
