//! Lint context for rule execution.
//!
//! One context collects every diagnostic of one file. It applies the rule
//! filter, severity overrides and inline suppressions at report time, so
//! rules only decide *what* is wrong.

use crate::diagnostic::{LintDiagnostic, Severity};
use crate::disable::DisableDirectives;
use litmus_carton::i18n::Locale;
use litmus_carton::{CompactString, FxHashMap, FxHashSet};
use litmus_relief::SourceLocation;

/// Lint context provides utilities for rules during execution.
pub struct LintContext<'a> {
    /// Source code being linted
    pub source: &'a str,
    /// Filename for diagnostics
    pub filename: &'a str,
    directives: Option<&'a DisableDirectives>,
    /// Collected diagnostics
    diagnostics: Vec<LintDiagnostic>,
    /// Current rule name (set by visitor before calling rule methods)
    pub current_rule: &'static str,
    locale: Locale,
    /// Optional set of enabled rule names (if None, all rules are enabled)
    enabled_rules: Option<FxHashSet<CompactString>>,
    severity_overrides: FxHashMap<CompactString, Severity>,
    /// Cached error count for fast access
    error_count: usize,
    /// Cached warning count for fast access
    warning_count: usize,
    suppressed_count: usize,
}

impl<'a> LintContext<'a> {
    /// Initial capacity for diagnostics vector
    const INITIAL_DIAGNOSTICS_CAPACITY: usize = 16;

    #[inline]
    pub fn new(source: &'a str, filename: &'a str) -> Self {
        Self {
            source,
            filename,
            directives: None,
            diagnostics: Vec::with_capacity(Self::INITIAL_DIAGNOSTICS_CAPACITY),
            current_rule: "",
            locale: Locale::default(),
            enabled_rules: None,
            severity_overrides: FxHashMap::default(),
            error_count: 0,
            warning_count: 0,
            suppressed_count: 0,
        }
    }

    #[inline]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    #[inline]
    pub fn with_directives(mut self, directives: &'a DisableDirectives) -> Self {
        self.directives = Some(directives);
        self
    }

    #[inline]
    pub fn set_enabled_rules(&mut self, rules: Option<FxHashSet<CompactString>>) {
        self.enabled_rules = rules;
    }

    #[inline]
    pub fn set_severity_overrides(&mut self, overrides: FxHashMap<CompactString, Severity>) {
        self.severity_overrides = overrides;
    }

    /// Locale for rule messages
    #[inline]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Check if a rule is enabled
    #[inline]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.enabled_rules
            .as_ref()
            .map_or(true, |rules| rules.contains(rule_name))
    }

    /// Report a lint diagnostic
    pub fn report(&mut self, mut diagnostic: LintDiagnostic) {
        if !self.is_rule_enabled(diagnostic.rule_name) {
            return;
        }
        if self
            .directives
            .is_some_and(|d| d.is_disabled(diagnostic.rule_name, diagnostic.start.line))
        {
            self.suppressed_count += 1;
            return;
        }
        if let Some(&severity) = self.severity_overrides.get(diagnostic.rule_name) {
            diagnostic.severity = severity;
        }
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    /// Report an error at a location
    #[inline]
    pub fn error(&mut self, message: impl Into<CompactString>, loc: &SourceLocation) {
        self.report(LintDiagnostic::error(self.current_rule, message, loc));
    }

    /// Report a warning at a location
    #[inline]
    pub fn warn(&mut self, message: impl Into<CompactString>, loc: &SourceLocation) {
        self.report(LintDiagnostic::warn(self.current_rule, message, loc));
    }

    /// Get collected diagnostics
    #[inline]
    pub fn into_diagnostics(self) -> Vec<LintDiagnostic> {
        self.diagnostics
    }

    /// Get reference to collected diagnostics
    #[inline]
    pub fn diagnostics(&self) -> &[LintDiagnostic] {
        &self.diagnostics
    }

    /// Get the error count (cached, O(1))
    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Get the warning count (cached, O(1))
    #[inline]
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Diagnostics dropped by inline suppressions
    #[inline]
    pub fn suppressed_count(&self) -> usize {
        self.suppressed_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litmus_carton::LineIndex;
    use litmus_relief::Position;

    fn loc_on_line(line: u32) -> SourceLocation {
        SourceLocation::new(Position::new(0, line, 1), Position::new(1, line, 2), "x")
    }

    #[test]
    fn test_report_counts() {
        let mut ctx = LintContext::new("x", "a.js");
        ctx.current_rule = "test/rule";
        ctx.error("bad", &loc_on_line(1));
        ctx.warn("meh", &loc_on_line(1));
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(ctx.diagnostics()[0].rule_name, "test/rule");
    }

    #[test]
    fn test_disabled_rule_is_dropped() {
        let mut ctx = LintContext::new("x", "a.js");
        ctx.set_enabled_rules(Some(["other/rule".into()].into_iter().collect()));
        ctx.current_rule = "test/rule";
        ctx.error("bad", &loc_on_line(1));
        assert!(ctx.diagnostics().is_empty());
        assert!(!ctx.is_rule_enabled("test/rule"));
        assert!(ctx.is_rule_enabled("other/rule"));
    }

    #[test]
    fn test_severity_override() {
        let mut ctx = LintContext::new("x", "a.js");
        let mut overrides = FxHashMap::default();
        overrides.insert(CompactString::from("test/rule"), Severity::Warning);
        ctx.set_severity_overrides(overrides);
        ctx.current_rule = "test/rule";
        ctx.error("bad", &loc_on_line(1));
        assert_eq!(ctx.error_count(), 0);
        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(ctx.diagnostics()[0].severity, Severity::Warning);
    }

    #[test]
    fn test_suppressed_by_directive() {
        let source = "// litmus-disable-next-line\nx";
        let lines = LineIndex::new(source);
        let directives = DisableDirectives::parse(&lines, [(0, 27)]);
        let mut ctx = LintContext::new(source, "a.js").with_directives(&directives);
        ctx.current_rule = "test/rule";
        ctx.error("bad", &loc_on_line(2));
        ctx.error("bad", &loc_on_line(1));
        assert_eq!(ctx.suppressed_count(), 1);
        assert_eq!(ctx.diagnostics().len(), 1);
        assert_eq!(ctx.diagnostics()[0].start.line, 1);
    }
}
