//! Main linter entry point.
//!
//! Parses a script with oxc, lifts every `html` tagged template out of the
//! AST and runs the registered rules over each template's markup.

use std::marker::PhantomData;

use crate::context::LintContext;
use crate::diagnostic::{LintDiagnostic, LintSummary, Severity};
use crate::disable::DisableDirectives;
use crate::rule::{Rule, RuleRegistry};
use crate::script::TaggedTemplateCollector;
use crate::visitor::LintVisitor;
use litmus_armature::HtmlTemplateAnalyzer;
use litmus_carton::i18n::Locale;
use litmus_carton::{CompactString, FxHashMap, FxHashSet, LineIndex};
use litmus_relief::TemplateAnalyzer;
use oxc_allocator::Allocator;
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::SourceType;
use tracing::debug;

/// Lint result for a single file
#[derive(Debug, Clone)]
pub struct LintResult {
    /// Filename that was linted
    pub filename: String,
    /// Collected diagnostics, ordered by position
    pub diagnostics: Vec<LintDiagnostic>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Markup templates that were analysed
    pub template_count: usize,
}

impl LintResult {
    /// Check if there are any errors
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any diagnostics
    #[inline]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Main linter struct.
///
/// Generic over the markup analyzer so rules never depend on a particular
/// HTML parser. Holds no per-file state and can be shared across threads.
pub struct Linter<A: TemplateAnalyzer = HtmlTemplateAnalyzer> {
    registry: RuleRegistry,
    /// Locale for i18n messages
    locale: Locale,
    /// Optional set of enabled rule names (if None, all rules are enabled)
    enabled_rules: Option<FxHashSet<CompactString>>,
    severity_overrides: FxHashMap<CompactString, Severity>,
    analyzer: PhantomData<fn() -> A>,
}

impl Linter {
    /// Create a new linter with recommended rules
    #[inline]
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::with_recommended())
    }

    /// Create a linter with a custom rule registry
    #[inline]
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self::with_analyzer(registry)
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: TemplateAnalyzer> Linter<A> {
    /// Create a linter that parses markup with `A`
    pub fn with_analyzer(registry: RuleRegistry) -> Self {
        Self {
            registry,
            locale: Locale::default(),
            enabled_rules: None,
            severity_overrides: FxHashMap::default(),
            analyzer: PhantomData,
        }
    }

    /// Set the locale for i18n messages
    #[inline]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set enabled rules (if None, all rules are enabled)
    ///
    /// Pass a list of rule names to enable only those rules.
    /// Rules not in the list will be skipped during linting.
    #[inline]
    pub fn with_enabled_rules(mut self, rules: Option<Vec<String>>) -> Self {
        self.enabled_rules = rules.map(|r| r.into_iter().map(CompactString::from).collect());
        self
    }

    /// Report a rule with a severity other than its default
    pub fn with_severity_overrides(
        mut self,
        overrides: impl IntoIterator<Item = (String, Severity)>,
    ) -> Self {
        self.severity_overrides = overrides
            .into_iter()
            .map(|(name, severity)| (CompactString::from(name), severity))
            .collect();
        self
    }

    /// Get the current locale
    #[inline]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Check if a rule is enabled
    #[inline]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        match &self.enabled_rules {
            Some(set) => set.contains(rule_name),
            None => true,
        }
    }

    /// Lint one JavaScript or TypeScript file
    ///
    /// The source type comes from the filename's extension; unknown
    /// extensions are parsed as module JavaScript.
    pub fn lint_source(&self, source: &str, filename: &str) -> LintResult {
        let allocator = Allocator::default();
        let source_type = SourceType::from_path(filename).unwrap_or_else(|_| SourceType::mjs());
        let ret = Parser::new(&allocator, source, source_type).parse();
        if !ret.errors.is_empty() {
            debug!(
                filename,
                errors = ret.errors.len(),
                panicked = ret.panicked,
                "script has syntax errors, linting the recovered AST"
            );
        }

        let lines = LineIndex::new(source);
        let directives = DisableDirectives::parse(
            &lines,
            ret.program
                .comments
                .iter()
                .map(|comment| (comment.span.start, comment.span.end)),
        );

        let mut collector = TaggedTemplateCollector::new(&lines);
        collector.visit_program(&ret.program);
        let templates = collector.into_templates();

        let mut ctx = LintContext::new(source, filename)
            .with_locale(self.locale)
            .with_directives(&directives);
        ctx.set_enabled_rules(self.enabled_rules.clone());
        ctx.set_severity_overrides(self.severity_overrides.clone());

        let mut template_count = 0;
        for template in &templates {
            let analyzer = match A::create(template) {
                Ok(analyzer) => analyzer,
                Err(err) => {
                    let (line, column) = lines.line_col(template.span.start);
                    debug!(filename, line, column, %err, "skipping template");
                    continue;
                }
            };
            template_count += 1;
            let mut visitor = LintVisitor::new(&mut ctx, self.registry.rules(), &analyzer);
            visitor.visit_template();
        }

        let error_count = ctx.error_count();
        let warning_count = ctx.warning_count();
        let mut diagnostics = ctx.into_diagnostics();
        diagnostics.sort_by_key(|d| d.start.offset);

        LintResult {
            filename: filename.to_string(),
            diagnostics,
            error_count,
            warning_count,
            template_count,
        }
    }

    /// Lint multiple files and aggregate results
    pub fn lint_files(&self, files: &[(String, String)]) -> (Vec<LintResult>, LintSummary) {
        let mut results = Vec::with_capacity(files.len());
        let mut summary = LintSummary::default();

        for (filename, source) in files {
            let result = self.lint_source(source, filename);
            for diagnostic in &result.diagnostics {
                summary.add(diagnostic);
            }
            results.push(result);
        }

        summary.file_count = files.len();
        (results, summary)
    }

    /// Get the rule registry
    #[inline]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Get all registered rules
    #[inline]
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        self.registry.rules()
    }
}
