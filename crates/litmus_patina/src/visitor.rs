//! Markup visitor for lint rule execution.

use crate::context::LintContext;
use crate::rule::Rule;
use litmus_relief::{ElementNode, TemplateAnalyzer, TemplateVisitor};

/// Walk one template's markup and run all rules
pub struct LintVisitor<'a, 'ctx, 'rules> {
    ctx: &'ctx mut LintContext<'a>,
    rules: &'rules [Box<dyn Rule>],
    analyzer: &'rules dyn TemplateAnalyzer,
}

impl<'a, 'ctx, 'rules> LintVisitor<'a, 'ctx, 'rules> {
    #[inline]
    pub fn new(
        ctx: &'ctx mut LintContext<'a>,
        rules: &'rules [Box<dyn Rule>],
        analyzer: &'rules dyn TemplateAnalyzer,
    ) -> Self {
        Self {
            ctx,
            rules,
            analyzer,
        }
    }

    /// Run template-level checks, then traverse the elements
    pub fn visit_template(&mut self) {
        let analyzer = self.analyzer;
        for rule in self.rules.iter() {
            if !self.ctx.is_rule_enabled(rule.meta().name) {
                continue;
            }
            self.ctx.current_rule = rule.meta().name;
            rule.run_on_template(self.ctx, analyzer, analyzer.root());
        }

        analyzer.traverse(self);
    }
}

impl TemplateVisitor for LintVisitor<'_, '_, '_> {
    fn enter_element(&mut self, element: &ElementNode) {
        for rule in self.rules.iter() {
            if !self.ctx.is_rule_enabled(rule.meta().name) {
                continue;
            }
            self.ctx.current_rule = rule.meta().name;
            rule.enter_element(self.ctx, self.analyzer, element);
        }
    }

    fn exit_element(&mut self, element: &ElementNode) {
        for rule in self.rules.iter() {
            if !self.ctx.is_rule_enabled(rule.meta().name) {
                continue;
            }
            self.ctx.current_rule = rule.meta().name;
            rule.exit_element(self.ctx, self.analyzer, element);
        }
    }
}
