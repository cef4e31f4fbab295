//! Rule trait and registry for lint rules.

use crate::context::LintContext;
use crate::diagnostic::Severity;
use litmus_relief::{ElementNode, RootNode, TemplateAnalyzer};

/// Rule category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Markup that renders, but not the way the author meant
    BestPractices,
}

/// Rule metadata
pub struct RuleMeta {
    /// Rule name (e.g., "lit/attribute-value-entities")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Rule category
    pub category: RuleCategory,
    /// Whether rule is auto-fixable
    pub fixable: bool,
    /// Default severity
    pub default_severity: Severity,
    /// Part of the recommended preset
    pub recommended: bool,
    pub docs_url: &'static str,
    /// Message id -> i18n key
    pub messages: &'static [(&'static str, &'static str)],
}

impl RuleMeta {
    /// The i18n key for a message id
    pub fn message_key(&self, message_id: &str) -> Option<&'static str> {
        self.messages
            .iter()
            .find(|(id, _)| *id == message_id)
            .map(|(_, key)| *key)
    }
}

/// Rule trait for implementing lint rules
///
/// Rules implement visitor-like methods that are called during the markup
/// walk of each recognised template. Each method receives a mutable reference
/// to LintContext for reporting diagnostics and the analyzer for resolving
/// raw values and file locations.
pub trait Rule: Send + Sync {
    /// Get rule metadata
    fn meta(&self) -> &'static RuleMeta;

    /// Run on template root node (called once per template)
    #[allow(unused_variables)]
    fn run_on_template(
        &self,
        ctx: &mut LintContext<'_>,
        analyzer: &dyn TemplateAnalyzer,
        root: &RootNode,
    ) {
    }

    /// Called when entering an element node
    #[allow(unused_variables)]
    fn enter_element(
        &self,
        ctx: &mut LintContext<'_>,
        analyzer: &dyn TemplateAnalyzer,
        element: &ElementNode,
    ) {
    }

    /// Called when exiting an element node
    #[allow(unused_variables)]
    fn exit_element(
        &self,
        ctx: &mut LintContext<'_>,
        analyzer: &dyn TemplateAnalyzer,
        element: &ElementNode,
    ) {
    }
}

/// Registry holding all enabled lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a rule
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Look a rule up by name
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.meta().name == name)
            .map(|rule| rule.as_ref())
    }

    /// Create registry with the rules of the recommended preset
    pub fn with_recommended() -> Self {
        let mut registry = Self::new();
        for rule in builtin_rules() {
            if rule.meta().recommended {
                registry.register(rule);
            }
        }
        registry
    }

    /// Create registry with all available rules (including opt-in)
    pub fn with_all() -> Self {
        let mut registry = Self::new();
        for rule in builtin_rules() {
            registry.register(rule);
        }
        registry
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_recommended()
    }
}

fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(crate::rules::lit::AttributeValueEntities)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommended_contains_entities_rule() {
        let registry = RuleRegistry::with_recommended();
        let rule = registry.get("lit/attribute-value-entities");
        assert!(rule.is_some());
        assert!(registry.get("lit/no-such-rule").is_none());
    }

    #[test]
    fn test_all_is_superset_of_recommended() {
        let all = RuleRegistry::with_all();
        for rule in RuleRegistry::with_recommended().rules() {
            assert!(all.get(rule.meta().name).is_some());
        }
    }

    #[test]
    fn test_message_key_lookup() {
        let meta = crate::rules::lit::AttributeValueEntities.meta();
        assert_eq!(
            meta.message_key("unencoded"),
            Some("lint.attribute_value_entities.unencoded")
        );
        assert_eq!(meta.message_key("missing"), None);
    }
}
