//! Script side: find HTML-tagged templates in a JavaScript program.
//!
//! Uses oxc's visitor so templates nested inside interpolations, callbacks
//! or class bodies are all found, in source order.

use litmus_carton::LineIndex;
use litmus_relief::{Span, TaggedTemplate, TemplateQuasi};
use oxc_ast::ast::{Expression, TaggedTemplateExpression, TemplateElement};
use oxc_ast_visit::{walk, Visit};

/// Tag identifier that marks a template as HTML markup
pub const MARKUP_TAG_NAME: &str = "html";

/// Whether a tagged template is HTML markup.
///
/// Only a plain identifier named `html` counts; `lit.html`, call tags and
/// renamed imports are not recognised.
#[inline]
pub fn is_markup_template(node: &TaggedTemplateExpression<'_>) -> bool {
    matches!(&node.tag, Expression::Identifier(ident) if ident.name.as_str() == MARKUP_TAG_NAME)
}

/// Collects every recognised markup template of a program
pub struct TaggedTemplateCollector<'s> {
    lines: &'s LineIndex<'s>,
    templates: Vec<TaggedTemplate<'s>>,
}

impl<'s> TaggedTemplateCollector<'s> {
    pub fn new(lines: &'s LineIndex<'s>) -> Self {
        Self {
            lines,
            templates: Vec::new(),
        }
    }

    pub fn into_templates(self) -> Vec<TaggedTemplate<'s>> {
        self.templates
    }

    fn lift(&self, node: &TaggedTemplateExpression<'_>) -> TaggedTemplate<'s> {
        let quasis = &node.quasi.quasis;
        let last = quasis.len().saturating_sub(1);
        let literal: Vec<TemplateQuasi<'s>> = quasis
            .iter()
            .enumerate()
            .map(|(i, quasi)| self.quasi_content(quasi, i == last))
            .collect();
        let expressions = literal
            .windows(2)
            .map(|pair| Span::new(pair[0].end(), pair[1].start))
            .collect();

        TaggedTemplate::new(
            self.lines,
            Span::new(node.span.start, node.span.end),
            literal,
            expressions,
        )
    }

    /// The literal text of one quasi as it appears in the file.
    ///
    /// Depending on the parser version an element's span may or may not
    /// cover its delimiters (the opening `` ` `` or `}`, the closing `` ` ``
    /// or `${`); both shapes are accepted.
    fn quasi_content(&self, quasi: &TemplateElement<'_>, is_tail: bool) -> TemplateQuasi<'s> {
        let source = self.lines.source();
        let (start, end) = (quasi.span.start, quasi.span.end);
        let text = source.get(start as usize..end as usize).unwrap_or_default();
        let closing = if is_tail { "`" } else { "${" };

        let delimited = text.len() > quasi.value.raw.len()
            && text.len() >= 1 + closing.len()
            && (text.starts_with('`') || text.starts_with('}'))
            && text.ends_with(closing);
        if delimited {
            let inner = &text[1..text.len() - closing.len()];
            TemplateQuasi {
                start: start + 1,
                raw: inner,
            }
        } else {
            TemplateQuasi { start, raw: text }
        }
    }
}

impl<'a> Visit<'a> for TaggedTemplateCollector<'_> {
    fn visit_tagged_template_expression(&mut self, it: &TaggedTemplateExpression<'a>) {
        if is_markup_template(it) {
            let template = self.lift(it);
            self.templates.push(template);
        }
        walk::walk_tagged_template_expression(self, it);
    }
}
