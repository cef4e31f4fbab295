//! lit/attribute-value-entities
//!
//! Disallow unencoded HTML entities in attribute values.
//!
//! A raw `<`, `>` or `"` in an attribute value, or an `&` that does not
//! start a character reference, is parsed leniently by browsers but is
//! invalid markup and easy to break further.
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! html`<x-foo attr="bar>"></x-foo>`;
//! html`<x-foo attr="a & b"></x-foo>`;
//! ```
//!
//! ### Valid
//! ```js
//! html`<x-foo attr="bar&gt;"></x-foo>`;
//! html`<x-foo attr="a &amp; b &#169;"></x-foo>`;
//! ```
//!
//! Based on eslint-plugin-lit attribute-value-entities rule.

use crate::context::LintContext;
use crate::diagnostic::{LintDiagnostic, Severity};
use crate::rule::{Rule, RuleCategory, RuleMeta};
use litmus_carton::i18n::{t, t_fmt};
use litmus_relief::{ElementNode, TemplateAnalyzer};
use memchr::{memchr3, memchr_iter};

const MESSAGE_ID: &str = "unencoded";
const MESSAGE_KEY: &str = "lint.attribute_value_entities.unencoded";
const HELP_KEY: &str = "lint.attribute_value_entities.help";

static META: RuleMeta = RuleMeta {
    name: "lit/attribute-value-entities",
    description: "Disallows unencoded HTML entities in attribute values",
    category: RuleCategory::BestPractices,
    fixable: false,
    default_severity: Severity::Error,
    recommended: true,
    docs_url:
        "https://github.com/43081j/eslint-plugin-lit/blob/master/docs/rules/attribute-value-entities.md",
    messages: &[(MESSAGE_ID, MESSAGE_KEY)],
};

/// Disallow unencoded HTML entities in attribute values
#[derive(Default)]
pub struct AttributeValueEntities;

impl Rule for AttributeValueEntities {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn enter_element(
        &self,
        ctx: &mut LintContext<'_>,
        analyzer: &dyn TemplateAnalyzer,
        element: &ElementNode,
    ) {
        for attr in &element.attributes {
            let name = attr.name.as_str();
            let Some(loc) = analyzer.attribute_location(element, name) else {
                continue;
            };
            let Some(raw) = analyzer.raw_attribute_value(element, name) else {
                continue;
            };
            let Some(index) = find_unencoded_entity(raw) else {
                continue;
            };

            let offending = &raw[index..index + 1];
            let help = t_fmt(
                ctx.locale(),
                HELP_KEY,
                &[
                    ("char", offending),
                    ("entity", encoded_form(raw.as_bytes()[index])),
                    ("attr", name),
                ],
            );
            let diagnostic =
                LintDiagnostic::new(META.name, META.default_severity, t(ctx.locale(), MESSAGE_KEY), &loc)
                    .with_message_id(MESSAGE_ID)
                    .with_help(help);
            ctx.report(diagnostic);
        }
    }
}

/// Byte offset of the first character in `value` that must be encoded.
///
/// `<`, `>` and `"` always need encoding. An `&` is fine only when it opens
/// a decimal (`&#169;`) or named (`&amp;`) reference.
pub fn find_unencoded_entity(value: &str) -> Option<usize> {
    let bytes = value.as_bytes();
    let limit = memchr3(b'<', b'>', b'"', bytes).unwrap_or(bytes.len());
    memchr_iter(b'&', &bytes[..limit])
        .find(|&amp| !starts_reference(&bytes[amp + 1..]))
        .or_else(|| (limit < bytes.len()).then_some(limit))
}

/// `rest` follows an `&`: `#` digits `;` or letters `;`
fn starts_reference(rest: &[u8]) -> bool {
    let (body, numeric) = match rest.split_first() {
        Some((b'#', digits)) => (digits, true),
        _ => (rest, false),
    };
    let len = body
        .iter()
        .take_while(|b| {
            if numeric {
                b.is_ascii_digit()
            } else {
                b.is_ascii_alphabetic()
            }
        })
        .count();
    len > 0 && body.get(len) == Some(&b';')
}

fn encoded_form(byte: u8) -> &'static str {
    match byte {
        b'<' => "&lt;",
        b'>' => "&gt;",
        b'"' => "&quot;",
        _ => "&amp;",
    }
}
