//! The contract between lint rules and a markup extractor.
//!
//! A rule never sees the JavaScript AST. It receives a [`TemplateAnalyzer`]
//! built from a [`TaggedTemplate`], walks the element tree through
//! [`TemplateAnalyzer::traverse`] and asks the analyzer to resolve
//! attribute values and locations back to the original file.

use crate::ast::{ElementNode, RootNode, SourceLocation};
use crate::errors::TemplateError;
use litmus_carton::LineIndex;

/// Byte range `[start, end)` in the original file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// One literal segment of a template, as written (escapes not cooked)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateQuasi<'a> {
    /// File offset of the first character of `raw`
    pub start: u32,
    pub raw: &'a str,
}

impl TemplateQuasi<'_> {
    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.raw.len() as u32
    }
}

/// A tagged template literal lifted out of the script AST.
///
/// Invariant: `quasis.len() == expressions.len() + 1`, and segments and
/// interpolations alternate in source order starting with a segment.
#[derive(Debug, Clone)]
pub struct TaggedTemplate<'a> {
    /// The whole file
    pub source: &'a str,
    pub lines: &'a LineIndex<'a>,
    /// Span of the whole tagged template expression
    pub span: Span,
    pub quasis: Vec<TemplateQuasi<'a>>,
    /// Spans of the `${...}` interpolations, delimiters included
    pub expressions: Vec<Span>,
}

impl<'a> TaggedTemplate<'a> {
    pub fn new(
        lines: &'a LineIndex<'a>,
        span: Span,
        quasis: Vec<TemplateQuasi<'a>>,
        expressions: Vec<Span>,
    ) -> Self {
        Self {
            source: lines.source(),
            lines,
            span,
            quasis,
            expressions,
        }
    }

    /// Check the segment/interpolation alternation invariant.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.quasis.len() == self.expressions.len() + 1 {
            Ok(())
        } else {
            Err(TemplateError::MalformedTemplate {
                quasis: self.quasis.len(),
                expressions: self.expressions.len(),
            })
        }
    }

    /// Build a file-coordinate location for a byte range of this file.
    pub fn location(&self, start: u32, end: u32) -> SourceLocation {
        let to_pos = |offset: u32| {
            let (line, column) = self.lines.line_col(offset);
            crate::ast::Position::new(offset, line, column)
        };
        let text = self
            .source
            .get(start as usize..end as usize)
            .unwrap_or_default();
        SourceLocation::new(to_pos(start), to_pos(end), text)
    }
}

/// Element callbacks for [`TemplateAnalyzer::traverse`]
pub trait TemplateVisitor {
    fn enter_element(&mut self, _element: &ElementNode) {}
    fn exit_element(&mut self, _element: &ElementNode) {}
}

/// Markup structure of one tagged template.
///
/// Locations returned here are in *file* coordinates, ready for a
/// diagnostic.
pub trait TemplateAnalyzer {
    /// Parse the literal content of `template`.
    ///
    /// Fails when the content is not analysable as markup; callers skip the
    /// template silently.
    fn create(template: &TaggedTemplate<'_>) -> Result<Self, TemplateError>
    where
        Self: Sized;

    fn root(&self) -> &RootNode;

    /// Pre-order walk over elements only, each visited once.
    fn traverse(&self, visitor: &mut dyn TemplateVisitor);

    /// Span of the attribute occurrence, name through closing quote.
    fn attribute_location(&self, element: &ElementNode, name: &str) -> Option<SourceLocation>;

    /// The value as written between the quotes, before entity decoding.
    ///
    /// `None` when the attribute is absent, has no `=`, or is entirely one
    /// interpolation.
    fn raw_attribute_value<'e>(&self, element: &'e ElementNode, name: &str) -> Option<&'e str>;
}
