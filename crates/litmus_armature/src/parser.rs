//! Template markup parser.
//!
//! This parser drives the tokenizer and builds the element tree. Unclosed
//! elements are closed implicitly; only errors that leave the structure
//! ambiguous are fatal (see [`ErrorCode::is_fatal`]).

use litmus_carton::{CompactString, LineIndex};
use litmus_relief::ast::*;
use litmus_relief::errors::{CompilerError, ErrorCode};

use crate::tokenizer::{Callbacks, QuoteType, Tokenizer};

/// Void elements never have children or an end tag
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[inline]
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}

/// Parser context for building AST
pub struct Parser<'s> {
    source: &'s str,
    lines: LineIndex<'s>,
    /// Open elements
    stack: Vec<ElementNode>,
    root: RootNode,
    current_element: Option<CurrentElement>,
    current_attr: Option<CurrentAttribute>,
    errors: Vec<CompilerError>,
}

/// Start tag being parsed
struct CurrentElement {
    tag: CompactString,
    tag_start: usize,
    is_self_closing: bool,
    attributes: Vec<AttributeNode>,
}

/// Attribute being parsed
struct CurrentAttribute {
    name: CompactString,
    name_start: usize,
    name_end: usize,
    value_start: Option<usize>,
    value_end: Option<usize>,
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            lines: LineIndex::new(source),
            stack: Vec::new(),
            root: RootNode::new(source),
            current_element: None,
            current_attr: None,
            errors: Vec::new(),
        }
    }

    /// Parse the source and return the AST with every error encountered
    pub fn parse(mut self) -> (RootNode, Vec<CompilerError>) {
        let source = self.source;
        let mut tokenizer = Tokenizer::new(source, ParserCallbacks { parser: &mut self });
        tokenizer.tokenize();

        self.handle_unclosed_elements();
        self.root.loc = self.create_loc(0, source.len());
        (self.root, self.errors)
    }

    fn get_source(&self, start: usize, end: usize) -> &'s str {
        self.source.get(start..end).unwrap_or_default()
    }

    fn get_pos(&self, offset: usize) -> Position {
        let (line, column) = self.lines.line_col(offset as u32);
        Position::new(offset as u32, line, column)
    }

    fn create_loc(&self, start: usize, end: usize) -> SourceLocation {
        SourceLocation::new(
            self.get_pos(start),
            self.get_pos(end),
            self.get_source(start, end),
        )
    }

    /// Add child to current context (stack top or root)
    fn add_child(&mut self, child: TemplateChildNode) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(child);
        } else {
            self.root.children.push(child);
        }
    }

    /// Pop open elements down to `depth`, nesting each into its parent
    fn close_elements_to(&mut self, depth: usize) {
        while self.stack.len() > depth {
            let Some(element) = self.stack.pop() else {
                break;
            };
            self.add_child(TemplateChildNode::Element(Box::new(element)));
        }
    }

    fn handle_unclosed_elements(&mut self) {
        for element in &self.stack {
            self.errors.push(CompilerError::new(
                ErrorCode::MissingEndTag,
                Some(element.loc.clone()),
            ));
        }
        self.close_elements_to(0);
    }

    fn on_text_impl(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let text = TextNode::new(self.get_source(start, end), self.create_loc(start, end));
        self.add_child(TemplateChildNode::Text(Box::new(text)));
    }

    fn on_open_tag_name_impl(&mut self, start: usize, end: usize) {
        self.current_element = Some(CurrentElement {
            tag: self.get_source(start, end).into(),
            tag_start: start,
            is_self_closing: false,
            attributes: Vec::new(),
        });
    }

    fn on_open_tag_end_impl(&mut self, end: usize) {
        let Some(current) = self.current_element.take() else {
            return;
        };
        // Include < and >
        let loc = self.create_loc(current.tag_start - 1, end + 1);

        let mut element = ElementNode::new(current.tag, loc);
        element.is_self_closing = current.is_self_closing;
        element.attributes = current.attributes;

        if element.is_self_closing || is_void_tag(&element.tag) {
            self.add_child(TemplateChildNode::Element(Box::new(element)));
        } else {
            self.stack.push(element);
        }
    }

    fn on_self_closing_tag_impl(&mut self) {
        if let Some(ref mut current) = self.current_element {
            current.is_self_closing = true;
        }
    }

    fn on_close_tag_impl(&mut self, start: usize, end: usize) {
        let tag = self.get_source(start, end);

        let Some(depth) = self
            .stack
            .iter()
            .rposition(|element| element.tag.eq_ignore_ascii_case(tag))
        else {
            if is_void_tag(tag) {
                // `</br>` and friends close nothing
                return;
            }
            // Include </ and >
            let loc = self.create_loc(start - 2, (end + 1).min(self.source.len()));
            self.errors
                .push(CompilerError::new(ErrorCode::InvalidEndTag, Some(loc)));
            return;
        };

        // Elements opened inside the match and never closed
        for element in &self.stack[depth + 1..] {
            self.errors.push(CompilerError::new(
                ErrorCode::MissingEndTag,
                Some(element.loc.clone()),
            ));
        }
        self.close_elements_to(depth);
    }

    fn on_attrib_name_impl(&mut self, start: usize, end: usize) {
        self.current_attr = Some(CurrentAttribute {
            name: self.get_source(start, end).into(),
            name_start: start,
            name_end: end,
            value_start: None,
            value_end: None,
        });
    }

    fn on_attrib_data_impl(&mut self, start: usize, end: usize) {
        if let Some(ref mut attr) = self.current_attr {
            if attr.value_start.is_none() {
                attr.value_start = Some(start);
            }
            attr.value_end = Some(end);
        }
    }

    fn on_attrib_end_impl(&mut self, quote: QuoteType, end: usize) {
        if let Some(attr) = self.current_attr.take() {
            self.finish_attribute(attr, quote, end);
        }
    }

    fn finish_attribute(&mut self, attr: CurrentAttribute, quote: QuoteType, end: usize) {
        // `end` is the closing quote for quoted values
        let (occurrence_end, quote) = match quote {
            QuoteType::NoValue => (attr.name_end, None),
            QuoteType::Unquoted => (end, Some(AttributeQuote::Unquoted)),
            QuoteType::Single => (end + 1, Some(AttributeQuote::Single)),
            QuoteType::Double => (end + 1, Some(AttributeQuote::Double)),
        };

        let mut attr_node = AttributeNode::new(
            attr.name,
            self.create_loc(attr.name_start, occurrence_end),
        );
        attr_node.name_loc = self.create_loc(attr.name_start, attr.name_end);

        if let Some(quote) = quote {
            // alt="" keeps an empty value, distinct from a boolean attribute
            let (v_start, v_end) = match (attr.value_start, attr.value_end) {
                (Some(v_start), Some(v_end)) => (v_start, v_end),
                _ => (end, end),
            };
            attr_node.value = Some(AttributeValue {
                content: self.get_source(v_start, v_end).into(),
                quote,
                loc: self.create_loc(v_start, v_end),
            });
        }

        let Some(ref mut current) = self.current_element else {
            return;
        };
        if current.attributes.iter().any(|a| a.name == attr_node.name) {
            self.errors.push(CompilerError::new(
                ErrorCode::DuplicateAttribute,
                Some(attr_node.loc),
            ));
        } else {
            current.attributes.push(attr_node);
        }
    }

    fn on_comment_impl(&mut self, start: usize, end: usize) {
        // Include <!-- and -->
        let loc = self.create_loc(start - 4, end + 3);
        let comment = CommentNode::new(self.get_source(start, end), loc);
        self.add_child(TemplateChildNode::Comment(Box::new(comment)));
    }

    fn on_error_impl(&mut self, code: ErrorCode, index: usize) {
        let end = (index + 1).min(self.source.len());
        let loc = self.create_loc(index.min(end), end);
        self.errors.push(CompilerError::new(code, Some(loc)));
    }
}

/// Wrapper struct for implementing Callbacks
struct ParserCallbacks<'s, 'p> {
    parser: &'p mut Parser<'s>,
}

impl Callbacks for ParserCallbacks<'_, '_> {
    fn on_text(&mut self, start: usize, end: usize) {
        self.parser.on_text_impl(start, end);
    }

    fn on_open_tag_name(&mut self, start: usize, end: usize) {
        self.parser.on_open_tag_name_impl(start, end);
    }

    fn on_open_tag_end(&mut self, end: usize) {
        self.parser.on_open_tag_end_impl(end);
    }

    fn on_self_closing_tag(&mut self, end: usize) {
        self.parser.on_self_closing_tag_impl();
        self.parser.on_open_tag_end_impl(end);
    }

    fn on_close_tag(&mut self, start: usize, end: usize) {
        self.parser.on_close_tag_impl(start, end);
    }

    fn on_attrib_name(&mut self, start: usize, end: usize) {
        self.parser.on_attrib_name_impl(start, end);
    }

    fn on_attrib_data(&mut self, start: usize, end: usize) {
        self.parser.on_attrib_data_impl(start, end);
    }

    fn on_attrib_end(&mut self, quote: QuoteType, end: usize) {
        self.parser.on_attrib_end_impl(quote, end);
    }

    fn on_comment(&mut self, start: usize, end: usize) {
        self.parser.on_comment_impl(start, end);
    }

    fn on_end(&mut self) {}

    fn on_error(&mut self, code: ErrorCode, index: usize) {
        self.parser.on_error_impl(code, index);
    }
}

/// Parse template markup
pub fn parse(source: &str) -> (RootNode, Vec<CompilerError>) {
    Parser::new(source).parse()
}
