//! Markup AST node types.
//!
//! The tree produced for the literal content of one tagged template.
//! Locations on nodes are in *template* coordinates: offsets into the
//! joined template text in which every interpolation has been replaced by a
//! placeholder. Mapping back to the original file is the job of a
//! [`TemplateAnalyzer`](crate::TemplateAnalyzer).

use litmus_carton::CompactString;
use serde::Serialize;

/// Position in the template text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub struct Position {
    /// Byte offset from start of text
    pub offset: u32,
    /// 1-indexed line number
    pub line: u32,
    /// 1-indexed column number
    pub column: u32,
}

impl Position {
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

/// Source location span [start, end)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
    pub source: CompactString,
}

impl SourceLocation {
    /// Stub location for synthesized nodes
    pub const STUB: Self = Self {
        start: Position {
            offset: 0,
            line: 1,
            column: 1,
        },
        end: Position {
            offset: 0,
            line: 1,
            column: 1,
        },
        source: CompactString::const_new(""),
    };

    pub fn new(start: Position, end: Position, source: impl Into<CompactString>) -> Self {
        Self {
            start,
            end,
            source: source.into(),
        }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::STUB
    }
}

/// Root of a template's markup tree
#[derive(Debug, Default)]
pub struct RootNode {
    pub children: Vec<TemplateChildNode>,
    /// Joined template text the locations refer to
    pub source: CompactString,
    pub loc: SourceLocation,
}

impl RootNode {
    pub fn new(source: impl Into<CompactString>) -> Self {
        Self {
            children: Vec::new(),
            source: source.into(),
            loc: SourceLocation::STUB,
        }
    }

    /// Elements directly below the root
    pub fn elements(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(TemplateChildNode::as_element)
    }
}

/// All template child node types
#[derive(Debug)]
pub enum TemplateChildNode {
    Element(Box<ElementNode>),
    Text(Box<TextNode>),
    Comment(Box<CommentNode>),
}

impl TemplateChildNode {
    pub fn loc(&self) -> &SourceLocation {
        match self {
            Self::Element(n) => &n.loc,
            Self::Text(n) => &n.loc,
            Self::Comment(n) => &n.loc,
        }
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// Element node
#[derive(Debug)]
pub struct ElementNode {
    pub tag: CompactString,
    /// Attributes in source order, names unique
    pub attributes: Vec<AttributeNode>,
    pub children: Vec<TemplateChildNode>,
    pub is_self_closing: bool,
    /// Location of the start tag, `<` to `>`
    pub loc: SourceLocation,
}

impl ElementNode {
    pub fn new(tag: impl Into<CompactString>, loc: SourceLocation) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            is_self_closing: false,
            loc,
        }
    }

    /// Look up an attribute by exact name
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&AttributeNode> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Child elements (text and comments skipped)
    pub fn child_elements(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(TemplateChildNode::as_element)
    }
}

/// How an attribute value was delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeQuote {
    Double,
    Single,
    Unquoted,
}

/// Attribute value, verbatim from the template (no entity decoding)
#[derive(Debug)]
pub struct AttributeValue {
    pub content: CompactString,
    pub quote: AttributeQuote,
    /// Location of the content, excluding quotes
    pub loc: SourceLocation,
}

/// Attribute node
#[derive(Debug)]
pub struct AttributeNode {
    pub name: CompactString,
    pub name_loc: SourceLocation,
    /// `None` for a boolean attribute written without `=`
    pub value: Option<AttributeValue>,
    /// Whole occurrence: name through the closing quote
    pub loc: SourceLocation,
}

impl AttributeNode {
    pub fn new(name: impl Into<CompactString>, loc: SourceLocation) -> Self {
        Self {
            name: name.into(),
            name_loc: loc.clone(),
            value: None,
            loc,
        }
    }
}

/// Text node
#[derive(Debug)]
pub struct TextNode {
    pub content: CompactString,
    pub loc: SourceLocation,
}

impl TextNode {
    pub fn new(content: impl Into<CompactString>, loc: SourceLocation) -> Self {
        Self {
            content: content.into(),
            loc,
        }
    }
}

/// Comment node
#[derive(Debug)]
pub struct CommentNode {
    pub content: CompactString,
    pub loc: SourceLocation,
}

impl CommentNode {
    pub fn new(content: impl Into<CompactString>, loc: SourceLocation) -> Self {
        Self {
            content: content.into(),
            loc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str) -> AttributeNode {
        AttributeNode::new(name, SourceLocation::STUB)
    }

    #[test]
    fn test_attribute_lookup_is_exact() {
        let mut el = ElementNode::new("div", SourceLocation::STUB);
        el.attributes.push(attr("title"));
        el.attributes.push(attr(".value"));

        assert!(el.attribute("title").is_some());
        assert!(el.attribute(".value").is_some());
        assert!(el.attribute("Title").is_none());
    }

    #[test]
    fn test_child_elements_skip_text() {
        let mut el = ElementNode::new("ul", SourceLocation::STUB);
        el.children.push(TemplateChildNode::Text(Box::new(TextNode::new(
            "\n",
            SourceLocation::STUB,
        ))));
        el.children
            .push(TemplateChildNode::Element(Box::new(ElementNode::new(
                "li",
                SourceLocation::STUB,
            ))));

        let tags: Vec<_> = el.child_elements().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, ["li"]);
    }
}
