//! [`TemplateAnalyzer`] over HTML markup in a tagged template.
//!
//! The literal segments are joined into one markup string, with every
//! interpolation replaced by a placeholder `{{__Q:n__}}`. The placeholder
//! contains none of `<`, `>`, `"`, `&`, so a dynamic part never makes a
//! value look unencoded. Offsets in the joined text are mapped back to the
//! file through the segment table built while joining, once per attribute,
//! while the file's line index is still at hand.

use litmus_carton::{CompactString, FxHashMap};
use litmus_relief::{
    ElementNode, RootNode, SourceLocation, Span, TaggedTemplate, TemplateAnalyzer,
    TemplateChildNode, TemplateError, TemplateVisitor,
};
use tracing::trace;

use crate::parser;

/// Literal segment: `len` bytes at `template_start` came from `file_start`
#[derive(Debug, Clone, Copy)]
struct Segment {
    template_start: u32,
    file_start: u32,
    len: u32,
}

impl Segment {
    #[inline]
    fn template_end(&self) -> u32 {
        self.template_start + self.len
    }
}

/// Placeholder standing in for one interpolation
#[derive(Debug, Clone, Copy)]
struct Placeholder {
    template_end: u32,
    expression: Span,
}

/// The placeholder text for interpolation `index`
pub fn placeholder(index: usize) -> CompactString {
    CompactString::from(format!("{{{{__Q:{index}__}}}}"))
}

/// Segment and placeholder tables of the joined markup
#[derive(Debug, Default)]
struct OffsetMap {
    segments: Vec<Segment>,
    placeholders: Vec<Placeholder>,
}

impl OffsetMap {
    /// Map an offset where a span *starts* to a file offset.
    ///
    /// Only literal text resolves: a span starting inside a placeholder was
    /// produced by an interpolation.
    fn map_start(&self, offset: u32) -> Option<u32> {
        self.segments
            .iter()
            .find(|seg| seg.template_start <= offset && offset < seg.template_end())
            .map(|seg| seg.file_start + (offset - seg.template_start))
    }

    /// Map an offset where a span *ends* (exclusive) to a file offset.
    fn map_end(&self, offset: u32) -> Option<u32> {
        if let Some(seg) = self
            .segments
            .iter()
            .find(|seg| seg.template_start < offset && offset <= seg.template_end())
        {
            return Some(seg.file_start + (offset - seg.template_start));
        }
        self.placeholders
            .iter()
            .find(|p| p.template_end == offset)
            .map(|p| p.expression.end)
    }
}

/// Resolve every attribute occurrence under `children` to file coordinates,
/// keyed by its start offset in the joined markup.
fn map_attributes(
    children: &[TemplateChildNode],
    offsets: &OffsetMap,
    template: &TaggedTemplate<'_>,
    out: &mut FxHashMap<u32, SourceLocation>,
) {
    for element in children.iter().filter_map(TemplateChildNode::as_element) {
        for attr in &element.attributes {
            let start = offsets.map_start(attr.loc.start.offset);
            let end = offsets.map_end(attr.loc.end.offset);
            if let (Some(start), Some(end)) = (start, end) {
                if start <= end {
                    out.insert(attr.loc.start.offset, template.location(start, end));
                }
            }
        }
        map_attributes(&element.children, offsets, template, out);
    }
}

/// Parsed markup of one `html` tagged template
#[derive(Debug)]
pub struct HtmlTemplateAnalyzer {
    root: RootNode,
    placeholder_count: usize,
    /// File locations of attribute occurrences written in literal text
    attribute_locations: FxHashMap<u32, SourceLocation>,
}

impl HtmlTemplateAnalyzer {
    /// The joined markup the tree was parsed from
    pub fn markup(&self) -> &str {
        &self.root.source
    }

    /// Whether `text` is exactly one placeholder
    fn is_single_placeholder(&self, text: &str) -> bool {
        text.strip_prefix("{{__Q:")
            .and_then(|rest| rest.strip_suffix("__}}"))
            .is_some_and(|index| {
                !index.is_empty()
                    && index.bytes().all(|b| b.is_ascii_digit())
                    && index.parse::<usize>().is_ok_and(|i| i < self.placeholder_count)
            })
    }
}

impl TemplateAnalyzer for HtmlTemplateAnalyzer {
    fn create(template: &TaggedTemplate<'_>) -> Result<Self, TemplateError> {
        template.validate()?;

        let mut markup = String::with_capacity(
            template.quasis.iter().map(|q| q.raw.len()).sum::<usize>()
                + template.expressions.len() * 12,
        );
        let mut offsets = OffsetMap {
            segments: Vec::with_capacity(template.quasis.len()),
            placeholders: Vec::with_capacity(template.expressions.len()),
        };

        for (index, quasi) in template.quasis.iter().enumerate() {
            offsets.segments.push(Segment {
                template_start: markup.len() as u32,
                file_start: quasi.start,
                len: quasi.raw.len() as u32,
            });
            markup.push_str(quasi.raw);

            if let Some(&expression) = template.expressions.get(index) {
                markup.push_str(&placeholder(index));
                offsets.placeholders.push(Placeholder {
                    template_end: markup.len() as u32,
                    expression,
                });
            }
        }

        let (root, errors) = parser::parse(&markup);
        if let Some(fatal) = errors.iter().find(|e| e.is_fatal()) {
            return Err(TemplateError::Parse(fatal.clone()));
        }
        for error in &errors {
            trace!(%error, "recoverable markup error");
        }

        let mut attribute_locations = FxHashMap::default();
        map_attributes(&root.children, &offsets, template, &mut attribute_locations);

        Ok(Self {
            root,
            placeholder_count: offsets.placeholders.len(),
            attribute_locations,
        })
    }

    fn root(&self) -> &RootNode {
        &self.root
    }

    fn traverse(&self, visitor: &mut dyn TemplateVisitor) {
        fn walk(children: &[TemplateChildNode], visitor: &mut dyn TemplateVisitor) {
            for child in children {
                if let TemplateChildNode::Element(element) = child {
                    visitor.enter_element(element);
                    walk(&element.children, visitor);
                    visitor.exit_element(element);
                }
            }
        }
        walk(&self.root.children, visitor);
    }

    fn attribute_location(&self, element: &ElementNode, name: &str) -> Option<SourceLocation> {
        let attr = element.attribute(name)?;
        self.attribute_locations.get(&attr.loc.start.offset).cloned()
    }

    fn raw_attribute_value<'e>(&self, element: &'e ElementNode, name: &str) -> Option<&'e str> {
        let value = element.attribute(name)?.value.as_ref()?;
        if self.is_single_placeholder(&value.content) {
            return None;
        }
        Some(value.content.as_str())
    }
}
