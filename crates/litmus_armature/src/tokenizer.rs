//! HTML tokenizer for template markup.
//!
//! A byte-level state machine in the style of htmlparser2. It reports
//! sections of the input through [`Callbacks`] as byte ranges and never
//! allocates; the parser decides what to build from them.
//!
//! Character references are not decoded. Attribute values are reported
//! verbatim, which is what entity checks need.

use litmus_relief::ErrorCode;

/// Character codes for fast comparison
pub mod char_codes {
    pub const TAB: u8 = 0x09;
    pub const NEWLINE: u8 = 0x0A;
    pub const FORM_FEED: u8 = 0x0C;
    pub const CARRIAGE_RETURN: u8 = 0x0D;
    pub const SPACE: u8 = 0x20;
    pub const EXCLAMATION_MARK: u8 = 0x21;
    pub const DOUBLE_QUOTE: u8 = 0x22;
    pub const SINGLE_QUOTE: u8 = 0x27;
    pub const DASH: u8 = 0x2D;
    pub const SLASH: u8 = 0x2F;
    pub const LT: u8 = 0x3C;
    pub const EQ: u8 = 0x3D;
    pub const GT: u8 = 0x3E;
    pub const QUESTION_MARK: u8 = 0x3F;
    pub const UPPER_A: u8 = 0x41;
    pub const UPPER_Z: u8 = 0x5A;
    pub const LOWER_A: u8 = 0x61;
    pub const LOWER_Z: u8 = 0x7A;
}

use char_codes::*;

/// Elements whose content is raw text up to the matching end tag
const RAW_TEXT_TAGS: &[&[u8]] = &[b"script", b"style", b"textarea", b"title"];

/// All the states the tokenizer can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum State {
    Text = 1,

    // Tags
    BeforeTagName,
    InTagName,
    InSelfClosingTag,
    BeforeClosingTagName,
    InClosingTagName,
    AfterClosingTagName,

    // Attributes
    BeforeAttrName,
    InAttrName,
    AfterAttrName,
    BeforeAttrValue,
    InAttrValueDq,
    InAttrValueSq,
    InAttrValueNq,

    // Declarations, processing instructions, comments
    BeforeDeclaration,
    InDeclaration,
    InProcessingInstruction,
    BeforeComment,
    InComment,

    // Content of <script>, <style>, <textarea>, <title>
    InRawText,
}

/// Quote type for attribute values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum QuoteType {
    NoValue = 0,
    Unquoted = 1,
    Single = 2,
    Double = 3,
}

/// Tokenizer callbacks
pub trait Callbacks {
    fn on_text(&mut self, start: usize, end: usize);

    fn on_open_tag_name(&mut self, start: usize, end: usize);
    fn on_open_tag_end(&mut self, end: usize);
    fn on_self_closing_tag(&mut self, end: usize);
    fn on_close_tag(&mut self, start: usize, end: usize);

    fn on_attrib_name(&mut self, start: usize, end: usize);
    fn on_attrib_data(&mut self, start: usize, end: usize);
    fn on_attrib_end(&mut self, quote: QuoteType, end: usize);

    fn on_comment(&mut self, start: usize, end: usize);

    fn on_end(&mut self);
    fn on_error(&mut self, code: ErrorCode, index: usize);
}

/// Check if character is a tag start character (a-z, A-Z)
#[inline]
pub fn is_tag_start_char(c: u8) -> bool {
    (LOWER_A..=LOWER_Z).contains(&c) || (UPPER_A..=UPPER_Z).contains(&c)
}

/// Check if character is whitespace
#[inline]
pub fn is_whitespace(c: u8) -> bool {
    c == SPACE || c == NEWLINE || c == TAB || c == FORM_FEED || c == CARRIAGE_RETURN
}

/// Check if character ends a tag section
#[inline]
pub fn is_end_of_tag_section(c: u8) -> bool {
    c == SLASH || c == GT || is_whitespace(c)
}

/// HTML tokenizer
pub struct Tokenizer<'a, C: Callbacks> {
    input: &'a [u8],
    state: State,
    /// Start of the section being scanned
    section_start: usize,
    index: usize,
    callbacks: C,
    /// Name of the open tag being scanned
    tag_name: (usize, usize),
    /// Raw-text element we are inside of, as a range of `input`
    raw_text_tag: Option<(usize, usize)>,
}

impl<'a, C: Callbacks> Tokenizer<'a, C> {
    pub fn new(input: &'a str, callbacks: C) -> Self {
        Self {
            input: input.as_bytes(),
            state: State::Text,
            section_start: 0,
            index: 0,
            callbacks,
            tag_name: (0, 0),
            raw_text_tag: None,
        }
    }

    /// Consume the tokenizer, returning the callbacks.
    pub fn into_callbacks(self) -> C {
        self.callbacks
    }

    /// Tokenize the input
    pub fn tokenize(&mut self) {
        while self.index < self.input.len() {
            let c = self.input[self.index];

            match self.state {
                State::Text => self.state_text(c),
                State::BeforeTagName => self.state_before_tag_name(c),
                State::InTagName => self.state_in_tag_name(c),
                State::InSelfClosingTag => self.state_in_self_closing_tag(c),
                State::BeforeClosingTagName => self.state_before_closing_tag_name(c),
                State::InClosingTagName => self.state_in_closing_tag_name(c),
                State::AfterClosingTagName => self.state_after_closing_tag_name(c),
                State::BeforeAttrName => self.state_before_attr_name(c),
                State::InAttrName => self.state_in_attr_name(c),
                State::AfterAttrName => self.state_after_attr_name(c),
                State::BeforeAttrValue => self.state_before_attr_value(c),
                State::InAttrValueDq => self.state_in_attr_value_dq(c),
                State::InAttrValueSq => self.state_in_attr_value_sq(c),
                State::InAttrValueNq => self.state_in_attr_value_nq(c),
                State::BeforeDeclaration => self.state_before_declaration(c),
                State::InDeclaration => self.state_in_declaration(c),
                State::InProcessingInstruction => self.state_in_processing_instruction(c),
                State::BeforeComment => self.state_before_comment(c),
                State::InComment => self.state_in_comment(c),
                State::InRawText => self.state_in_raw_text(c),
            }

            self.index += 1;
        }

        self.cleanup();
        self.callbacks.on_end();
    }

    fn cleanup(&mut self) {
        match self.state {
            State::Text | State::BeforeTagName | State::InRawText => {
                if self.section_start < self.index {
                    self.callbacks.on_text(self.section_start, self.index);
                }
            }
            State::InTagName
            | State::InSelfClosingTag
            | State::BeforeClosingTagName
            | State::InClosingTagName
            | State::AfterClosingTagName
            | State::BeforeAttrName
            | State::InAttrName
            | State::AfterAttrName
            | State::BeforeAttrValue
            | State::InAttrValueDq
            | State::InAttrValueSq
            | State::InAttrValueNq => {
                self.callbacks.on_error(ErrorCode::EofInTag, self.index);
            }
            State::BeforeComment | State::InComment => {
                self.callbacks.on_error(ErrorCode::EofInComment, self.index);
            }
            State::BeforeDeclaration | State::InDeclaration | State::InProcessingInstruction => {}
        }
    }

    // ========== State handlers ==========

    fn state_text(&mut self, c: u8) {
        if c == LT {
            if self.index > self.section_start {
                self.callbacks.on_text(self.section_start, self.index);
            }
            self.state = State::BeforeTagName;
            self.section_start = self.index;
        }
    }

    fn state_before_tag_name(&mut self, c: u8) {
        if c == EXCLAMATION_MARK {
            self.state = State::BeforeDeclaration;
            self.section_start = self.index + 1;
        } else if c == QUESTION_MARK {
            self.state = State::InProcessingInstruction;
            self.section_start = self.index + 1;
        } else if is_tag_start_char(c) {
            self.section_start = self.index;
            self.state = State::InTagName;
        } else if c == SLASH {
            self.state = State::BeforeClosingTagName;
        } else {
            // A lone `<` is text; the section still starts at it
            self.state = State::Text;
            self.state_text(c);
        }
    }

    fn state_in_tag_name(&mut self, c: u8) {
        if is_end_of_tag_section(c) {
            self.tag_name = (self.section_start, self.index);
            self.callbacks
                .on_open_tag_name(self.section_start, self.index);
            self.section_start = self.index;
            self.state = State::BeforeAttrName;
            self.state_before_attr_name(c);
        }
    }

    fn state_in_self_closing_tag(&mut self, c: u8) {
        if c == GT {
            self.callbacks.on_self_closing_tag(self.index);
            self.state = State::Text;
            self.section_start = self.index + 1;
        } else if !is_whitespace(c) {
            self.state = State::BeforeAttrName;
            self.state_before_attr_name(c);
        }
    }

    fn state_before_closing_tag_name(&mut self, c: u8) {
        if is_whitespace(c) {
            // Skip
        } else if c == GT {
            self.callbacks
                .on_error(ErrorCode::MissingEndTagName, self.index);
            self.state = State::Text;
            self.section_start = self.index + 1;
        } else {
            self.state = State::InClosingTagName;
            self.section_start = self.index;
        }
    }

    fn state_in_closing_tag_name(&mut self, c: u8) {
        if c == GT || is_whitespace(c) {
            self.callbacks.on_close_tag(self.section_start, self.index);
            self.section_start = self.index + 1;
            self.state = if c == GT {
                State::Text
            } else {
                State::AfterClosingTagName
            };
        }
    }

    fn state_after_closing_tag_name(&mut self, c: u8) {
        if c == GT {
            self.state = State::Text;
            self.section_start = self.index + 1;
        }
    }

    fn state_before_attr_name(&mut self, c: u8) {
        if c == GT {
            self.callbacks.on_open_tag_end(self.index);
            self.section_start = self.index + 1;
            self.state = if self.is_raw_text_tag() {
                self.raw_text_tag = Some(self.tag_name);
                State::InRawText
            } else {
                State::Text
            };
        } else if c == SLASH {
            self.state = State::InSelfClosingTag;
        } else if !is_whitespace(c) {
            self.state = State::InAttrName;
            self.section_start = self.index;
        }
    }

    fn state_in_attr_name(&mut self, c: u8) {
        if c == EQ || is_end_of_tag_section(c) {
            self.callbacks
                .on_attrib_name(self.section_start, self.index);
            self.section_start = self.index;
            self.state = State::AfterAttrName;
            self.state_after_attr_name(c);
        }
    }

    fn state_after_attr_name(&mut self, c: u8) {
        if c == EQ {
            self.state = State::BeforeAttrValue;
        } else if c == SLASH || c == GT {
            self.callbacks.on_attrib_end(QuoteType::NoValue, self.index);
            self.state = State::BeforeAttrName;
            self.state_before_attr_name(c);
        } else if !is_whitespace(c) {
            self.callbacks.on_attrib_end(QuoteType::NoValue, self.index);
            self.state = State::InAttrName;
            self.section_start = self.index;
        }
    }

    fn state_before_attr_value(&mut self, c: u8) {
        if c == DOUBLE_QUOTE {
            self.state = State::InAttrValueDq;
            self.section_start = self.index + 1;
        } else if c == SINGLE_QUOTE {
            self.state = State::InAttrValueSq;
            self.section_start = self.index + 1;
        } else if !is_whitespace(c) {
            self.section_start = self.index;
            self.state = State::InAttrValueNq;
            self.state_in_attr_value_nq(c);
        }
    }

    fn state_in_attr_value_dq(&mut self, c: u8) {
        if c == DOUBLE_QUOTE {
            self.emit_attr_value(QuoteType::Double);
        }
    }

    fn state_in_attr_value_sq(&mut self, c: u8) {
        if c == SINGLE_QUOTE {
            self.emit_attr_value(QuoteType::Single);
        }
    }

    fn state_in_attr_value_nq(&mut self, c: u8) {
        if is_whitespace(c) || c == GT {
            self.emit_attr_value(QuoteType::Unquoted);
            self.state_before_attr_name(c);
        }
    }

    fn emit_attr_value(&mut self, quote: QuoteType) {
        if self.section_start < self.index {
            self.callbacks
                .on_attrib_data(self.section_start, self.index);
        }
        self.callbacks.on_attrib_end(quote, self.index);
        self.section_start = self.index + 1;
        self.state = State::BeforeAttrName;
    }

    fn state_before_declaration(&mut self, c: u8) {
        if c == DASH {
            self.state = State::BeforeComment;
            self.section_start = self.index + 1;
        } else {
            self.state = State::InDeclaration;
            self.state_in_declaration(c);
        }
    }

    fn state_in_declaration(&mut self, c: u8) {
        if c == GT {
            self.state = State::Text;
            self.section_start = self.index + 1;
        }
    }

    fn state_in_processing_instruction(&mut self, c: u8) {
        if c == GT {
            self.state = State::Text;
            self.section_start = self.index + 1;
        }
    }

    fn state_before_comment(&mut self, c: u8) {
        if c == DASH {
            self.state = State::InComment;
            self.section_start = self.index + 1;
        } else {
            self.state = State::InDeclaration;
            self.state_in_declaration(c);
        }
    }

    fn state_in_comment(&mut self, c: u8) {
        if c == DASH
            && self.input.get(self.index + 1) == Some(&DASH)
            && self.input.get(self.index + 2) == Some(&GT)
        {
            self.callbacks.on_comment(self.section_start, self.index);
            self.index += 2;
            self.state = State::Text;
            self.section_start = self.index + 1;
        }
    }

    fn state_in_raw_text(&mut self, c: u8) {
        if c != LT || !self.at_raw_text_end_tag() {
            return;
        }
        if self.index > self.section_start {
            self.callbacks.on_text(self.section_start, self.index);
        }
        self.raw_text_tag = None;
        self.state = State::BeforeTagName;
        self.section_start = self.index;
    }

    fn is_raw_text_tag(&self) -> bool {
        let (start, end) = self.tag_name;
        let name = &self.input[start..end];
        RAW_TEXT_TAGS
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(name))
    }

    /// Whether `index` (a `<`) starts the end tag of the current raw-text element.
    fn at_raw_text_end_tag(&self) -> bool {
        let Some((start, end)) = self.raw_text_tag else {
            return false;
        };
        let name = &self.input[start..end];
        let after_slash = self.index + 2;
        let after_name = after_slash + name.len();
        self.input.get(self.index + 1) == Some(&SLASH)
            && self
                .input
                .get(after_slash..after_name)
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
            && self
                .input
                .get(after_name)
                .map_or(true, |&c| is_end_of_tag_section(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every callback as a readable event
    #[derive(Default)]
    struct Recorder<'s> {
        source: &'s str,
        events: Vec<String>,
    }

    impl Callbacks for Recorder<'_> {
        fn on_text(&mut self, start: usize, end: usize) {
            self.events.push(format!("text {:?}", &self.source[start..end]));
        }
        fn on_open_tag_name(&mut self, start: usize, end: usize) {
            self.events.push(format!("open {}", &self.source[start..end]));
        }
        fn on_open_tag_end(&mut self, _end: usize) {
            self.events.push("open-end".into());
        }
        fn on_self_closing_tag(&mut self, _end: usize) {
            self.events.push("self-close".into());
        }
        fn on_close_tag(&mut self, start: usize, end: usize) {
            self.events.push(format!("close {}", &self.source[start..end]));
        }
        fn on_attrib_name(&mut self, start: usize, end: usize) {
            self.events.push(format!("attr {}", &self.source[start..end]));
        }
        fn on_attrib_data(&mut self, start: usize, end: usize) {
            self.events.push(format!("data {:?}", &self.source[start..end]));
        }
        fn on_attrib_end(&mut self, quote: QuoteType, _end: usize) {
            self.events.push(format!("attr-end {quote:?}"));
        }
        fn on_comment(&mut self, start: usize, end: usize) {
            self.events.push(format!("comment {:?}", &self.source[start..end]));
        }
        fn on_end(&mut self) {}
        fn on_error(&mut self, code: ErrorCode, _index: usize) {
            self.events.push(format!("error {code:?}"));
        }
    }

    fn tokenize(source: &str) -> Vec<String> {
        let mut tokenizer = Tokenizer::new(
            source,
            Recorder {
                source,
                events: Vec::new(),
            },
        );
        tokenizer.tokenize();
        tokenizer.into_callbacks().events
    }

    #[test]
    fn test_attribute_value_is_verbatim() {
        let events = tokenize(r#"<a title="x &amp; <y>">"#);
        assert_eq!(
            events,
            [
                "open a",
                "attr title",
                r#"data "x &amp; <y>""#,
                "attr-end Double",
                "open-end",
            ]
        );
    }

    #[test]
    fn test_quote_kinds() {
        let events = tokenize("<i a='1' b=2 c>");
        assert_eq!(
            events,
            [
                "open i",
                "attr a",
                r#"data "1""#,
                "attr-end Single",
                "attr b",
                r#"data "2""#,
                "attr-end Unquoted",
                "attr c",
                "attr-end NoValue",
                "open-end",
            ]
        );
    }

    #[test]
    fn test_unquoted_value_keeps_slash() {
        let events = tokenize("<a href=/x/y>");
        assert!(events.contains(&r#"data "/x/y""#.to_string()));
    }

    #[test]
    fn test_lone_lt_is_text() {
        let events = tokenize("a < b");
        assert_eq!(events, [r#"text "a ""#, r#"text "< b""#]);
    }

    #[test]
    fn test_comment() {
        let events = tokenize("<!-- hi -->x");
        assert_eq!(events, [r#"comment " hi ""#, r#"text "x""#]);
    }

    #[test]
    fn test_raw_text_element() {
        let events = tokenize("<style>a > b { }</style><p>");
        assert_eq!(
            events,
            [
                "open style",
                "open-end",
                r#"text "a > b { }""#,
                "close style",
                "open p",
                "open-end",
            ]
        );
    }

    #[test]
    fn test_eof_in_tag() {
        assert_eq!(
            tokenize("<div title=\"x"),
            ["open div", "attr title", "error EofInTag"]
        );
        assert_eq!(tokenize("<div"), ["error EofInTag"]);
        assert_eq!(tokenize("<p a='1'").last().map(String::as_str), Some("error EofInTag"));
    }

    #[test]
    fn test_eof_in_comment() {
        assert_eq!(tokenize("<!-- open"), ["error EofInComment"]);
    }
}
