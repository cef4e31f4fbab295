//! Armature - The internal framework that shapes template markup.
//!
//! Like the wire skeleton inside a sculpture, this crate gives the markup of
//! a tagged template its structure: a byte-level [`tokenizer`], a
//! [`parser`] building the element tree defined in `litmus_relief`, and the
//! [`HtmlTemplateAnalyzer`] that maps that tree back to the file.

pub mod analyzer;
pub mod parser;
pub mod tokenizer;

pub use analyzer::{placeholder, HtmlTemplateAnalyzer};
pub use parser::{is_void_tag, parse, Parser};
