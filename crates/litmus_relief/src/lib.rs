//! Relief - The sculptured surface of markup inside templates.
//!
//! This crate defines the element tree a markup extractor produces for one
//! tagged template literal, the errors it may raise, and the
//! [`TemplateAnalyzer`] contract through which lint rules consume it.
//!
//! ## Architecture
//!
//! ```text
//! litmus_patina (rules) ──> TemplateAnalyzer (this crate) <── litmus_armature (parser)
//! ```

pub mod analyzer;
pub mod ast;
pub mod errors;

pub use analyzer::{Span, TaggedTemplate, TemplateAnalyzer, TemplateQuasi, TemplateVisitor};
pub use ast::*;
pub use errors::{CompilerError, ErrorCode, TemplateError};
