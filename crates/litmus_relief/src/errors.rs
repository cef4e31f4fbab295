//! Markup parse errors.

use crate::ast::SourceLocation;
use thiserror::Error;

/// Markup error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    /// Input ended inside a start tag or attribute value
    EofInTag,
    /// Input ended inside a comment
    EofInComment,
    /// `</>` with no tag name
    MissingEndTagName,
    /// Element left open at the end of input
    MissingEndTag,
    /// End tag with no matching open element
    InvalidEndTag,
    /// Same attribute name twice on one element
    DuplicateAttribute,
}

impl ErrorCode {
    /// Fatal errors make the whole template unanalysable.
    #[inline]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::EofInTag | Self::EofInComment)
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::EofInTag => "Unexpected end of template inside a tag",
            Self::EofInComment => "Unexpected end of template inside a comment",
            Self::MissingEndTagName => "End tag name is missing",
            Self::MissingEndTag => "Element is missing its end tag",
            Self::InvalidEndTag => "End tag has no matching start tag",
            Self::DuplicateAttribute => "Duplicate attribute",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// An error raised while parsing markup, with its template-coordinate location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerError {
    pub code: ErrorCode,
    pub loc: Option<SourceLocation>,
}

impl CompilerError {
    pub fn new(code: ErrorCode, loc: Option<SourceLocation>) -> Self {
        Self { code, loc }
    }

    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.code.is_fatal()
    }
}

impl std::fmt::Display for CompilerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.loc {
            Some(loc) => write!(
                f,
                "{} ({}:{})",
                self.code, loc.start.line, loc.start.column
            ),
            None => write!(f, "{}", self.code),
        }
    }
}

/// Failure to build an analyzer for a tagged template
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template markup could not be parsed: {0}")]
    Parse(CompilerError),

    #[error("template has {quasis} literal segments but {expressions} interpolations")]
    MalformedTemplate { quasis: usize, expressions: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Position;

    #[test]
    fn test_fatal_codes() {
        assert!(ErrorCode::EofInTag.is_fatal());
        assert!(ErrorCode::EofInComment.is_fatal());
        assert!(!ErrorCode::InvalidEndTag.is_fatal());
        assert!(!ErrorCode::MissingEndTag.is_fatal());
        assert!(!ErrorCode::DuplicateAttribute.is_fatal());
        assert!(!ErrorCode::MissingEndTagName.is_fatal());
    }

    #[test]
    fn test_display_with_location() {
        let loc = SourceLocation::new(Position::new(4, 2, 3), Position::new(5, 2, 4), "<");
        let err = CompilerError::new(ErrorCode::InvalidEndTag, Some(loc));
        assert_eq!(err.to_string(), "End tag has no matching start tag (2:3)");

        let template_err = TemplateError::Parse(err);
        assert_eq!(
            template_err.to_string(),
            "template markup could not be parsed: End tag has no matching start tag (2:3)"
        );
    }
}
