//! Error types for indent-tools

use std::fmt;
use thiserror::Error;

/// Position in markup input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in markup input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn point(pos: Pos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn empty() -> Self {
        Self::point(Pos::new(0, 0, 0))
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    UnexpectedEof,
    Expected { expected: String, found: String },
    MismatchedTag { expected: String, found: String },
    UnquotedAttribute,
    InvalidName,
    InvalidEntity { entity: String },
    DuplicateAttribute { key: String },
    MultipleRoots,
    TrailingContent,
    UnsupportedMarkup,
    InvalidUtf8,
    MaxDepthExceeded { max: usize },
    MaxSizeExceeded { max: usize },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::Expected { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::MismatchedTag { expected, found } => {
                write!(f, "mismatched closing tag: expected </{expected}>, found </{found}>")
            }
            Self::UnquotedAttribute => write!(f, "attribute value must be quoted"),
            Self::InvalidName => write!(f, "invalid tag or attribute name"),
            Self::InvalidEntity { entity } => write!(f, "invalid entity: &{entity};"),
            Self::DuplicateAttribute { key } => write!(f, "duplicate attribute: {key}"),
            Self::MultipleRoots => write!(f, "more than one root element"),
            Self::TrailingContent => write!(f, "unexpected content after root element"),
            Self::UnsupportedMarkup => write!(f, "unsupported markup"),
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
        }
    }
}

/// Error raised while parsing markup
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
    snippet: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
            snippet: None,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
            snippet: None,
        }
    }

    /// Attach the input text found near the failure
    #[must_use]
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Where the failure starts
    pub fn position(&self) -> Pos {
        self.span.start
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn snippet(&self) -> Option<&str> {
        self.snippet.as_deref()
    }

    /// Create error at specific position
    pub fn at(kind: ErrorKind, pos: Pos) -> Self {
        Self::new(kind, Span::point(pos))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error at {}: {}", self.span.start, self.message)?;
        if let Some(snippet) = &self.snippet {
            write!(f, " near `{snippet}`")?;
        }
        Ok(())
    }
}

/// The error returned by every parse entry point
pub type ParseError = Error;

/// Result type alias for indent-tools
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_display() {
        let pos = Pos::new(42, 10, 5);
        assert_eq!(pos.to_string(), "10:5");
    }

    #[test]
    fn test_error_creation() {
        let err = Error::at(ErrorKind::UnexpectedEof, Pos::new(0, 1, 1));
        assert_eq!(err.kind(), &ErrorKind::UnexpectedEof);
        assert_eq!(err.position(), Pos::new(0, 1, 1));
        assert_eq!(err.snippet(), None);
    }

    #[test]
    fn test_error_display() {
        let err = Error::at(
            ErrorKind::MismatchedTag {
                expected: "b".to_string(),
                found: "a".to_string(),
            },
            Pos::new(6, 1, 7),
        )
        .with_snippet("</a>");
        let display = err.to_string();
        assert!(display.starts_with("error at 1:7"));
        assert!(display.contains("expected </b>, found </a>"));
        assert!(display.ends_with("near `</a>`"));
    }
}
