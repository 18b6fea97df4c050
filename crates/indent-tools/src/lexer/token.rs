//! Markup token types

use crate::error::Span;

/// Token with location information
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Token kinds produced by the markup lexer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// `<!doctype VALUE>` before the root element
    Doctype(String),
    /// `<name`
    OpenTag(String),
    /// `key="value"` or a bare `key` inside an open tag, value already unescaped
    Attribute { name: String, value: Option<String> },
    /// `>` ending an open tag
    TagEnd,
    /// `/>` ending an open tag
    SelfClose,
    /// `</name>`
    CloseTag(String),
    /// Text content with layout whitespace removed and entities decoded
    Text(String),
    Eof,
}

impl TokenKind {
    /// Short human readable description used in error messages
    pub fn describe(&self) -> String {
        match self {
            Self::Doctype(_) => "doctype declaration".to_string(),
            Self::OpenTag(name) => format!("<{name}>"),
            Self::Attribute { name, .. } => format!("attribute `{name}`"),
            Self::TagEnd => "`>`".to_string(),
            Self::SelfClose => "`/>`".to_string(),
            Self::CloseTag(name) => format!("</{name}>"),
            Self::Text(_) => "text".to_string(),
            Self::Eof => "end of input".to_string(),
        }
    }
}
