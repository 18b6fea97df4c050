//! Lexer module for markup tokenization

pub mod cursor;
pub mod markup;
pub mod token;

pub use cursor::Cursor;
pub use markup::{LexState, MarkupLexer};
pub use token::{Token, TokenKind};
