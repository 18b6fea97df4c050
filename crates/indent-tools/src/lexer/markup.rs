//! State machine tokenizer for XML/HTML markup
//!
//! The lexer walks the input once. Its state mirrors where it is in the
//! markup: looking for the root's open tag, reading a tag name, reading
//! attributes, reading element content, or reading a close tag. Element
//! depth is tracked so the lexer knows whether a finished element leaves it
//! inside a parent or back at the top level.
//!
//! Text tokens have layout whitespace removed: a whitespace run at either
//! edge of a text segment is dropped when it contains a line break, and a
//! segment that is only such whitespace produces no token at all.

use tracing::trace;

use crate::error::{Error, ErrorKind, Pos, Result, Span};
use crate::lexer::cursor::{is_whitespace, Cursor};
use crate::lexer::token::{Token, TokenKind};
use crate::xml::escape::{is_markup_whitespace, unescape};

const SNIPPET_LEN: usize = 24;

/// Lexer states
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexState {
    /// Top level: skipping whitespace, declarations and comments
    SeekOpenTag,
    /// Just consumed `<`, expecting a tag name
    ReadTagName,
    /// Inside an open tag, expecting attributes, `>` or `/>`
    ReadAttributes,
    /// Between an open and a close tag, reading text and child tags
    InsideElement,
    /// Just consumed `</`, expecting the tag name and `>`
    SeekCloseTag,
}

/// Markup lexer
#[derive(Debug)]
pub struct MarkupLexer<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
    state: LexState,
    depth: usize,
    tag_start: Pos,
}

impl<'a> MarkupLexer<'a> {
    pub const fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: Cursor::new(source.as_bytes()),
            state: LexState::SeekOpenTag,
            depth: 0,
            tag_start: Pos::new(0, 1, 1),
        }
    }

    pub const fn state(&self) -> LexState {
        self.state
    }

    /// Number of open tags not yet closed
    pub const fn depth(&self) -> usize {
        self.depth
    }

    pub const fn position(&self) -> Pos {
        self.cursor.position()
    }

    /// Produce the next token
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            let token = match self.state {
                LexState::SeekOpenTag => self.seek_open_tag()?,
                LexState::ReadTagName => Some(self.read_tag_name()?),
                LexState::ReadAttributes => Some(self.read_attribute()?),
                LexState::InsideElement => self.inside_element()?,
                LexState::SeekCloseTag => Some(self.read_close_tag()?),
            };
            if let Some(token) = token {
                return Ok(token);
            }
        }
    }

    /// Treat the element whose `>` was just read as complete
    ///
    /// Used for HTML void elements, which never have a close tag.
    pub fn close_element(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.transition(self.after_element());
    }

    fn seek_open_tag(&mut self) -> Result<Option<Token>> {
        self.cursor.skip_whitespace();
        let start = self.cursor.position();

        match self.cursor.current() {
            None => Ok(Some(Token::new(TokenKind::Eof, Span::point(start)))),
            Some(b'<') => {
                if self.cursor.starts_with(b"<?") {
                    self.skip_markup(b"?>")?;
                    Ok(None)
                } else if self.cursor.starts_with(b"<!--") {
                    self.skip_markup(b"-->")?;
                    Ok(None)
                } else if self.cursor.starts_with_ignore_case(b"<!doctype") {
                    self.read_doctype().map(Some)
                } else if self.cursor.starts_with(b"<!") {
                    Err(self.error_here(ErrorKind::UnsupportedMarkup))
                } else if self.cursor.starts_with(b"</") {
                    Err(self.error_here(ErrorKind::Expected {
                        expected: "an opening tag".to_string(),
                        found: "a closing tag".to_string(),
                    }))
                } else {
                    self.tag_start = start;
                    self.cursor.advance();
                    self.transition(LexState::ReadTagName);
                    Ok(None)
                }
            }
            Some(_) => {
                let text = self.read_raw_text()?;
                let span = Span::new(start, self.cursor.position());
                Ok(Some(Token::new(TokenKind::Text(text.trim().to_string()), span)))
            }
        }
    }

    fn read_doctype(&mut self) -> Result<Token> {
        let start = self.cursor.position();
        self.cursor.advance_by(b"<!doctype".len());
        self.cursor.skip_whitespace();

        let value_start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'>' {
                break;
            }
            self.cursor.advance();
        }
        if self.cursor.is_eof() {
            return Err(self.error_here(ErrorKind::UnexpectedEof));
        }
        let value = self.str_from(value_start)?.trim().to_string();
        self.cursor.advance();

        Ok(Token::new(
            TokenKind::Doctype(value),
            Span::new(start, self.cursor.position()),
        ))
    }

    fn read_tag_name(&mut self) -> Result<Token> {
        let name = self.read_name()?;
        self.transition(LexState::ReadAttributes);
        Ok(Token::new(
            TokenKind::OpenTag(name),
            Span::new(self.tag_start, self.cursor.position()),
        ))
    }

    fn read_attribute(&mut self) -> Result<Token> {
        self.cursor.skip_whitespace();
        let start = self.cursor.position();

        let kind = match self.cursor.current() {
            None => return Err(self.error_here(ErrorKind::UnexpectedEof)),
            Some(b'>') => {
                self.cursor.advance();
                self.depth += 1;
                self.transition(LexState::InsideElement);
                TokenKind::TagEnd
            }
            Some(b'/') => {
                if self.cursor.peek(1) != Some(b'>') {
                    return Err(self.expected("`/>`"));
                }
                self.cursor.advance_by(2);
                self.transition(self.after_element());
                TokenKind::SelfClose
            }
            Some(_) => {
                let name = self.read_name()?;
                self.cursor.skip_whitespace();
                let value = if self.cursor.consume(b'=') {
                    self.cursor.skip_whitespace();
                    Some(self.read_attribute_value()?)
                } else {
                    None
                };
                TokenKind::Attribute { name, value }
            }
        };

        Ok(Token::new(kind, Span::new(start, self.cursor.position())))
    }

    fn read_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(q @ (b'"' | b'\'')) => q,
            Some(_) => return Err(self.error_here(ErrorKind::UnquotedAttribute)),
            None => return Err(self.error_here(ErrorKind::UnexpectedEof)),
        };
        let value_pos = self.cursor.position();
        self.cursor.advance();

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.str_from(start)?;
                self.cursor.advance();
                return self.decode(raw, value_pos);
            }
            self.cursor.advance();
        }

        Err(Error::with_message(
            ErrorKind::UnexpectedEof,
            Span::new(value_pos, self.cursor.position()),
            "unterminated attribute value",
        ))
    }

    fn inside_element(&mut self) -> Result<Option<Token>> {
        let start = self.cursor.position();

        match self.cursor.current() {
            None => Ok(Some(Token::new(TokenKind::Eof, Span::point(start)))),
            Some(b'<') => {
                self.tag_start = start;
                if self.cursor.starts_with(b"</") {
                    self.cursor.advance_by(2);
                    self.transition(LexState::SeekCloseTag);
                } else if self.cursor.starts_with(b"<!") || self.cursor.starts_with(b"<?") {
                    return Err(self.error_here(ErrorKind::UnsupportedMarkup));
                } else {
                    self.cursor.advance();
                    self.transition(LexState::ReadTagName);
                }
                Ok(None)
            }
            Some(_) => {
                let raw = self.read_raw_text()?;
                let text = strip_layout(raw);
                if text.is_empty() {
                    return Ok(None);
                }
                let text = self.decode(text, start)?;
                Ok(Some(Token::new(
                    TokenKind::Text(text),
                    Span::new(start, self.cursor.position()),
                )))
            }
        }
    }

    fn read_close_tag(&mut self) -> Result<Token> {
        let name = self.read_name()?;
        self.cursor.skip_whitespace();
        if !self.cursor.consume(b'>') {
            return Err(self.expected("`>`"));
        }

        self.depth = self.depth.saturating_sub(1);
        self.transition(self.after_element());
        Ok(Token::new(
            TokenKind::CloseTag(name),
            Span::new(self.tag_start, self.cursor.position()),
        ))
    }

    fn read_name(&mut self) -> Result<String> {
        let start = self.cursor.pos();
        match self.cursor.current() {
            Some(b) if is_name_start(b) => self.cursor.advance(),
            Some(_) => return Err(self.error_here(ErrorKind::InvalidName)),
            None => return Err(self.error_here(ErrorKind::UnexpectedEof)),
        }
        while self.cursor.current().is_some_and(is_name_char) {
            self.cursor.advance();
        }
        self.str_from(start).map(str::to_string)
    }

    fn read_raw_text(&mut self) -> Result<&'a str> {
        let start = self.cursor.pos();
        while self.cursor.current().is_some_and(|b| b != b'<') {
            self.cursor.advance();
        }
        self.str_from(start)
    }

    fn skip_markup(&mut self, terminator: &[u8]) -> Result<()> {
        let start = self.cursor.position();
        if self.cursor.skip_past(terminator) {
            Ok(())
        } else {
            Err(Error::with_message(
                ErrorKind::UnexpectedEof,
                Span::new(start, self.cursor.position()),
                "unterminated markup declaration",
            ))
        }
    }

    fn decode(&self, raw: &str, pos: Pos) -> Result<String> {
        unescape(raw).map(|text| text.into_owned()).map_err(|err| {
            Error::at(ErrorKind::InvalidEntity { entity: err.entity }, pos)
                .with_snippet(snippet(raw.as_bytes()))
        })
    }

    fn str_from(&self, start: usize) -> Result<&'a str> {
        self.source
            .get(start..self.cursor.pos())
            .ok_or_else(|| self.error_here(ErrorKind::InvalidUtf8))
    }

    const fn after_element(&self) -> LexState {
        if self.depth == 0 {
            LexState::SeekOpenTag
        } else {
            LexState::InsideElement
        }
    }

    fn transition(&mut self, next: LexState) {
        trace!(from = ?self.state, to = ?next, depth = self.depth, "lexer transition");
        self.state = next;
    }

    fn expected(&self, expected: &str) -> Error {
        let found = match self.cursor.current() {
            None => "end of input".to_string(),
            Some(b) if b.is_ascii() && !b.is_ascii_control() => format!("`{}`", char::from(b)),
            Some(b) if is_whitespace(b) => "whitespace".to_string(),
            Some(_) => "non-ASCII text".to_string(),
        };
        self.error_here(ErrorKind::Expected {
            expected: expected.to_string(),
            found,
        })
    }

    fn error_here(&self, kind: ErrorKind) -> Error {
        Error::at(kind, self.cursor.position()).with_snippet(snippet(self.cursor.remaining()))
    }
}

/// Remove layout whitespace from the edges of a raw text segment
fn strip_layout(raw: &str) -> &str {
    let body = raw.trim_start_matches(is_markup_whitespace);
    let (leading, _) = raw.split_at(raw.len() - body.len());
    let text = if leading.contains('\n') { body } else { raw };

    let body = text.trim_end_matches(is_markup_whitespace);
    let (_, trailing) = text.split_at(body.len());
    if trailing.contains('\n') {
        body
    } else {
        text
    }
}

fn snippet(rest: &[u8]) -> String {
    let line = rest.split(|&b| b == b'\n').next().unwrap_or_default();
    let text = String::from_utf8_lossy(line);
    text.chars().take(SNIPPET_LEN).collect()
}

// Digits are accepted at the start so generated names such as `1st` survive a
// round trip.
const fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b':') || b >= 0x80
}

const fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'-' | b'.')
}
