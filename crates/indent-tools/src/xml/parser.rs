//! Markup parser
//!
//! Recursive descent over the tokens produced by [`MarkupLexer`]. The parser
//! accepts a single root element, optionally preceded by an XML declaration,
//! comments and a doctype, and rebuilds the [`Element`] tree that rendered it.

use tracing::debug;

use crate::error::{Error, ErrorKind, Result, Span};
use crate::lexer::{MarkupLexer, TokenKind};
use crate::xml::config::{Flavor, ParserConfig, ParsingContext};
use crate::xml::model::{is_void_element, Element};

/// Markup parser
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: MarkupLexer<'a>,
    config: ParserConfig,
    context: ParsingContext,
    input_len: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser for XML input with default limits
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    pub fn with_config(input: &'a str, config: ParserConfig) -> Self {
        Self {
            lexer: MarkupLexer::new(input),
            config,
            context: ParsingContext::new(),
            input_len: input.len(),
        }
    }

    /// Parse exactly one root element
    ///
    /// A doctype before the root is kept on the returned element. Anything
    /// after the root other than whitespace, comments and processing
    /// instructions is an error.
    pub fn parse_one(&mut self) -> Result<Element> {
        self.config.validate_size(self.input_len)?;

        let mut token = self.lexer.next_token()?;
        let mut doctype = None;
        if let TokenKind::Doctype(value) = token.kind {
            doctype = Some(value);
            token = self.lexer.next_token()?;
        }

        let mut root = match token.kind {
            TokenKind::OpenTag(name) => self.parse_element(name, token.span)?,
            TokenKind::Eof => {
                return Err(Error::with_message(
                    ErrorKind::UnexpectedEof,
                    token.span,
                    "expected a root element",
                ));
            }
            other => return Err(expected("a root element", &other, token.span)),
        };
        root.set_doctype(doctype);

        let trailing = self.lexer.next_token()?;
        match trailing.kind {
            TokenKind::Eof => {}
            TokenKind::OpenTag(name) => {
                return Err(Error::new(ErrorKind::MultipleRoots, trailing.span)
                    .with_snippet(format!("<{name}")));
            }
            _ => return Err(Error::new(ErrorKind::TrailingContent, trailing.span)),
        }

        debug!(
            root = root.tag(),
            children = root.children().len(),
            bytes = self.input_len,
            "parsed document"
        );
        Ok(root)
    }

    fn parse_element(&mut self, tag: String, open: Span) -> Result<Element> {
        self.context.enter_nested(&self.config, open.start)?;
        let mut element = Element::new(tag);

        loop {
            let token = self.lexer.next_token()?;
            match token.kind {
                TokenKind::Attribute { name, value } => {
                    if self.has_attribute(&element, &name) {
                        return Err(Error::new(
                            ErrorKind::DuplicateAttribute { key: name.clone() },
                            token.span,
                        )
                        .with_snippet(name));
                    }
                    element.insert_attribute(name, value);
                }
                TokenKind::SelfClose => {
                    self.context.exit_nested();
                    return Ok(element);
                }
                TokenKind::TagEnd => break,
                TokenKind::Eof => return Err(Error::new(ErrorKind::UnexpectedEof, token.span)),
                other => return Err(expected("an attribute or `>`", &other, token.span)),
            }
        }

        if self.config.flavor == Flavor::Html && is_void_element(element.tag()) {
            self.lexer.close_element();
            self.context.exit_nested();
            return Ok(element);
        }

        self.parse_children(&mut element)?;
        self.context.exit_nested();
        Ok(element)
    }

    fn parse_children(&mut self, element: &mut Element) -> Result<()> {
        loop {
            let token = self.lexer.next_token()?;
            match token.kind {
                TokenKind::Text(text) => element.push_child(text),
                TokenKind::OpenTag(name) => {
                    let child = self.parse_element(name, token.span)?;
                    element.push_child(child);
                }
                TokenKind::CloseTag(name) => {
                    if self.closes(element.tag(), &name) {
                        return Ok(());
                    }
                    let snippet = format!("</{name}>");
                    return Err(Error::new(
                        ErrorKind::MismatchedTag {
                            expected: element.tag().to_string(),
                            found: name,
                        },
                        token.span,
                    )
                    .with_snippet(snippet));
                }
                TokenKind::Eof => {
                    return Err(Error::with_message(
                        ErrorKind::UnexpectedEof,
                        token.span,
                        format!("expected </{}> before end of input", element.tag()),
                    ));
                }
                other => return Err(expected("content or a closing tag", &other, token.span)),
            }
        }
    }

    // HTML attribute names are case-insensitive.
    fn has_attribute(&self, element: &Element, name: &str) -> bool {
        match self.config.flavor {
            Flavor::Xml => element.has_attribute(name),
            Flavor::Html => element
                .attributes()
                .keys()
                .any(|key| key.eq_ignore_ascii_case(name)),
        }
    }

    fn closes(&self, open: &str, close: &str) -> bool {
        match self.config.flavor {
            Flavor::Xml => open == close,
            Flavor::Html => open.eq_ignore_ascii_case(close),
        }
    }
}

fn expected(what: &str, found: &TokenKind, span: Span) -> Error {
    Error::new(
        ErrorKind::Expected {
            expected: what.to_string(),
            found: found.describe(),
        },
        span,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::model::Node;

    fn parse(input: &str) -> Result<Element> {
        Parser::new(input).parse_one()
    }

    fn kind_of(input: &str) -> Option<ErrorKind> {
        parse(input).err().map(|err| err.kind().clone())
    }

    #[test]
    fn test_parse_attributes_and_text() -> Result<()> {
        let root = parse(r#"<address type="Residential"><street>123 Main St</street></address>"#)?;
        assert_eq!(root.tag(), "address");
        assert_eq!(root.attribute("type"), Some("Residential"));
        let street = root.find("street").map(Element::text);
        assert_eq!(street.as_deref(), Some("123 Main St"));
        Ok(())
    }

    #[test]
    fn test_mixed_content_order() -> Result<()> {
        let root = parse("<p>Hello, <b>world</b>!</p>")?;
        let children = root.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children.first().and_then(Node::as_text), Some("Hello, "));
        assert_eq!(
            children.get(1).and_then(Node::as_element).map(Element::tag),
            Some("b")
        );
        assert_eq!(children.get(2).and_then(Node::as_text), Some("!"));
        Ok(())
    }

    #[test]
    fn test_mismatched_close_tag() {
        let err = parse("<a><b></a>").err();
        assert_eq!(
            err.as_ref().map(|e| e.kind().clone()),
            Some(ErrorKind::MismatchedTag {
                expected: "b".to_string(),
                found: "a".to_string(),
            })
        );
        assert_eq!(err.as_ref().and_then(Error::snippet), Some("</a>"));
        assert_eq!(err.map(|e| e.position().col), Some(7));
    }

    #[test]
    fn test_unclosed_root() {
        let err = parse("<a><b></b>").err();
        assert_eq!(
            err.as_ref().map(|e| e.kind().clone()),
            Some(ErrorKind::UnexpectedEof)
        );
        assert_eq!(
            err.as_ref().map(Error::message),
            Some("expected </a> before end of input")
        );
    }

    #[test]
    fn test_duplicate_attribute() {
        assert_eq!(
            kind_of(r#"<a x="1" x="2"/>"#),
            Some(ErrorKind::DuplicateAttribute {
                key: "x".to_string()
            })
        );
    }

    #[test]
    fn test_html_duplicate_attribute_ignores_case() -> Result<()> {
        let input = r#"<div CLASS="x" class="y"></div>"#;
        let root = parse(input)?;
        assert_eq!(root.attributes().len(), 2);

        let err = Parser::with_config(input, ParserConfig::html()).parse_one().err();
        assert_eq!(
            err.map(|e| e.kind().clone()),
            Some(ErrorKind::DuplicateAttribute {
                key: "class".to_string()
            })
        );
        Ok(())
    }

    #[test]
    fn test_valueless_attribute() -> Result<()> {
        let root = parse(r#"<input disabled name="q"/>"#)?;
        assert_eq!(root.attributes().get("disabled"), Some(&None));
        assert_eq!(root.attribute("name"), Some("q"));
        assert_eq!(
            kind_of("<input disabled disabled/>"),
            Some(ErrorKind::DuplicateAttribute {
                key: "disabled".to_string()
            })
        );
        Ok(())
    }

    #[test]
    fn test_multiple_roots_and_trailing_text() {
        assert_eq!(kind_of("<a/><b/>"), Some(ErrorKind::MultipleRoots));
        assert_eq!(kind_of("<a/> tail"), Some(ErrorKind::TrailingContent));
        assert!(parse("<a/>\n<!-- done -->\n").is_ok());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kind_of(""), Some(ErrorKind::UnexpectedEof));
        assert_eq!(kind_of("  \n<!-- nothing -->"), Some(ErrorKind::UnexpectedEof));
        assert_eq!(
            kind_of("hello"),
            Some(ErrorKind::Expected {
                expected: "a root element".to_string(),
                found: "text".to_string(),
            })
        );
    }

    #[test]
    fn test_doctype_is_kept_on_root() -> Result<()> {
        let root = parse("<!DOCTYPE html>\n<html></html>")?;
        assert_eq!(root.doctype(), Some("html"));
        Ok(())
    }

    #[test]
    fn test_html_void_elements() -> Result<()> {
        let input = r#"<head><meta charset="utf-8"><title>x</title></head>"#;
        assert!(matches!(
            kind_of(input),
            Some(ErrorKind::MismatchedTag { .. })
        ));

        let root = Parser::with_config(input, ParserConfig::html()).parse_one()?;
        let tags: Vec<_> = root.child_elements().map(Element::tag).collect();
        assert_eq!(tags, ["meta", "title"]);
        Ok(())
    }

    #[test]
    fn test_html_close_tags_ignore_case() -> Result<()> {
        let root = Parser::with_config("<DIV>x</div>", ParserConfig::html()).parse_one()?;
        assert_eq!(root.tag(), "DIV");
        assert!(matches!(
            kind_of("<DIV>x</div>"),
            Some(ErrorKind::MismatchedTag { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_depth_limit() {
        let config = ParserConfig {
            max_depth: 3,
            ..ParserConfig::default()
        };
        let ok = Parser::with_config("<a><b><c/></b></a>", config).parse_one();
        assert!(ok.is_ok());
        let err = Parser::with_config("<a><b><c><d/></c></b></a>", config).parse_one();
        assert_eq!(
            err.err().map(|e| e.kind().clone()),
            Some(ErrorKind::MaxDepthExceeded { max: 3 })
        );
    }

    #[test]
    fn test_size_limit() {
        let config = ParserConfig {
            max_size: 8,
            ..ParserConfig::default()
        };
        let err = Parser::with_config("<a>123456789</a>", config).parse_one();
        assert_eq!(
            err.err().map(|e| e.kind().clone()),
            Some(ErrorKind::MaxSizeExceeded { max: 8 })
        );
    }
}
