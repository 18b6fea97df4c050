//! indent-tools - indentation-aware text building and round-tripping markup
//!
//! Two utilities for generating text:
//!
//! - [`IndentBuilder`] collects lines while tracking an indentation depth, and
//!   [`IndentWriter`] streams the same indentation to an [`std::io::Write`].
//! - [`Factory`] builds XML/HTML [`Element`] trees that [`Element::render`]
//!   writes as indented markup and [`parse_one`] reads back, so that
//!   rendering a parsed render reproduces the same text.
//!
//! # Quick Start
//!
//! ```
//! use indent_tools::{parse_one, Factory, Flavor};
//! # fn main() -> Result<(), indent_tools::Error> {
//! let x = Factory::new();
//! let address = x
//!     .tag("address")
//!     .attr("type", "Residential")
//!     .children([
//!         x.tag("street").text("123 Main St"),
//!         x.tag("city").text("Bremerton"),
//!         x.tag("state").text("WA"),
//!         x.tag("zip_code").text(98310),
//!     ])
//!     .build();
//!
//! let xml = address.render(Flavor::Xml);
//! assert_eq!(
//!     xml,
//!     "<address type=\"Residential\">
//!   <street>123 Main St</street>
//!   <city>Bremerton</city>
//!   <state>WA</state>
//!   <zip_code>98310</zip_code>
//! </address>"
//! );
//!
//! let parsed = parse_one(&xml)?;
//! assert_eq!(parsed, address);
//! assert_eq!(parsed.render(Flavor::Xml), xml);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

use tracing::instrument;

pub mod error;
pub use error::{Error, ErrorKind, ParseError, Pos, Result, Span};

pub mod lexer;
pub use lexer::{MarkupLexer, Token, TokenKind};

pub mod text;
pub use text::{Indent, IndentBuilder, IndentWriter, Scope, DEFAULT_INDENT};

pub mod xml;
pub use xml::{
    Element, Factory, Flavor, Node, Parser, ParserConfig, RenderConfig, TagBuilder,
};

/// Parse one XML root element from text
#[instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn parse_one(input: &str) -> Result<Element> {
    Parser::new(input).parse_one()
}

/// Parse one HTML root element, letting void elements omit close tags
#[instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn parse_html(input: &str) -> Result<Element> {
    Parser::with_config(input, ParserConfig::html()).parse_one()
}

/// Parse with custom limits and flavor
#[instrument(level = "debug", skip_all, fields(len = input.len(), flavor = %config.flavor))]
pub fn parse_with_config(input: &str, config: ParserConfig) -> Result<Element> {
    Parser::with_config(input, config).parse_one()
}
