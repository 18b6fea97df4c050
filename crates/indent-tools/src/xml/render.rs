//! Rendering element trees to markup text
//!
//! Layout is chosen per element so the output parses back to the same tree:
//! elements holding only text stay on one line, elements with child elements
//! put each child on its own indented line. When an element mixes text and
//! elements and the text has meaningful whitespace at its edges, the element
//! is written on one line instead so that no layout whitespace touches its
//! text. Adjacent text nodes are written as one run, since that is how they
//! parse back.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

use crate::text::IndentBuilder;
use crate::xml::config::{Flavor, RenderConfig};
use crate::xml::escape::{escape_attribute, escape_text, is_markup_whitespace};
use crate::xml::model::{is_void_element, Element, Node};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Layout {
    Empty,
    Inline,
    Block,
}

enum Piece<'a> {
    Text(Cow<'a, str>),
    Element(&'a Element),
}

impl Element {
    /// Render this element as markup using the default two-space indentation
    pub fn render(&self, flavor: Flavor) -> String {
        self.render_with(&RenderConfig::new(flavor))
    }

    /// Render this element as the document root
    ///
    /// A doctype set on this element is written on the first line.
    pub fn render_with(&self, config: &RenderConfig) -> String {
        let mut out = IndentBuilder::with_indent(config.indent.as_str());
        if let Some(doctype) = self.doctype() {
            out.append(&format!("<!doctype {doctype}>"));
        }
        self.write_to(&mut out, config.flavor);
        out.to_string()
    }

    /// Append this element to `out` at its current depth
    pub fn write_to(&self, out: &mut IndentBuilder, flavor: Flavor) {
        let tag = flavor.normalize_name(self.tag());
        let open = self.open_tag(flavor);
        let pieces = self.pieces();

        match layout(&pieces) {
            Layout::Empty => {
                if flavor == Flavor::Html && !is_void_element(self.tag()) {
                    out.append(&format!("{open}></{tag}>"));
                } else {
                    out.append(&format!("{open} />"));
                }
            }
            Layout::Inline => {
                let mut line = open;
                line.push('>');
                for piece in &pieces {
                    match piece {
                        Piece::Text(text) => line.push_str(&escape_text(text)),
                        Piece::Element(element) => {
                            line.push_str(&element.render_fragment(flavor, out.indent_unit()));
                        }
                    }
                }
                line.push_str("</");
                line.push_str(&tag);
                line.push('>');
                out.append(&line);
            }
            Layout::Block => {
                out.append(&format!("{open}>"));
                {
                    let mut inner = out.scope();
                    for piece in &pieces {
                        match piece {
                            Piece::Text(text) => inner.append(&escape_text(text)),
                            Piece::Element(element) => element.write_to(&mut inner, flavor),
                        }
                    }
                }
                out.append(&format!("</{tag}>"));
            }
        }
    }

    fn render_fragment(&self, flavor: Flavor, indent: &str) -> String {
        let mut out = IndentBuilder::with_indent(indent);
        self.write_to(&mut out, flavor);
        out.to_string()
    }

    fn open_tag(&self, flavor: Flavor) -> String {
        let mut open = String::from("<");
        open.push_str(&flavor.normalize_name(self.tag()));
        for (key, value) in self.rendered_attributes(flavor) {
            open.push(' ');
            open.push_str(&key);
            if let Some(value) = value {
                open.push_str("=\"");
                open.push_str(&escape_attribute(value));
                open.push('"');
            }
        }
        open
    }

    /// Attribute names as written for `flavor`
    ///
    /// HTML names are case-insensitive, so keys that lowercase to the same
    /// name collapse into one: the first key's position, the last key's value.
    fn rendered_attributes(&self, flavor: Flavor) -> IndexMap<Cow<'_, str>, Option<&str>> {
        self.attributes()
            .iter()
            .map(|(key, value)| (flavor.normalize_name(key), value.as_deref()))
            .collect()
    }

    /// Renderable children with adjacent text merged, as the parser will see them
    fn pieces(&self) -> Vec<Piece<'_>> {
        let mut pieces: Vec<Piece<'_>> = Vec::new();
        for child in self.renderable_children() {
            match child {
                Node::Element(element) => pieces.push(Piece::Element(element)),
                Node::Text(text) => match pieces.last_mut() {
                    Some(Piece::Text(run)) => run.to_mut().push_str(text),
                    _ => pieces.push(Piece::Text(Cow::Borrowed(text.as_str()))),
                },
            }
        }
        pieces
    }
}

fn layout(pieces: &[Piece<'_>]) -> Layout {
    if pieces.is_empty() {
        return Layout::Empty;
    }

    let has_element = pieces.iter().any(|piece| matches!(piece, Piece::Element(_)));
    let block_safe = pieces.iter().all(|piece| match piece {
        Piece::Text(text) => {
            !text.starts_with(is_markup_whitespace) && !text.ends_with(is_markup_whitespace)
        }
        Piece::Element(_) => true,
    });

    if has_element && block_safe {
        Layout::Block
    } else {
        Layout::Inline
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Flavor::Xml))
    }
}
