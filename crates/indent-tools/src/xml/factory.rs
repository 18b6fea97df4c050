//! Fluent construction of element trees
//!
//! ```
//! use indent_tools::Factory;
//!
//! let x = Factory::new();
//! let doc = x
//!     .tag("address")
//!     .attr("type", "Residential")
//!     .children([
//!         x.tag("street").text("123 Main St"),
//!         x.tag("zip_code").text(98310),
//!     ])
//!     .build();
//!
//! assert_eq!(
//!     doc.to_string(),
//!     "<address type=\"Residential\">\n  <street>123 Main St</street>\n  <zip_code>98310</zip_code>\n</address>"
//! );
//! ```

use indexmap::IndexMap;

use crate::xml::config::Flavor;
use crate::xml::model::{is_void_element, Element, Node};

/// Stateless constructor of [`Element`] trees
///
/// An HTML factory additionally refuses children on void elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Factory {
    flavor: Flavor,
}

impl Factory {
    pub const fn new() -> Self {
        Self::with_flavor(Flavor::Xml)
    }

    pub const fn for_html() -> Self {
        Self::with_flavor(Flavor::Html)
    }

    pub const fn with_flavor(flavor: Flavor) -> Self {
        Self { flavor }
    }

    pub const fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Start an element with any tag name, including ones such as `zip-code`
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn tag(&self, name: impl Into<String>) -> TagBuilder {
        TagBuilder {
            element: Element::new(name),
            flavor: self.flavor,
        }
    }
}

macro_rules! tag_helpers {
    ($($name:ident),* $(,)?) => {
        impl Factory {
            $(
                #[doc = concat!("Start a `<", stringify!($name), ">` element")]
                pub fn $name(&self) -> TagBuilder {
                    self.tag(stringify!($name))
                }
            )*
        }
    };
}

tag_helpers!(
    html, head, title, meta, link, script, style, body, header, footer, nav, main, section,
    article, div, span, p, a, em, strong, code, pre, h1, h2, h3, h4, ul, ol, li, table, thead,
    tbody, tr, th, td, img, br, hr, form, label, input, button,
);

/// An element under construction
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct TagBuilder {
    element: Element,
    flavor: Flavor,
}

impl TagBuilder {
    /// Set one attribute, converting the value with `ToString`
    ///
    /// Setting a key again replaces its value in place.
    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.element.set_attribute(key, value.to_string());
        self
    }

    /// Set an attribute written without a value, such as `disabled`
    pub fn flag(mut self, key: impl Into<String>) -> Self {
        self.element.set_flag(key);
        self
    }

    /// Set several attributes in the given order
    ///
    /// # Panics
    ///
    /// Panics if the same key appears twice in `attrs`.
    pub fn attrs<I, K, V>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        let mut batch = IndexMap::new();
        for (key, value) in attrs {
            let key = key.into();
            assert!(
                !batch.contains_key(&key),
                "duplicate attribute `{key}` in one attrs() call"
            );
            batch.insert(key, value.to_string());
        }
        for (key, value) in batch {
            self.element.set_attribute(key, value);
        }
        self
    }

    /// Append a child: strings become text, elements and builders nest
    ///
    /// # Panics
    ///
    /// Panics when built by an HTML factory and this is a void element.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.push(child.into());
        self
    }

    /// Append children in order
    ///
    /// # Panics
    ///
    /// Panics when built by an HTML factory and this is a void element.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        for child in children {
            self.push(child.into());
        }
        self
    }

    /// Append a text child, converting with `ToString`
    ///
    /// # Panics
    ///
    /// Panics when built by an HTML factory and this is a void element.
    pub fn text(self, text: impl ToString) -> Self {
        self.child(Node::Text(text.to_string()))
    }

    /// Emit `<!doctype VALUE>` before this element when rendered as the root
    ///
    /// # Panics
    ///
    /// Panics if `doctype` contains `>`.
    pub fn doctype(mut self, doctype: impl Into<String>) -> Self {
        self.element.set_doctype(Some(doctype.into()));
        self
    }

    pub fn build(self) -> Element {
        self.element
    }

    fn push(&mut self, node: Node) {
        assert!(
            !(self.flavor == Flavor::Html && is_void_element(self.element.tag())),
            "HTML void element <{}> cannot have children",
            self.element.tag()
        );
        self.element.push_child(node);
    }
}

impl From<TagBuilder> for Element {
    fn from(builder: TagBuilder) -> Self {
        builder.build()
    }
}

impl From<TagBuilder> for Node {
    fn from(builder: TagBuilder) -> Self {
        Self::Element(builder.build())
    }
}
