//! XML/HTML element tree

use indexmap::IndexMap;

/// Elements that never have content in HTML
pub const HTML_VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source",
];

/// Whether `tag` names an HTML void element, ignoring ASCII case
pub fn is_void_element(tag: &str) -> bool {
    HTML_VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(tag))
}

/// A markup element: tag name, ordered attributes and ordered children
///
/// An attribute without a value, such as HTML's `disabled`, is stored as
/// `None` and renders as the bare name.
#[derive(Clone, Debug, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::tag"))]
    tag: String,
    attributes: IndexMap<String, Option<String>>,
    children: Vec<Node>,
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "de::doctype",
            skip_serializing_if = "Option::is_none"
        )
    )]
    doctype: Option<String>,
}

/// Child of an element
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Node {
    /// Logical text; escaping happens when rendering
    Text(String),
    Element(Element),
}

impl Element {
    /// Create an element with no attributes and no children
    ///
    /// # Panics
    ///
    /// Panics if `tag` is empty.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        assert!(!tag.is_empty(), "element tag name must not be empty");
        Self {
            tag,
            attributes: IndexMap::new(),
            children: Vec::new(),
            doctype: None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attributes in insertion order; `None` marks a valueless attribute
    pub fn attributes(&self) -> &IndexMap<String, Option<String>> {
        &self.attributes
    }

    /// Value of `key`, where a valueless attribute reads as `""`
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .map(|value| value.as_deref().unwrap_or_default())
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Set an attribute, returning the previous value
    ///
    /// Replacing an existing key keeps its original position.
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.insert_attribute(key.into(), Some(value.into()))
    }

    /// Set an attribute that renders as its bare name, like `disabled`
    pub fn set_flag(&mut self, key: impl Into<String>) -> Option<String> {
        self.insert_attribute(key.into(), None)
    }

    pub(crate) fn insert_attribute(&mut self, key: String, value: Option<String>) -> Option<String> {
        self.attributes
            .insert(key, value)
            .map(Option::unwrap_or_default)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Direct children that are elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First direct child element with the given tag
    pub fn find(&self, tag: &str) -> Option<&Self> {
        self.child_elements().find(|element| element.tag == tag)
    }

    /// Concatenated text of the direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Doctype emitted before this element when it is rendered as the root
    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    /// # Panics
    ///
    /// Panics if `doctype` contains `>`, which would end the declaration early.
    pub fn set_doctype(&mut self, doctype: Option<String>) {
        if let Some(value) = &doctype {
            assert!(!value.contains('>'), "doctype `{value}` must not contain `>`");
        }
        self.doctype = doctype;
    }

    /// True when rendering would produce an empty tag
    pub fn is_empty(&self) -> bool {
        self.renderable_children().next().is_none()
    }

    /// Children that produce output; empty text nodes are skipped
    pub(crate) fn renderable_children(&self) -> impl Iterator<Item = &Node> {
        self.children
            .iter()
            .filter(|node| !matches!(node, Node::Text(text) if text.is_empty()))
    }
}

// Attribute order is significant, which `IndexMap`'s own equality ignores.
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.attributes.iter().eq(other.attributes.iter())
            && self.children == other.children
            && self.doctype == other.doctype
    }
}

#[cfg(feature = "serde")]
mod de {
    use serde::de::{Error, Unexpected};
    use serde::{Deserialize, Deserializer};

    pub(super) fn tag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let tag = String::deserialize(deserializer)?;
        if tag.is_empty() {
            return Err(D::Error::invalid_value(
                Unexpected::Str(&tag),
                &"a non-empty tag name",
            ));
        }
        Ok(tag)
    }

    pub(super) fn doctype<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let doctype = Option::<String>::deserialize(deserializer)?;
        if let Some(value) = doctype.as_deref().filter(|value| value.contains('>')) {
            return Err(D::Error::invalid_value(
                Unexpected::Str(value),
                &"a doctype without `>`",
            ));
        }
        Ok(doctype)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}
