//! Rendering flavor and parser/render configuration

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Pos, Result};

/// Maximum element nesting accepted by the parser
pub const DEFAULT_MAX_DEPTH: usize = 256;
/// Maximum input size in bytes accepted by the parser
pub const DEFAULT_MAX_SIZE: usize = 10 * 1024 * 1024;
/// Indentation unit used for rendered markup
pub const DEFAULT_MARKUP_INDENT: &str = "  ";

/// Markup dialect
///
/// XML preserves name case and self-closes empty elements. HTML lowercases
/// tag and attribute names and writes explicit close tags, except for void
/// elements such as `<br />`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Flavor {
    #[default]
    Xml,
    Html,
}

impl Flavor {
    /// Apply the flavor's case policy to a tag or attribute name
    pub fn normalize_name(self, name: &str) -> Cow<'_, str> {
        match self {
            Self::Html if name.bytes().any(|b| b.is_ascii_uppercase()) => {
                Cow::Owned(name.to_ascii_lowercase())
            }
            _ => Cow::Borrowed(name),
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml => f.write_str("xml"),
            Self::Html => f.write_str("html"),
        }
    }
}

/// Error returned when a flavor name is not recognised
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown markup flavor `{0}`, expected `xml` or `html`")]
pub struct UnknownFlavor(pub String);

impl FromStr for Flavor {
    type Err = UnknownFlavor;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(UnknownFlavor(s.to_string())),
        }
    }
}

/// Configuration for rendering element trees
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    pub flavor: Flavor,
    /// Prefix added once per nesting level
    pub indent: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(Flavor::Xml)
    }
}

impl RenderConfig {
    pub fn new(flavor: Flavor) -> Self {
        Self {
            flavor,
            indent: DEFAULT_MARKUP_INDENT.to_string(),
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

/// Configuration for parser limits and dialect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum element nesting depth
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_size: usize,
    /// HTML lets void elements end without a close tag
    pub flavor: Flavor,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
            flavor: Flavor::Xml,
        }
    }
}

impl ParserConfig {
    pub fn html() -> Self {
        Self {
            flavor: Flavor::Html,
            ..Self::default()
        }
    }

    pub fn validate_size(&self, size: usize) -> Result<()> {
        if size > self.max_size {
            return Err(Error::at(
                ErrorKind::MaxSizeExceeded { max: self.max_size },
                Pos::default(),
            ));
        }
        Ok(())
    }
}

/// Tracks nesting depth during parsing
#[derive(Debug, Default)]
pub struct ParsingContext {
    current_depth: usize,
}

impl ParsingContext {
    pub const fn new() -> Self {
        Self { current_depth: 0 }
    }

    pub const fn depth(&self) -> usize {
        self.current_depth
    }

    pub fn enter_nested(&mut self, config: &ParserConfig, pos: Pos) -> Result<()> {
        self.current_depth += 1;
        if self.current_depth > config.max_depth {
            return Err(Error::at(
                ErrorKind::MaxDepthExceeded {
                    max: config.max_depth,
                },
                pos,
            ));
        }
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }
}
