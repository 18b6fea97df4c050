//! XML/HTML element trees: construction, rendering and parsing

pub mod config;
pub mod escape;
pub mod factory;
pub mod model;
pub mod parser;
mod render;

pub use config::{
    Flavor, ParserConfig, ParsingContext, RenderConfig, UnknownFlavor, DEFAULT_MARKUP_INDENT,
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE,
};
pub use escape::{escape_attribute, escape_text};
pub use factory::{Factory, TagBuilder};
pub use model::{is_void_element, Element, Node, HTML_VOID_ELEMENTS};
pub use parser::Parser;
