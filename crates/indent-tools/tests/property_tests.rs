//! Property-based tests for rendering and parsing
//!
//! These tests use proptest to verify:
//! 1. Render stability: render(parse(render(tree))) == render(tree)
//! 2. Escaping: text and attribute values come back unchanged after a parse
//! 3. The parser never panics on arbitrary input

use indent_tools::{parse_one, Element, Flavor, IndentBuilder, Node};
use proptest::prelude::*;

fn arb_name() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_.-]{0,6}"
}

fn arb_text() -> impl Strategy<Value = String> {
    "[ -~\t\n\ré中]{0,12}"
}

// `None` values are valueless attributes.
fn arb_attributes(
    name: BoxedStrategy<String>,
) -> impl Strategy<Value = Vec<(String, Option<String>)>> {
    prop::collection::vec((name, prop::option::of(arb_text())), 0..4)
}

fn arb_element(name: BoxedStrategy<String>) -> impl Strategy<Value = Element> {
    let leaf = (name.clone(), arb_attributes(name.clone()))
        .prop_map(|(tag, attrs)| build(tag, attrs, Vec::new()));

    leaf.prop_recursive(4, 32, 5, move |inner| {
        let child = prop_oneof![
            arb_text().prop_map(Node::Text),
            inner.prop_map(Node::Element),
        ];
        (
            name.clone(),
            arb_attributes(name.clone()),
            prop::collection::vec(child, 0..5),
        )
            .prop_map(|(tag, attrs, children)| build(tag, attrs, children))
    })
}

fn build(tag: String, attrs: Vec<(String, Option<String>)>, children: Vec<Node>) -> Element {
    let mut element = Element::new(tag);
    for (key, value) in attrs {
        match value {
            Some(value) => element.set_attribute(key, value),
            None => element.set_flag(key),
        };
    }
    for child in children {
        element.push_child(child);
    }
    element
}

proptest! {
    #[test]
    fn xml_render_is_stable(tree in arb_element(arb_name().boxed())) {
        let rendered = tree.render(Flavor::Xml);
        let parsed = parse_one(&rendered);
        prop_assert!(parsed.is_ok(), "failed to parse {rendered:?}: {parsed:?}");
        if let Ok(parsed) = parsed {
            prop_assert_eq!(parsed.render(Flavor::Xml), rendered);
        }
    }

    #[test]
    fn html_render_is_stable(tree in arb_element(arb_name().boxed())) {
        let rendered = tree.render(Flavor::Html);
        let parsed = parse_one(&rendered);
        prop_assert!(parsed.is_ok(), "failed to parse {rendered:?}: {parsed:?}");
        if let Ok(parsed) = parsed {
            prop_assert_eq!(parsed.render(Flavor::Html), rendered);
        }
    }

    #[test]
    fn text_and_attribute_values_survive(text in "[ -~\t\n\ré中]{1,24}", value in arb_text()) {
        let mut element = Element::new("value");
        element.set_attribute("data", value.as_str());
        element.push_child(text.as_str());

        let parsed = parse_one(&element.render(Flavor::Xml));
        prop_assert!(parsed.is_ok());
        if let Ok(parsed) = parsed {
            prop_assert_eq!(parsed.attribute("data"), Some(value.as_str()));
            prop_assert_eq!(parsed.text(), text);
        }
    }

    #[test]
    fn parser_never_panics(input in "[<>/=\"'a-z &;#!?\n -]{0,64}") {
        let _ = parse_one(&input);
    }

    #[test]
    fn scope_balances_depth(levels in 0usize..8) {
        let mut sb = IndentBuilder::new();
        for _ in 0..levels {
            sb.indent();
        }
        sb.append("x");
        for _ in 0..levels {
            sb.unindent();
        }
        prop_assert_eq!(sb.depth(), 0);
        prop_assert_eq!(sb.to_string(), format!("{}x", "    ".repeat(levels)));
    }
}
