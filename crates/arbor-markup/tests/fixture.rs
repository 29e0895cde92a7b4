//! Fixture-file parsing tests.

use arbor_core::{ElementNode, Value, VNode};
use arbor_markup::parse_one;

const CARD: &str = include_str!("fixtures/card.html");

fn as_element(node: &VNode) -> &ElementNode {
    match node {
        VNode::Element(el) => el,
        other => panic!("expected element, got {other:?}"),
    }
}

#[test]
fn test_card_fixture_structure() {
    let root = parse_one(CARD).unwrap();
    let card = as_element(&root);

    assert_eq!(card.tag, "div");
    assert_eq!(card.attrs.get("class"), Some(&Value::from("card")));
    assert_eq!(card.children.len(), 3);

    let header = as_element(&card.children[0]);
    assert_eq!(header.attrs.get("class"), Some(&Value::from("card-header")));
    // The comment is dropped; the heading and badge survive.
    assert_eq!(header.children.len(), 2);

    let badge = as_element(&header.children[1]);
    assert_eq!(badge.attrs.get("hidden"), Some(&Value::Bool(true)));

    let body = as_element(&card.children[1]);
    let image = as_element(&body.children[1]);
    assert_eq!(image.tag, "img");
    assert!(image.children.is_empty());
    assert_eq!(image.attrs.get("alt"), Some(&Value::from("Revenue chart")));
}
