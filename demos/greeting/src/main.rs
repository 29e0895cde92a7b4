//! Greeting sample: function-style components only.

use arbor_core::{ArborError, ComponentDef, ComponentNode, ElementNode, Props, Value, VNode};
use arbor_dom::Document;
use arbor_runtime::render;

fn welcome(props: &Props) -> VNode {
    ElementNode::new("h1")
        .child("Hello, ")
        .child(props.get("name").and_then(Value::as_str).unwrap_or("stranger"))
        .into()
}

fn welcome_def() -> ComponentDef {
    ComponentDef::function(welcome)
}

fn app(_props: &Props) -> VNode {
    ElementNode::new("div")
        .child(ComponentNode::new(welcome_def()).prop("name", "Sara"))
        .child(ComponentNode::new(welcome_def()).prop("name", "Cahal"))
        .child(ComponentNode::new(welcome_def()).prop("name", "Edite"))
        .into()
}

fn main() -> Result<(), ArborError> {
    let doc = Document::new();
    let body = doc.create_element("body")?;

    let root = ComponentNode::new(ComponentDef::function(app));
    render(&doc, &root.into(), body)?;

    print!("{}", doc.to_html(body)?);
    Ok(())
}
