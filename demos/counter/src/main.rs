//! Counter sample: a stateful component driven by click events.

use arbor_core::{
    pairs, ArborError, Component, ComponentDef, ComponentNode, Ctx, ElementNode, Event, Props,
    State, VNode, Value,
};
use arbor_dom::Document;
use arbor_markup::parse_one;
use arbor_runtime::render;

struct Counter;

impl Component for Counter {
    fn initial_state(&self, props: &Props) -> State {
        let start = props.get("start").and_then(Value::as_number).unwrap_or(0.0);
        pairs([("num", start)])
    }

    fn render(&self, ctx: &Ctx<'_>) -> VNode {
        let num = ctx.state_number("num").unwrap_or(0.0);
        let on_click = ctx
            .link
            .handler(move |link, _event| link.set_state(pairs([("num", num + 1.0)])));
        ElementNode::new("div")
            .child(ElementNode::new("p").child(format!("Count: {num}")))
            .child(
                ElementNode::new("button")
                    .attr("onClick", Value::Handler(on_click))
                    .child("+1"),
            )
            .into()
    }
}

fn main() -> Result<(), ArborError> {
    let doc = Document::new();
    let body = doc.create_element("body")?;

    let shell = parse_one(r#"<section class="counter-demo"></section>"#)?;
    let section = render(&doc, &shell, body)?;

    let app = ComponentNode::new(ComponentDef::stateful(|_props| Counter)).prop("start", 0);
    render(&doc, &app.into(), section)?;

    println!("initial:\n{}", doc.to_html(body)?);

    for _ in 0..3 {
        // Each update replaces the counter's subtree, so look the button up
        // again before every click.
        let root = doc.children(section)[0];
        let button = doc.children(root)[1];
        doc.dispatch(button, &Event::new("click"))?;
    }

    println!("after three clicks:\n{}", doc.to_html(body)?);
    Ok(())
}
