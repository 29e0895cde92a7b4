//! Lifecycle and mount/replace integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use arbor_core::{
    pairs, Component, ComponentDef, ComponentNode, Ctx, ElementNode, Event, Link, NodeId, Props,
    RenderError, State, VNode, Value,
};
use arbor_dom::Document;
use arbor_runtime::{instantiate, render, render_component, set_state};

/// Shared record of hook invocations, in order.
#[derive(Clone, Default)]
struct HookLog {
    entries: Rc<RefCell<Vec<String>>>,
}

impl HookLog {
    fn push(&self, entry: impl Into<String>) {
        self.entries.borrow_mut().push(entry.into());
    }

    fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    fn count_of(&self, name: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.starts_with(name))
            .count()
    }
}

/// A stateful counter whose button handler increments `num`.
struct Counter {
    log: HookLog,
}

impl Component for Counter {
    fn initial_state(&self, props: &Props) -> State {
        let start = props.get("start").and_then(Value::as_number).unwrap_or(0.0);
        pairs([("num", start)])
    }

    fn render(&self, ctx: &Ctx<'_>) -> VNode {
        self.log.push("render");
        let num = ctx.state_number("num").unwrap_or(0.0);
        let on_click = ctx
            .link
            .handler(move |link, _event| link.set_state(pairs([("num", num + 1.0)])));
        ElementNode::new("button")
            .attr("onClick", Value::Handler(on_click))
            .child(format!("Count: {num}"))
            .into()
    }

    fn will_mount(&self, _ctx: &Ctx<'_>) {
        self.log.push("will_mount");
    }

    fn did_mount(&self, _ctx: &Ctx<'_>) {
        self.log.push("did_mount");
    }

    fn will_update(&self, _ctx: &Ctx<'_>) {
        self.log.push("will_update");
    }

    fn did_update(&self, _ctx: &Ctx<'_>) {
        self.log.push("did_update");
    }
}

fn counter(log: &HookLog) -> ComponentDef {
    let log = log.clone();
    ComponentDef::stateful(move |_props| Counter { log: log.clone() })
}

#[test]
fn test_first_mount_hook_ordering_around_attach() {
    /// Records, for each hook, whether the container had content yet.
    struct AttachProbe {
        log: HookLog,
        doc: Document,
        container: NodeId,
    }

    impl AttachProbe {
        fn attach_state(&self) -> &'static str {
            if self.doc.children(self.container).is_empty() {
                "detached"
            } else {
                "attached"
            }
        }
    }

    impl Component for AttachProbe {
        fn render(&self, _ctx: &Ctx<'_>) -> VNode {
            self.log.push("render");
            ElementNode::new("p").child("ready").into()
        }

        fn will_mount(&self, _ctx: &Ctx<'_>) {
            self.log.push(format!("will_mount:{}", self.attach_state()));
        }

        fn did_mount(&self, _ctx: &Ctx<'_>) {
            self.log.push(format!("did_mount:{}", self.attach_state()));
        }

        fn will_update(&self, _ctx: &Ctx<'_>) {
            self.log.push("will_update");
        }

        fn did_update(&self, _ctx: &Ctx<'_>) {
            self.log.push("did_update");
        }
    }

    let doc = Document::new();
    let container = doc.create_element("body").unwrap();
    let log = HookLog::default();

    let def = {
        let log = log.clone();
        let doc = doc.clone();
        ComponentDef::stateful(move |_props| AttachProbe {
            log: log.clone(),
            doc: doc.clone(),
            container,
        })
    };

    render(&doc, &ComponentNode::new(def).into(), container).unwrap();

    // will_mount before the attach, did_mount after it, nothing else.
    assert_eq!(
        log.entries(),
        ["will_mount:detached", "render", "did_mount:attached"]
    );
}

#[test]
fn test_state_update_replaces_exactly_one_node() {
    let doc = Document::new();
    let container = doc.create_element("body").unwrap();
    let log = HookLog::default();

    let vnode: VNode = ElementNode::new("div")
        .child(ElementNode::new("span").child("left"))
        .child(ComponentNode::new(counter(&log)))
        .child(ElementNode::new("span").child("right"))
        .into();
    let root = render(&doc, &vnode, container).unwrap();

    let before = doc.children(root);
    assert_eq!(before.len(), 3);
    let old_button = before[1];
    assert_eq!(doc.tag(old_button).as_deref(), Some("button"));
    assert_eq!(doc.snapshot(old_button).unwrap().text_content(), "Count: 0");

    assert!(doc.dispatch(old_button, &Event::new("click")).unwrap());

    let after = doc.children(root);
    assert_eq!(after.len(), 3);
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    assert_ne!(after[1], old_button);
    assert_eq!(doc.snapshot(after[1]).unwrap().text_content(), "Count: 1");

    assert_eq!(
        log.entries(),
        [
            "will_mount",
            "render",
            "did_mount",
            "will_update",
            "render",
            "did_update"
        ]
    );
}

#[test]
fn test_rerender_always_produces_fresh_node() {
    struct Fixed;
    impl Component for Fixed {
        fn render(&self, _ctx: &Ctx<'_>) -> VNode {
            ElementNode::new("p").child("static").into()
        }
    }

    let doc = Document::new();
    let container = doc.create_element("body").unwrap();
    let def = ComponentDef::stateful(|_props| Fixed);

    let instance = instantiate(&def, Props::new()).unwrap();
    render_component(&doc, &instance).unwrap();
    let first_base = instance.borrow().base.unwrap();
    doc.append_child(container, first_base).unwrap();
    let first_snapshot = doc.snapshot(first_base).unwrap();

    set_state(&doc, &instance, pairs([("tick", 1)])).unwrap();

    let second_base = instance.borrow().base.unwrap();
    assert_ne!(second_base, first_base, "full replace, never a patch");
    assert_eq!(doc.parent_node(second_base), Some(container));
    assert_eq!(doc.snapshot(second_base).unwrap(), first_snapshot);
}

#[test]
fn test_set_state_merges_shallowly() {
    struct TwoKeys;
    impl Component for TwoKeys {
        fn initial_state(&self, _props: &Props) -> State {
            pairs([("a", "1"), ("b", "2")])
        }
        fn render(&self, ctx: &Ctx<'_>) -> VNode {
            VNode::text(format!(
                "{}-{}",
                ctx.state_str("a").unwrap_or(""),
                ctx.state_str("b").unwrap_or("")
            ))
        }
    }

    let doc = Document::new();
    let container = doc.create_element("body").unwrap();
    let def = ComponentDef::stateful(|_props| TwoKeys);

    let instance = instantiate(&def, Props::new()).unwrap();
    render_component(&doc, &instance).unwrap();
    doc.append_child(container, instance.borrow().base.unwrap())
        .unwrap();

    set_state(&doc, &instance, pairs([("b", "20")])).unwrap();

    let base = instance.borrow().base.unwrap();
    assert_eq!(doc.text(base).as_deref(), Some("1-20"));
}

#[test]
fn test_repeated_dispatch_through_rebound_handlers() {
    let doc = Document::new();
    let container = doc.create_element("body").unwrap();
    let log = HookLog::default();

    let root = render(
        &doc,
        &ComponentNode::new(counter(&log)).prop("start", 5).into(),
        container,
    )
    .unwrap();
    assert_eq!(doc.snapshot(root).unwrap().text_content(), "Count: 5");

    // Every update replaces the button, so re-locate it before each click.
    for _ in 0..3 {
        let button = doc.children(container)[0];
        assert!(doc.dispatch(button, &Event::new("click")).unwrap());
    }

    let button = doc.children(container)[0];
    assert_eq!(doc.snapshot(button).unwrap().text_content(), "Count: 8");
    assert_eq!(log.count_of("will_update"), 3);
    assert_eq!(log.count_of("did_update"), 3);
    assert_eq!(log.count_of("will_mount"), 1);
    assert_eq!(log.count_of("did_mount"), 1);
}

#[test]
fn test_replaced_subtrees_are_released() {
    let doc = Document::new();
    let container = doc.create_element("body").unwrap();
    let log = HookLog::default();

    render(&doc, &ComponentNode::new(counter(&log)).into(), container).unwrap();
    let baseline = doc.node_count();

    for _ in 0..5 {
        let button = doc.children(container)[0];
        doc.dispatch(button, &Event::new("click")).unwrap();
    }

    assert_eq!(doc.node_count(), baseline);
}

#[test]
fn test_update_of_detached_base_is_append_path() {
    let doc = Document::new();
    let log = HookLog::default();

    let instance = instantiate(&counter(&log), Props::new()).unwrap();
    render_component(&doc, &instance).unwrap();
    let detached_base = instance.borrow().base.unwrap();
    assert_eq!(doc.parent_node(detached_base), None);

    // No parent to replace under: the swap is just the base assignment.
    set_state(&doc, &instance, pairs([("num", 9)])).unwrap();

    let new_base = instance.borrow().base.unwrap();
    assert_ne!(new_base, detached_base);
    assert_eq!(doc.parent_node(new_base), None);
    assert_eq!(doc.snapshot(new_base).unwrap().text_content(), "Count: 9");
}

#[test]
fn test_set_state_after_host_dropped() {
    struct LinkGrabber {
        slot: Rc<RefCell<Option<Link>>>,
    }
    impl Component for LinkGrabber {
        fn render(&self, ctx: &Ctx<'_>) -> VNode {
            *self.slot.borrow_mut() = Some(ctx.link.clone());
            VNode::text("x")
        }
    }

    let slot = Rc::new(RefCell::new(None));
    let def = {
        let slot = slot.clone();
        ComponentDef::stateful(move |_props| LinkGrabber { slot: slot.clone() })
    };

    {
        let doc = Document::new();
        let container = doc.create_element("body").unwrap();
        render(&doc, &ComponentNode::new(def).into(), container).unwrap();
    }

    let link = slot.borrow().clone().unwrap();
    assert!(matches!(
        link.set_state(State::new()),
        Err(RenderError::HostGone)
    ));
}
