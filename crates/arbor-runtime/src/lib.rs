//! The Arbor render engine.
//!
//! Ties the virtual-node model to the display-tree host: component
//! instantiation ([`instantiate`]), lowering ([`lower`]), the mount/replace
//! primitive ([`render_component`]) with its props and state entry points
//! ([`set_props`], [`set_state`]), and the public [`render`] entry point that
//! appends a freshly lowered subtree into a container node.
//!
//! ```
//! use arbor_core::{ComponentDef, ComponentNode, ElementNode, Value, VNode};
//! use arbor_dom::Document;
//! use arbor_runtime::render;
//!
//! let welcome = ComponentDef::function(|props| {
//!     ElementNode::new("h1")
//!         .child("Hello, ")
//!         .child(props.get("name").and_then(Value::as_str).unwrap_or(""))
//!         .into()
//! });
//!
//! let doc = Document::new();
//! let body = doc.create_element("body").unwrap();
//! let vnode: VNode = ComponentNode::new(welcome).prop("name", "Sara").into();
//! render(&doc, &vnode, body).unwrap();
//! ```

mod engine;
mod instance;

pub use engine::{lower, render, render_component, set_props, set_state};
pub use instance::{instantiate, ComponentInstance, SharedInstance};
