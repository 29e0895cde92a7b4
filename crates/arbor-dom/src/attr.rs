//! The attribute binder.
//!
//! Applies a single key/value pair onto a live element node, sorting the key
//! into one of three classes: event bindings (`on*` keys), the reserved
//! `style` sub-mapping, and plain properties. Re-applying a key replaces the
//! previous binding, so repeated renders never accumulate duplicate event
//! subscriptions.

use arbor_core::{DomError, NodeId, StyleMap, Value};

use crate::tree::Document;

const EVENT_PREFIX: &str = "on";

/// Apply one key/value pair onto `node`.
pub fn set_attribute(doc: &Document, node: NodeId, key: &str, value: &Value) -> Result<(), DomError> {
    // Event class: "onClick" binds a handler under "click".
    if let Some(event) = key.strip_prefix(EVENT_PREFIX).filter(|rest| !rest.is_empty()) {
        if let Some(handler) = value.as_handler() {
            return doc.bind_event(node, &event.to_lowercase(), handler.clone());
        }
        if value.is_falsy() {
            return doc.unbind_event(node, &event.to_lowercase());
        }
        // A non-handler value under an on* key is an ordinary property.
    }

    if key == "style" {
        return match value {
            Value::Style(map) => doc.set_styles(node, map.clone()),
            Value::String(text) => doc.set_styles(node, parse_style_text(text)),
            v if v.is_falsy() => doc.set_styles(node, StyleMap::new()),
            _ => Ok(()),
        };
    }

    // Property class. Markup spells the class property "className"; the
    // display tree stores it as "class".
    let key = if key == "className" { "class" } else { key };
    match value.as_attr_text() {
        Some(text) => doc.set_property(node, key, text),
        None => doc.remove_property(node, key),
    }
}

/// Parse `"name: value; name2: value2"` into a style mapping.
fn parse_style_text(text: &str) -> StyleMap {
    let mut map = StyleMap::new();
    for declaration in text.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if !name.is_empty() && !value.is_empty() {
            map.insert(name.to_string(), value.to_string());
        }
    }
    map
}
