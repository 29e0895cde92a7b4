//! Core value types for the Arbor engine.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

/// Unique identifier for a live display node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// An event delivered to a bound handler.
#[derive(Debug, Clone)]
pub struct Event {
    /// Event name, e.g. `"click"`.
    pub name: String,
    /// Optional payload, e.g. the text of an input.
    pub detail: Option<String>,
}

impl Event {
    /// Create an event with no payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: None,
        }
    }

    /// Create an event carrying a detail payload.
    pub fn with_detail(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: Some(detail.into()),
        }
    }
}

/// An event callback bound onto a display node.
pub type Handler = Rc<dyn Fn(&Event)>;

/// A style sub-mapping (`property name -> value`), insertion-ordered.
pub type StyleMap = IndexMap<String, String>;

/// An attribute, prop, or state value.
#[derive(Clone)]
pub enum Value {
    /// Absent value.
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// The reserved style sub-mapping.
    Style(StyleMap),
    /// An event callback.
    Handler(Handler),
}

impl Value {
    /// Whether the binder treats this value as a removal request.
    pub fn is_falsy(&self) -> bool {
        matches!(self, Value::Null | Value::Bool(false))
    }

    /// Borrow the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, if this is a number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow the handler, if this is a handler value.
    pub fn as_handler(&self) -> Option<&Handler> {
        match self {
            Value::Handler(h) => Some(h),
            _ => None,
        }
    }

    /// Text form used when the value is assigned as a plain property.
    ///
    /// `None` for falsy values (the removal class) and for handlers, which
    /// have no text form.
    pub fn as_attr_text(&self) -> Option<String> {
        match self {
            Value::Null | Value::Bool(false) => None,
            Value::Bool(true) => Some("true".to_string()),
            Value::Number(n) => Some(format_number(*n)),
            Value::String(s) => Some(s.clone()),
            Value::Style(map) => Some(format_style(map)),
            Value::Handler(_) => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Style(map) => f.debug_tuple("Style").field(map).finish(),
            Value::Handler(_) => write!(f, "Handler(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Style(a), Value::Style(b)) => a == b,
            (Value::Handler(a), Value::Handler(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<StyleMap> for Value {
    fn from(map: StyleMap) -> Self {
        Value::Style(map)
    }
}

impl From<Handler> for Value {
    fn from(h: Handler) -> Self {
        Value::Handler(h)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Build an insertion-ordered mapping from literal pairs.
///
/// Convenience for attrs, props, and state partials:
/// `pairs([("name", "Sara"), ("rows", 3)])`.
pub fn pairs<K, V, const N: usize>(entries: [(K, V); N]) -> IndexMap<String, Value>
where
    K: Into<String>,
    V: Into<Value>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Format a number the way it appears in text and property values
/// (no trailing `.0` for integral values).
pub(crate) fn format_number(n: f64) -> String {
    format!("{n}")
}

fn format_style(map: &StyleMap) -> String {
    let mut out = String::new();
    for (name, value) in map {
        if !out.is_empty() {
            out.push_str("; ");
        }
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
    }
    out
}
