//! Virtual-node model: the declarative description of desired display output.
//!
//! A virtual node is one of three shapes — text, element, or component — and
//! the shape alone decides how the engine lowers it. Classification is the
//! enum discriminant: pure, and checked on every render pass.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::component::{Component, Props};
use crate::errors::RenderError;
use crate::types::{format_number, Value};

/// A virtual node.
#[derive(Debug, Clone)]
pub enum VNode {
    /// Normalized text content.
    Text(String),
    /// A concrete display element (`tag` is a plain name).
    Element(ElementNode),
    /// A component instantiation (`tag` is a component definition).
    Component(ComponentNode),
}

impl VNode {
    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text(content.into())
    }
}

/// An element-shaped virtual node: tag, attributes, ordered children.
#[derive(Debug, Clone)]
pub struct ElementNode {
    pub tag: String,
    pub attrs: IndexMap<String, Value>,
    pub children: Vec<VNode>,
}

impl ElementNode {
    /// Create an element node with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Append a child.
    pub fn child(mut self, child: impl Into<VNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children in order.
    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<VNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

/// A component-shaped virtual node.
///
/// `props` doubles as the instantiation attrs. `children` are recorded on the
/// node but are not threaded into `props`: only element nodes forward
/// children to their output. Components that expect composed children must
/// receive them through an explicit prop.
#[derive(Clone)]
pub struct ComponentNode {
    pub def: ComponentDef,
    pub props: Props,
    pub children: Vec<VNode>,
}

impl ComponentNode {
    /// Create a component node with empty props.
    pub fn new(def: ComponentDef) -> Self {
        Self {
            def,
            props: Props::new(),
            children: Vec::new(),
        }
    }

    /// Add a prop.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Append a child (recorded, not forwarded — see the type docs).
    pub fn child(mut self, child: impl Into<VNode>) -> Self {
        self.children.push(child.into());
        self
    }
}

impl fmt::Debug for ComponentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentNode")
            .field("def", &self.def)
            .field("props", &self.props)
            .field("children", &self.children)
            .finish()
    }
}

/// A function-style component body.
pub type ViewFn = dyn Fn(&Props) -> VNode;

/// A stateful-component constructor.
pub type Constructor = dyn Fn(&Props) -> Result<Box<dyn Component>, RenderError>;

/// A component definition: the tagged contract for the two component styles.
///
/// Both variants normalize to the same [`Component`] contract at
/// instantiation time, so the engine never branches on the variant after
/// construction.
#[derive(Clone)]
pub enum ComponentDef {
    /// A pure view function `(props) -> VNode`.
    Function(Rc<ViewFn>),
    /// A constructor producing a stateful behavior.
    Stateful(Rc<Constructor>),
}

impl ComponentDef {
    /// Define a function-style component.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Props) -> VNode + 'static,
    {
        ComponentDef::Function(Rc::new(f))
    }

    /// Define a stateful component with an infallible constructor.
    pub fn stateful<C, F>(ctor: F) -> Self
    where
        C: Component + 'static,
        F: Fn(&Props) -> C + 'static,
    {
        ComponentDef::Stateful(Rc::new(move |props| Ok(Box::new(ctor(props)) as Box<dyn Component>)))
    }

    /// Define a stateful component whose constructor may fail.
    pub fn try_stateful<F>(ctor: F) -> Self
    where
        F: Fn(&Props) -> Result<Box<dyn Component>, RenderError> + 'static,
    {
        ComponentDef::Stateful(Rc::new(ctor))
    }
}

impl fmt::Debug for ComponentDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentDef::Function(_) => write!(f, "Function(..)"),
            ComponentDef::Stateful(_) => write!(f, "Stateful(..)"),
        }
    }
}

impl From<ElementNode> for VNode {
    fn from(el: ElementNode) -> Self {
        VNode::Element(el)
    }
}

impl From<ComponentNode> for VNode {
    fn from(node: ComponentNode) -> Self {
        VNode::Component(node)
    }
}

impl From<&str> for VNode {
    fn from(s: &str) -> Self {
        VNode::Text(s.to_string())
    }
}

impl From<String> for VNode {
    fn from(s: String) -> Self {
        VNode::Text(s)
    }
}

impl From<f64> for VNode {
    fn from(n: f64) -> Self {
        VNode::Text(format_number(n))
    }
}

impl From<i64> for VNode {
    fn from(n: i64) -> Self {
        VNode::Text(n.to_string())
    }
}

impl From<i32> for VNode {
    fn from(n: i32) -> Self {
        VNode::Text(n.to_string())
    }
}

// Booleans and absent values normalize to empty text.
impl From<bool> for VNode {
    fn from(_: bool) -> Self {
        VNode::Text(String::new())
    }
}

impl<T: Into<VNode>> From<Option<T>> for VNode {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => VNode::Text(String::new()),
        }
    }
}
