//! The live display tree.
//!
//! [`Document`] is an id-indexed arena of element and text nodes offering the
//! capability set the render engine consumes: node creation, append, replace,
//! parent lookup, removal, and synchronous event dispatch. It is a cheap
//! cloneable handle over single-threaded shared state, so event handlers can
//! re-enter it after dispatch releases the borrow.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use smallvec::SmallVec;

use arbor_core::{DomError, Event, Handler, NodeId, StyleMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Element { tag: String },
    Text { content: String },
}

pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) attributes: IndexMap<String, String>,
    pub(crate) styles: StyleMap,
    pub(crate) handlers: HashMap<String, Handler>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: SmallVec::new(),
            attributes: IndexMap::new(),
            styles: StyleMap::new(),
            handlers: HashMap::new(),
        }
    }

    fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }
}

#[derive(Default)]
pub(crate) struct Tree {
    pub(crate) nodes: HashMap<u64, Node>,
    next_id: u64,
}

impl Tree {
    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id.0, node);
        id
    }

    pub(crate) fn get(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(&id.0).ok_or(DomError::UnknownNode(id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(&id.0).ok_or(DomError::UnknownNode(id))
    }

    /// Unlink `id` from its parent's child list, if it has one.
    fn detach(&mut self, id: NodeId) {
        let parent = match self.nodes.get(&id.0).and_then(|n| n.parent) {
            Some(p) => p,
            None => return,
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent.0) {
            parent_node.children.retain(|c| *c != id);
        }
        if let Some(node) = self.nodes.get_mut(&id.0) {
            node.parent = None;
        }
    }

    /// Whether `candidate` is `id` itself or one of its ancestors.
    fn is_self_or_ancestor(&self, id: NodeId, candidate: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == candidate {
                return true;
            }
            cursor = self.nodes.get(&current.0).and_then(|n| n.parent);
        }
        false
    }
}

/// Handle to a live display tree.
#[derive(Clone, Default)]
pub struct Document {
    inner: Rc<RefCell<Tree>>,
}

/// Non-owning handle to a [`Document`], for callbacks that must not keep the
/// tree alive on their own.
#[derive(Clone)]
pub struct WeakDocument {
    inner: Weak<RefCell<Tree>>,
}

impl WeakDocument {
    pub fn upgrade(&self) -> Option<Document> {
        self.inner.upgrade().map(|inner| Document { inner })
    }
}

impl Document {
    /// Create an empty display tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Downgrade to a non-owning handle.
    pub fn downgrade(&self) -> WeakDocument {
        WeakDocument {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Create a detached element node. The tag must not be empty.
    pub fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        if tag.is_empty() {
            return Err(DomError::EmptyTag);
        }
        let mut tree = self.inner.borrow_mut();
        Ok(tree.alloc(Node::new(NodeKind::Element {
            tag: tag.to_string(),
        })))
    }

    /// Create a detached text node.
    pub fn create_text(&self, content: &str) -> NodeId {
        let mut tree = self.inner.borrow_mut();
        tree.alloc(Node::new(NodeKind::Text {
            content: content.to_string(),
        }))
    }

    /// Append `child` as the last child of `parent`, re-parenting it if it
    /// was attached elsewhere.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let mut tree = self.inner.borrow_mut();
        if !tree.get(parent)?.is_element() {
            return Err(DomError::NotAnElement(parent));
        }
        tree.get(child)?;
        if tree.is_self_or_ancestor(parent, child) {
            return Err(DomError::WouldCycle(child));
        }
        tree.detach(child);
        tree.get_mut(parent)?.children.push(child);
        tree.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Swap `new` into `old`'s position under `old`'s parent.
    ///
    /// The swap happens under a single borrow of the tree: no reader can
    /// observe `old` detached without `new` already attached in its place.
    pub fn replace_child(&self, new: NodeId, old: NodeId) -> Result<(), DomError> {
        if new == old {
            return Ok(());
        }
        let mut tree = self.inner.borrow_mut();
        tree.get(new)?;
        let parent = tree.get(old)?.parent.ok_or(DomError::Detached(old))?;
        if tree.is_self_or_ancestor(parent, new) {
            return Err(DomError::WouldCycle(new));
        }
        tree.detach(new);
        let parent_node = tree.get_mut(parent)?;
        let position = parent_node
            .children
            .iter()
            .position(|c| *c == old)
            .ok_or(DomError::Detached(old))?;
        parent_node.children[position] = new;
        tree.get_mut(new)?.parent = Some(parent);
        tree.get_mut(old)?.parent = None;
        log::trace!("replaced {old:?} with {new:?} under {parent:?}");
        Ok(())
    }

    /// Parent of `id`, if it is attached.
    pub fn parent_node(&self, id: NodeId) -> Option<NodeId> {
        self.inner.borrow().nodes.get(&id.0).and_then(|n| n.parent)
    }

    /// Child ids of `id`, in document order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.inner
            .borrow()
            .nodes
            .get(&id.0)
            .map(|n| n.children.to_vec())
            .unwrap_or_default()
    }

    /// Tag name, if `id` is an element node.
    pub fn tag(&self, id: NodeId) -> Option<String> {
        match &self.inner.borrow().nodes.get(&id.0)?.kind {
            NodeKind::Element { tag } => Some(tag.clone()),
            NodeKind::Text { .. } => None,
        }
    }

    /// Text content, if `id` is a text node.
    pub fn text(&self, id: NodeId) -> Option<String> {
        match &self.inner.borrow().nodes.get(&id.0)?.kind {
            NodeKind::Text { content } => Some(content.clone()),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.inner
            .borrow()
            .nodes
            .get(&id.0)
            .is_some_and(Node::is_element)
    }

    /// A single applied property.
    pub fn attribute(&self, id: NodeId, key: &str) -> Option<String> {
        self.inner
            .borrow()
            .nodes
            .get(&id.0)?
            .attributes
            .get(key)
            .cloned()
    }

    /// All applied properties, in application order.
    pub fn attributes(&self, id: NodeId) -> IndexMap<String, String> {
        self.inner
            .borrow()
            .nodes
            .get(&id.0)
            .map(|n| n.attributes.clone())
            .unwrap_or_default()
    }

    /// A single style entry.
    pub fn style(&self, id: NodeId, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .nodes
            .get(&id.0)?
            .styles
            .get(name)
            .cloned()
    }

    /// The full style sub-mapping.
    pub fn styles(&self, id: NodeId) -> StyleMap {
        self.inner
            .borrow()
            .nodes
            .get(&id.0)
            .map(|n| n.styles.clone())
            .unwrap_or_default()
    }

    /// Names of the events with a bound handler, sorted.
    pub fn handlers(&self, id: NodeId) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .borrow()
            .nodes
            .get(&id.0)
            .map(|n| n.handlers.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Total number of nodes in the arena, attached or not.
    pub fn node_count(&self) -> usize {
        self.inner.borrow().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Detach `id` and delete its entire subtree, dropping any handlers
    /// bound inside it.
    pub fn remove(&self, id: NodeId) -> Result<(), DomError> {
        let mut tree = self.inner.borrow_mut();
        tree.get(id)?;
        tree.detach(id);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = tree.nodes.remove(&current.0) {
                stack.extend(node.children);
            }
        }
        Ok(())
    }

    /// Synchronously invoke the handler bound on `id` for this event's name.
    ///
    /// Returns whether a handler was bound. The tree borrow is released
    /// before the handler runs, so handlers may mutate the tree (the usual
    /// state-update path).
    pub fn dispatch(&self, id: NodeId, event: &Event) -> Result<bool, DomError> {
        let handler = {
            let tree = self.inner.borrow();
            tree.get(id)?.handlers.get(&event.name).cloned()
        };
        match handler {
            Some(handler) => {
                handler(event);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // Mutation points used by the attribute binder.

    pub(crate) fn bind_event(&self, id: NodeId, name: &str, handler: Handler) -> Result<(), DomError> {
        let mut tree = self.inner.borrow_mut();
        let node = tree.get_mut(id)?;
        if !node.is_element() {
            return Err(DomError::NotAnElement(id));
        }
        node.handlers.insert(name.to_string(), handler);
        Ok(())
    }

    pub(crate) fn unbind_event(&self, id: NodeId, name: &str) -> Result<(), DomError> {
        let mut tree = self.inner.borrow_mut();
        tree.get_mut(id)?.handlers.remove(name);
        Ok(())
    }

    pub(crate) fn set_styles(&self, id: NodeId, styles: StyleMap) -> Result<(), DomError> {
        let mut tree = self.inner.borrow_mut();
        let node = tree.get_mut(id)?;
        if !node.is_element() {
            return Err(DomError::NotAnElement(id));
        }
        node.styles = styles;
        Ok(())
    }

    pub(crate) fn set_property(&self, id: NodeId, key: &str, value: String) -> Result<(), DomError> {
        let mut tree = self.inner.borrow_mut();
        let node = tree.get_mut(id)?;
        if !node.is_element() {
            return Err(DomError::NotAnElement(id));
        }
        node.attributes.insert(key.to_string(), value);
        Ok(())
    }

    pub(crate) fn remove_property(&self, id: NodeId, key: &str) -> Result<(), DomError> {
        let mut tree = self.inner.borrow_mut();
        tree.get_mut(id)?.attributes.shift_remove(key);
        Ok(())
    }

    pub(crate) fn with_tree<R>(&self, f: impl FnOnce(&Tree) -> R) -> R {
        f(&self.inner.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_append() {
        let doc = Document::new();
        let root = doc.create_element("div").unwrap();
        let child = doc.create_text("hi");

        doc.append_child(root, child).unwrap();
        assert_eq!(doc.children(root), vec![child]);
        assert_eq!(doc.parent_node(child), Some(root));
        assert_eq!(doc.text(child).as_deref(), Some("hi"));
    }

    #[test]
    fn test_empty_tag_rejected() {
        let doc = Document::new();
        assert!(matches!(doc.create_element(""), Err(DomError::EmptyTag)));
    }

    #[test]
    fn test_append_to_text_rejected() {
        let doc = Document::new();
        let text = doc.create_text("x");
        let child = doc.create_text("y");
        assert!(matches!(
            doc.append_child(text, child),
            Err(DomError::NotAnElement(_))
        ));
    }

    #[test]
    fn test_append_cycle_rejected() {
        let doc = Document::new();
        let a = doc.create_element("a").unwrap();
        let b = doc.create_element("b").unwrap();
        doc.append_child(a, b).unwrap();

        assert!(matches!(
            doc.append_child(b, a),
            Err(DomError::WouldCycle(_))
        ));
        assert!(matches!(
            doc.append_child(a, a),
            Err(DomError::WouldCycle(_))
        ));
    }

    #[test]
    fn test_replace_preserves_position() {
        let doc = Document::new();
        let root = doc.create_element("ul").unwrap();
        let first = doc.create_element("li").unwrap();
        let second = doc.create_element("li").unwrap();
        let third = doc.create_element("li").unwrap();
        for child in [first, second, third] {
            doc.append_child(root, child).unwrap();
        }

        let fresh = doc.create_element("li").unwrap();
        doc.replace_child(fresh, second).unwrap();

        assert_eq!(doc.children(root), vec![first, fresh, third]);
        assert_eq!(doc.parent_node(fresh), Some(root));
        assert_eq!(doc.parent_node(second), None);
    }

    #[test]
    fn test_replace_detached_rejected() {
        let doc = Document::new();
        let old = doc.create_element("div").unwrap();
        let new = doc.create_element("div").unwrap();
        assert!(matches!(
            doc.replace_child(new, old),
            Err(DomError::Detached(_))
        ));
    }

    #[test]
    fn test_remove_frees_subtree() {
        let doc = Document::new();
        let root = doc.create_element("div").unwrap();
        let child = doc.create_element("span").unwrap();
        let grandchild = doc.create_text("deep");
        doc.append_child(root, child).unwrap();
        doc.append_child(child, grandchild).unwrap();
        assert_eq!(doc.node_count(), 3);

        doc.remove(child).unwrap();
        assert_eq!(doc.node_count(), 1);
        assert_eq!(doc.children(root), Vec::new());
    }

    #[test]
    fn test_dispatch_without_handler() {
        let doc = Document::new();
        let node = doc.create_element("button").unwrap();
        assert!(!doc.dispatch(node, &Event::new("click")).unwrap());
    }

    #[test]
    fn test_weak_handle() {
        let doc = Document::new();
        let weak = doc.downgrade();
        assert!(weak.upgrade().is_some());
        drop(doc);
        assert!(weak.upgrade().is_none());
    }
}
