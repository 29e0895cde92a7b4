//! Owned snapshots of a rendered subtree, for structural assertions.

use indexmap::IndexMap;

use arbor_core::{DomError, NodeId, StyleMap};

use crate::tree::{Document, NodeKind, Tree};

/// A plain owned copy of a display subtree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeSnapshot {
    Text {
        text: String,
    },
    Element {
        tag: String,
        attributes: IndexMap<String, String>,
        styles: StyleMap,
        /// Names of events with a bound handler, sorted.
        events: Vec<String>,
        children: Vec<NodeSnapshot>,
    },
}

impl NodeSnapshot {
    /// Concatenated text content of the subtree.
    pub fn text_content(&self) -> String {
        match self {
            NodeSnapshot::Text { text } => text.clone(),
            NodeSnapshot::Element { children, .. } => {
                children.iter().map(NodeSnapshot::text_content).collect()
            }
        }
    }

    /// Tag name, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match self {
            NodeSnapshot::Element { tag, .. } => Some(tag),
            NodeSnapshot::Text { .. } => None,
        }
    }
}

impl Document {
    /// Copy the subtree rooted at `id` into an owned snapshot.
    pub fn snapshot(&self, id: NodeId) -> Result<NodeSnapshot, DomError> {
        self.with_tree(|tree| snapshot_node(tree, id))
    }
}

fn snapshot_node(tree: &Tree, id: NodeId) -> Result<NodeSnapshot, DomError> {
    let node = tree.get(id)?;
    Ok(match &node.kind {
        NodeKind::Text { content } => NodeSnapshot::Text {
            text: content.clone(),
        },
        NodeKind::Element { tag } => {
            let mut events: Vec<String> = node.handlers.keys().cloned().collect();
            events.sort();
            let children = node
                .children
                .iter()
                .map(|child| snapshot_node(tree, *child))
                .collect::<Result<Vec<_>, _>>()?;
            NodeSnapshot::Element {
                tag: tag.clone(),
                attributes: node.attributes.clone(),
                styles: node.styles.clone(),
                events,
                children,
            }
        }
    })
}
