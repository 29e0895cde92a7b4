//! HTML text serialization of a rendered subtree.

use arbor_core::{DomError, NodeId};

use crate::tree::{Document, NodeKind, Tree};

impl Document {
    /// Render the subtree rooted at `id` as indented HTML-like text.
    ///
    /// Text and attribute values are escaped, the style sub-mapping is folded
    /// into a `style` attribute, and event handlers are omitted (they have no
    /// text form).
    pub fn to_html(&self, id: NodeId) -> Result<String, DomError> {
        self.with_tree(|tree| {
            let mut writer = HtmlWriter {
                out: String::new(),
                indent: 0,
            };
            writer.write_node(tree, id)?;
            Ok(writer.out)
        })
    }
}

struct HtmlWriter {
    out: String,
    indent: usize,
}

impl HtmlWriter {
    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn write_node(&mut self, tree: &Tree, id: NodeId) -> Result<(), DomError> {
        let node = tree.get(id)?;
        match &node.kind {
            NodeKind::Text { content } => {
                self.write_indent();
                self.out.push_str(&escape_text(content));
                self.out.push('\n');
            }
            NodeKind::Element { tag } => {
                let mut attrs = Vec::new();
                for (key, value) in &node.attributes {
                    attrs.push(format!("{key}=\"{}\"", escape_attr(value)));
                }
                if !node.styles.is_empty() {
                    let style: Vec<String> = node
                        .styles
                        .iter()
                        .map(|(name, value)| format!("{name}: {value}"))
                        .collect();
                    attrs.push(format!("style=\"{}\"", escape_attr(&style.join("; "))));
                }
                let attrs = if attrs.is_empty() {
                    String::new()
                } else {
                    format!(" {}", attrs.join(" "))
                };

                if node.children.is_empty() {
                    self.write_indent();
                    self.out.push_str(&format!("<{tag}{attrs} />\n"));
                } else {
                    self.write_indent();
                    self.out.push_str(&format!("<{tag}{attrs}>\n"));
                    self.indent += 1;
                    for child in &node.children {
                        self.write_node(tree, *child)?;
                    }
                    self.indent -= 1;
                    self.write_indent();
                    self.out.push_str(&format!("</{tag}>\n"));
                }
            }
        }
        Ok(())
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}
