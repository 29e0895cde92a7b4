//! The render engine: lowering, mount/replace, and state updates.
//!
//! Lowering converts a virtual node into real display nodes, rebuilding the
//! entire subtree below the point of invocation on every call — there is no
//! diffing and no memoization, full replacement is the observable contract.
//! `render_component` is the single re-render primitive shared by first
//! mounts and updates; which hooks fire around it, and whether the result is
//! appended by a parent or swapped in for an old subtree, is the only
//! difference between the two paths.

use std::rc::Rc;

use arbor_core::{merge_state, Ctx, NodeId, Props, RenderError, State, VNode};
use arbor_dom::{set_attribute, Document};

use crate::instance::{instantiate, link_for, SharedInstance};

/// Recursion guard for degenerate or self-referential trees.
const MAX_DEPTH: u32 = 256;

/// Lower `vnode` and append the result as the last child of `container`.
///
/// Existing children of `container` are left in place; the caller owns the
/// container region. `did_mount` hooks for components mounted in this pass
/// fire after the append, children before parents.
pub fn render(doc: &Document, vnode: &VNode, container: NodeId) -> Result<NodeId, RenderError> {
    let mut pending = Vec::new();
    let node = lower_into(doc, vnode, 0, &mut pending)?;
    doc.append_child(container, node)?;
    flush_mounted(doc, &pending);
    Ok(node)
}

/// Lower `vnode` into a fresh, detached display subtree.
///
/// Attachment is the caller's business, so `did_mount` hooks for components
/// mounted in this pass fire when lowering completes.
pub fn lower(doc: &Document, vnode: &VNode) -> Result<NodeId, RenderError> {
    let mut pending = Vec::new();
    let node = lower_into(doc, vnode, 0, &mut pending)?;
    flush_mounted(doc, &pending);
    Ok(node)
}

/// Re-render `instance`: invoke its `render`, lower the result, and swap the
/// fresh subtree in for the old `base` at the same position.
///
/// With no prior `base`, or a `base` that was never attached, the swap is
/// just the assignment — absence of a parent selects the append path, it is
/// not a failure.
pub fn render_component(doc: &Document, instance: &SharedInstance) -> Result<(), RenderError> {
    let mut pending = Vec::new();
    render_instance(doc, instance, 0, &mut pending)?;
    flush_mounted(doc, &pending);
    Ok(())
}

/// Replace `instance`'s props wholesale and re-render it.
pub fn set_props(doc: &Document, instance: &SharedInstance, props: Props) -> Result<(), RenderError> {
    instance.borrow_mut().props = props;
    render_component(doc, instance)
}

/// Shallow-merge `partial` into `instance`'s state and synchronously
/// re-render exactly this instance — not its parent, not its siblings. The
/// updated display tree is observable as soon as this returns.
pub fn set_state(doc: &Document, instance: &SharedInstance, partial: State) -> Result<(), RenderError> {
    {
        let mut inst = instance.borrow_mut();
        merge_state(&mut inst.state, partial);
    }
    log::debug!("state updated, re-rendering instance");
    render_component(doc, instance)
}

fn lower_into(
    doc: &Document,
    vnode: &VNode,
    depth: u32,
    pending: &mut Vec<SharedInstance>,
) -> Result<NodeId, RenderError> {
    if depth >= MAX_DEPTH {
        return Err(RenderError::DepthExceeded { depth: MAX_DEPTH });
    }
    match vnode {
        VNode::Text(content) => Ok(doc.create_text(content)),
        VNode::Element(el) => {
            let node = doc.create_element(&el.tag)?;
            for (key, value) in &el.attrs {
                set_attribute(doc, node, key, value)?;
            }
            for child in &el.children {
                let lowered = lower_into(doc, child, depth + 1, pending)?;
                doc.append_child(node, lowered)?;
            }
            Ok(node)
        }
        VNode::Component(comp) => {
            // comp.children are recorded on the node but not forwarded:
            // children only flow through element nodes.
            let instance = instantiate(&comp.def, comp.props.clone())?;
            render_instance(doc, &instance, depth + 1, pending)
        }
    }
}

/// The mount/replace primitive. Returns the fresh `base`.
fn render_instance(
    doc: &Document,
    instance: &SharedInstance,
    depth: u32,
    pending: &mut Vec<SharedInstance>,
) -> Result<NodeId, RenderError> {
    let link = link_for(doc, instance);

    let (rendered, first_mount) = {
        let inst = instance.borrow();
        let ctx = Ctx {
            props: &inst.props,
            state: &inst.state,
            link: &link,
        };
        let first_mount = inst.base.is_none();
        if first_mount {
            inst.behavior.will_mount(&ctx);
        } else {
            inst.behavior.will_update(&ctx);
        }
        (inst.behavior.render(&ctx), first_mount)
    };

    let new_base = lower_into(doc, &rendered, depth, pending)?;

    let old_base = instance.borrow_mut().base.replace(new_base);
    if let Some(old) = old_base {
        if doc.parent_node(old).is_some() {
            doc.replace_child(new_base, old)?;
        }
        // The old subtree is gone either way; dropping it releases its
        // handlers and any instances only they kept alive.
        doc.remove(old)?;
        log::debug!("replaced base {old:?} with {new_base:?}");
    }

    if first_mount {
        pending.push(Rc::clone(instance));
    } else {
        // Descendants freshly mounted by this re-render attached with the
        // replacement above: their did_mount runs now, before this
        // instance's did_update.
        let mounted = std::mem::take(pending);
        flush_mounted(doc, &mounted);

        let inst = instance.borrow();
        let ctx = Ctx {
            props: &inst.props,
            state: &inst.state,
            link: &link,
        };
        inst.behavior.did_update(&ctx);
    }

    Ok(new_base)
}

fn flush_mounted(doc: &Document, mounted: &[SharedInstance]) {
    for instance in mounted {
        let link = link_for(doc, instance);
        let inst = instance.borrow();
        let ctx = Ctx {
            props: &inst.props,
            state: &inst.state,
            link: &link,
        };
        inst.behavior.did_mount(&ctx);
    }
}
