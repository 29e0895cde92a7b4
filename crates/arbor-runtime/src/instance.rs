//! Component instantiation.
//!
//! Normalizes the two component styles into one runtime shape: a stateful
//! definition is constructed directly, a function definition is wrapped into
//! a synthetic behavior whose `render` invokes the function with the stored
//! props. After this point the engine treats every instance identically.

use std::cell::RefCell;
use std::rc::Rc;

use arbor_core::{
    Component, ComponentDef, Ctx, Link, NodeId, Props, RenderError, State, Updater, VNode, ViewFn,
};
use arbor_dom::{Document, WeakDocument};

/// The runtime object backing a mounted component node.
pub struct ComponentInstance {
    pub(crate) behavior: Box<dyn Component>,
    /// Last-assigned input mapping, replaced wholesale on each render request.
    pub props: Props,
    /// Internal mutable mapping, mutated only through the state-update path.
    pub state: State,
    /// The live display node currently representing this instance's output;
    /// `None` before the first render.
    pub base: Option<NodeId>,
}

/// Shared handle to a [`ComponentInstance`].
///
/// Event handlers bound during a render keep a strong handle, so an instance
/// stays alive exactly as long as something in the display tree can still
/// call back into it.
pub type SharedInstance = Rc<RefCell<ComponentInstance>>;

/// Construct an instance for a component definition.
///
/// A `Stateful` definition runs its constructor with the props (errors
/// propagate unchanged); a `Function` definition is wrapped. Either way the
/// behavior's `initial_state` seeds the state and `base` starts empty.
pub fn instantiate(def: &ComponentDef, props: Props) -> Result<SharedInstance, RenderError> {
    let behavior: Box<dyn Component> = match def {
        ComponentDef::Stateful(ctor) => ctor(&props)?,
        ComponentDef::Function(body) => Box::new(FnBehavior {
            body: Rc::clone(body),
        }),
    };
    let state = behavior.initial_state(&props);
    Ok(Rc::new(RefCell::new(ComponentInstance {
        behavior,
        props,
        state,
        base: None,
    })))
}

/// Synthetic behavior wrapping a function-style component.
///
/// Keeps every lifecycle hook at its no-op default: function components have
/// none to call.
struct FnBehavior {
    body: Rc<ViewFn>,
}

impl Component for FnBehavior {
    fn render(&self, ctx: &Ctx<'_>) -> VNode {
        (self.body)(ctx.props)
    }
}

/// The engine's [`Updater`]: a weak host handle plus the instance the link
/// was issued for. Weak on the host side so a handler held by the tree never
/// keeps the tree alive through its own link.
pub(crate) struct InstanceUpdater {
    doc: WeakDocument,
    instance: SharedInstance,
}

impl Updater for InstanceUpdater {
    fn set_state(&self, partial: State) -> Result<(), RenderError> {
        let doc = self.doc.upgrade().ok_or(RenderError::HostGone)?;
        crate::engine::set_state(&doc, &self.instance, partial)
    }
}

/// Issue a link binding `instance` to `doc`.
pub(crate) fn link_for(doc: &Document, instance: &SharedInstance) -> Link {
    Link::new(Rc::new(InstanceUpdater {
        doc: doc.downgrade(),
        instance: Rc::clone(instance),
    }))
}
