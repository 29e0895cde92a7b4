//! The component contract: props, state, lifecycle hooks, and the link
//! through which event handlers reach back into their own instance.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::errors::RenderError;
use crate::types::{Event, Handler, Value};
use crate::vnode::VNode;

/// Input mapping for a component, replaced wholesale on each render request.
pub type Props = IndexMap<String, Value>;

/// Internal mutable mapping of a stateful component.
pub type State = IndexMap<String, Value>;

/// Shallow-merge `partial` into `state`: existing keys are overwritten in
/// place, new keys are appended, unrelated keys are preserved.
pub fn merge_state(state: &mut State, partial: State) {
    for (key, value) in partial {
        state.insert(key, value);
    }
}

/// The uniform contract every mounted component satisfies.
///
/// Stateful components implement this directly; function-style components
/// are wrapped into it at instantiation time. The lifecycle hooks default to
/// no-ops — a component either supplies a hook or it does not — and each
/// fires at most once per transition:
///
/// - [`will_mount`](Component::will_mount) before the very first render;
/// - [`did_mount`](Component::did_mount) after the first render's display
///   node is attached;
/// - [`will_update`](Component::will_update) before any re-render of an
///   already mounted instance;
/// - [`did_update`](Component::did_update) after the re-rendered display
///   node has replaced the old one.
///
/// `render` and the hooks run while the engine borrows the instance, so they
/// must not call [`Link::set_state`]; event handlers are the supported
/// mutation path.
pub trait Component {
    /// Initial state for a freshly constructed instance.
    fn initial_state(&self, props: &Props) -> State {
        let _ = props;
        State::new()
    }

    /// Produce the desired output. Pure with respect to anything but the
    /// context's props and state.
    fn render(&self, ctx: &Ctx<'_>) -> VNode;

    fn will_mount(&self, ctx: &Ctx<'_>) {
        let _ = ctx;
    }

    fn did_mount(&self, ctx: &Ctx<'_>) {
        let _ = ctx;
    }

    fn will_update(&self, ctx: &Ctx<'_>) {
        let _ = ctx;
    }

    fn did_update(&self, ctx: &Ctx<'_>) {
        let _ = ctx;
    }
}

/// The view of an instance passed to `render` and every lifecycle hook.
pub struct Ctx<'a> {
    pub props: &'a Props,
    pub state: &'a State,
    pub link: &'a Link,
}

impl<'a> Ctx<'a> {
    /// Look up a prop.
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    /// Look up a prop as a string.
    pub fn prop_str(&self, name: &str) -> Option<&str> {
        self.props.get(name).and_then(Value::as_str)
    }

    /// Look up a prop as a number.
    pub fn prop_number(&self, name: &str) -> Option<f64> {
        self.props.get(name).and_then(Value::as_number)
    }

    /// Look up a state entry.
    pub fn state(&self, name: &str) -> Option<&Value> {
        self.state.get(name)
    }

    /// Look up a state entry as a string.
    pub fn state_str(&self, name: &str) -> Option<&str> {
        self.state.get(name).and_then(Value::as_str)
    }

    /// Look up a state entry as a number.
    pub fn state_number(&self, name: &str) -> Option<f64> {
        self.state.get(name).and_then(Value::as_number)
    }
}

/// The engine-side seam behind [`Link`].
///
/// The runtime supplies the implementation; the contract only promises that
/// `set_state` shallow-merges and synchronously re-renders exactly the
/// instance the link was issued for.
pub trait Updater {
    fn set_state(&self, partial: State) -> Result<(), RenderError>;
}

/// A cloneable handle from a component's output back to its own instance.
///
/// Event bindings close over the specific link they must call back into;
/// there is no implicit shared scope.
#[derive(Clone)]
pub struct Link {
    updater: Rc<dyn Updater>,
}

impl Link {
    pub fn new(updater: Rc<dyn Updater>) -> Self {
        Self { updater }
    }

    /// Shallow-merge `partial` into the instance's state and synchronously
    /// re-render it. The updated display tree is observable as soon as this
    /// returns.
    pub fn set_state(&self, partial: State) -> Result<(), RenderError> {
        self.updater.set_state(partial)
    }

    /// Wrap a closure into a bindable [`Handler`] value.
    ///
    /// Event dispatch has no error channel; an `Err` from the closure is
    /// logged at warn level and dropped.
    pub fn handler<F>(&self, f: F) -> Handler
    where
        F: Fn(&Link, &Event) -> Result<(), RenderError> + 'static,
    {
        let link = self.clone();
        Rc::new(move |event: &Event| {
            if let Err(err) = f(&link, event) {
                log::warn!("event handler for {:?} failed: {err}", event.name);
            }
        })
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Link(..)")
    }
}
