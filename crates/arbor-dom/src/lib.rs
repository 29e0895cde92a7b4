//! Headless display-tree host for the Arbor rendering engine.
//!
//! The render engine treats the display tree as an injected capability set:
//! node creation, append, replace, parent lookup, removal, and synchronous
//! event dispatch. This crate provides that capability set over an id-indexed
//! arena, together with the attribute binder that sorts key/value pairs into
//! event bindings, the style sub-mapping, and plain properties, plus two
//! serializations of a rendered subtree for callers and tests.

mod attr;
mod html;
mod snapshot;
mod tree;

pub use attr::set_attribute;
pub use snapshot::NodeSnapshot;
pub use tree::{Document, WeakDocument};
