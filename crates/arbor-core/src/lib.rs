//! Core types for the Arbor rendering engine.
//!
//! This crate provides the foundational types used across all other arbor
//! crates:
//! - The virtual-node model (text / element / component shapes)
//! - Attribute, prop, and state value types
//! - The component contract (props, state, lifecycle hooks, links)
//! - Error types

pub mod component;
pub mod errors;
pub mod types;
pub mod vnode;

pub use component::*;
pub use errors::*;
pub use types::*;
pub use vnode::*;
