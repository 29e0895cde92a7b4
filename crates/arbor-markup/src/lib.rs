//! Declarative markup fragments for the Arbor engine.
//!
//! Turns an HTML-like template string into virtual-node trees, so sample
//! applications and tests can write their static structure as markup instead
//! of nested builder calls. Only element and text nodes come out of a
//! fragment; component nodes are constructed through the `ComponentNode` API
//! and composed around parsed fragments.

mod parser;

pub use parser::{parse, parse_one, parse_one_with, parse_with, ParseOptions};
