//! Error types for the Arbor engine.

use crate::types::NodeId;
use thiserror::Error;

/// Top-level error type for the Arbor engine.
#[derive(Debug, Error)]
pub enum ArborError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors during markup parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unexpected token at line {line}, column {column}: expected {expected}, found {found:?}")]
    UnexpectedToken {
        found: String,
        expected: String,
        line: u32,
        column: u32,
    },

    #[error("Mismatched closing tag at line {line}: opened <{opened}>, closed </{closed}>")]
    MismatchedTag {
        opened: String,
        closed: String,
        line: u32,
    },

    #[error("Unterminated string starting at line {line}")]
    UnterminatedString { line: u32 },

    #[error("Expected a single root node, found extra content at line {line}")]
    ExtraContent { line: u32 },

    #[error("Unexpected end of input")]
    UnexpectedEof,
}

/// Errors raised by the display-tree host.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("Element tag must not be empty")]
    EmptyTag,

    #[error("Unknown display node {0:?}")]
    UnknownNode(NodeId),

    #[error("Node {0:?} is a text node and cannot carry children or attributes")]
    NotAnElement(NodeId),

    #[error("Node {0:?} has no parent to replace it under")]
    Detached(NodeId),

    #[error("Appending node {0:?} here would create a cycle")]
    WouldCycle(NodeId),
}

/// Errors during component rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("Component constructor failed: {reason}")]
    Construct { reason: String },

    #[error("Display-tree host is no longer alive")]
    HostGone,

    #[error("Maximum render depth ({depth}) exceeded")]
    DepthExceeded { depth: u32 },
}

impl RenderError {
    /// Shorthand for a constructor failure.
    pub fn construct(reason: impl Into<String>) -> Self {
        RenderError::Construct {
            reason: reason.into(),
        }
    }
}
