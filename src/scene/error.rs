//! Errors raised by the host scene graph primitives

use thiserror::Error;

use super::NodeId;

/// A scene primitive refused to run
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    /// Handle does not resolve to a live node
    #[error("node {id} not found")]
    NodeNotFound { id: NodeId },

    /// Reparenting would make a node its own ancestor
    #[error("cannot parent node {node} under {parent}: it is an ancestor")]
    CyclicParent { node: NodeId, parent: NodeId },

    /// The host declined an operation for its own reasons
    #[error("{operation} refused: {reason}")]
    Refused { operation: String, reason: String },
}

impl SceneError {
    pub fn not_found(id: NodeId) -> Self {
        Self::NodeNotFound { id }
    }

    pub fn refused(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Refused {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}
