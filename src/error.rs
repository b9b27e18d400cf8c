//! Domain errors for alignment and grouping operations

use thiserror::Error;

use crate::scene::{NodeId, SceneError};

/// Errors surfaced to the caller when an operation is rejected
///
/// Precondition variants are raised during validation, before any node is
/// touched. `Scene` wraps a host primitive failure that happened mid-edit;
/// the surrounding transaction has already been rolled back when it reaches
/// the caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// Operation needs at least one node
    #[error("select at least one node")]
    EmptySelection,

    /// Grouped nodes do not share a parent
    #[error("cannot group across different parents")]
    CrossParentGroup { first: NodeId, other: NodeId },

    /// Ungroup target is a leaf
    #[error("no child nodes to ungroup")]
    NoChildren { node: NodeId },

    /// Operation needs exactly one node
    #[error("select exactly one node (got {count})")]
    MultipleSelection { count: usize },

    /// Command id not present in the registry
    #[error("unknown command '{name}'")]
    UnknownCommand { name: String, suggestions: Vec<String> },

    /// Text that does not name an alignment kind
    #[error("unknown alignment '{name}'")]
    UnknownAlignKind { name: String },

    /// Host primitive failure
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}

impl LayoutError {
    pub fn cross_parent(first: NodeId, other: NodeId) -> Self {
        Self::CrossParentGroup { first, other }
    }

    pub fn unknown_command(name: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::UnknownCommand {
            name: name.into(),
            suggestions,
        }
    }

    /// True for errors raised before any mutation was attempted
    pub fn is_precondition(&self) -> bool {
        !matches!(self, Self::Scene(_))
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownCommand { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_parent_display() {
        let err = LayoutError::cross_parent(NodeId::from_raw(1), NodeId::from_raw(2));
        assert_eq!(err.to_string(), "cannot group across different parents");
        assert!(err.is_precondition());
    }

    #[test]
    fn test_multiple_selection_display() {
        let err = LayoutError::MultipleSelection { count: 3 };
        assert!(err.to_string().contains("exactly one"));
    }

    #[test]
    fn test_scene_error_is_not_precondition() {
        let err: LayoutError = SceneError::refused("destroy", "locked").into();
        assert!(!err.is_precondition());
        assert!(err.to_string().contains("destroy refused"));
    }

    #[test]
    fn test_unknown_command_suggestions() {
        let err = LayoutError::unknown_command("algn-left", vec!["align-left".to_string()]);
        assert_eq!(err.suggestions(), Some(&["align-left".to_string()][..]));
    }
}
