//! Host scene graph boundary
//!
//! The engine never owns nodes. It reads and writes them through the
//! [`SceneGraph`] trait, which exposes the host's primitives: lookup,
//! creation, reparenting, destruction, selection and the undo boundary.
//! [`Scene`] is the in-memory implementation used by the CLI and tests.

pub mod arena;
pub mod error;
pub mod file;
pub mod node;

pub use arena::Scene;
pub use error::SceneError;
pub use file::{world_report, SceneFile, SceneFileError};
pub use node::LayoutNode;

use std::fmt;

use crate::geometry::Vec2;

/// Opaque handle to a node owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Primitives the host scene graph provides to the engine
///
/// The trait is object safe so command handlers can run against
/// `&mut dyn SceneGraph`.
pub trait SceneGraph {
    fn node(&self, id: NodeId) -> Result<&LayoutNode, SceneError>;

    fn node_mut(&mut self, id: NodeId) -> Result<&mut LayoutNode, SceneError>;

    /// Children of `parent` in sibling order; `None` lists the root nodes
    fn children(&self, parent: Option<NodeId>) -> Result<&[NodeId], SceneError>;

    /// Size of the root canvas rectangle, whose origin is `(0, 0)`
    fn root_size(&self) -> Vec2;

    /// Insert `node` as the last child of `parent`
    fn create_node(
        &mut self,
        parent: Option<NodeId>,
        node: LayoutNode,
    ) -> Result<NodeId, SceneError>;

    /// Move `id` to the end of `new_parent`'s children
    ///
    /// With `preserve_world` the node keeps its world position and lossy
    /// scale; anchors, pivot and size delta are left untouched.
    fn set_parent(
        &mut self,
        id: NodeId,
        new_parent: Option<NodeId>,
        preserve_world: bool,
    ) -> Result<(), SceneError>;

    /// Remove `id` and its whole subtree
    fn destroy(&mut self, id: NodeId) -> Result<(), SceneError>;

    /// Replace the active selection
    fn select(&mut self, ids: &[NodeId]);

    fn selection(&self) -> &[NodeId];

    /// Open an undo group; nested calls join the outermost group
    fn begin_transaction(&mut self, label: &str);

    fn commit_transaction(&mut self);

    /// Revert everything done since the outermost `begin_transaction`
    fn abort_transaction(&mut self);

    /// Position of `id` among its siblings
    fn sibling_index(&self, id: NodeId) -> Result<usize, SceneError> {
        let parent = self.node(id)?.parent();
        self.children(parent)?
            .iter()
            .position(|c| *c == id)
            .ok_or(SceneError::not_found(id))
    }
}
