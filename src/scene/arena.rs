//! In-memory scene graph host
//!
//! Nodes live in an arena indexed by [`NodeId`]. Slots are never reused, so a
//! handle to a destroyed node stays invalid. Transactions snapshot the arena
//! and either roll back to the snapshot or push it onto an undo stack.

use tracing::debug;

use crate::geometry::{anchor, Vec2, Vec3};

use super::{LayoutNode, NodeId, SceneError, SceneGraph};

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    nodes: Vec<Option<LayoutNode>>,
    roots: Vec<NodeId>,
    selection: Vec<NodeId>,
}

#[derive(Debug, Clone)]
struct OpenTransaction {
    label: String,
    snapshot: Snapshot,
    depth: usize,
}

/// An arena-backed scene graph implementing [`SceneGraph`]
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Option<LayoutNode>>,
    roots: Vec<NodeId>,
    root_size: Vec2,
    selection: Vec<NodeId>,
    open: Option<OpenTransaction>,
    undo_stack: Vec<(String, Snapshot)>,
}

impl Scene {
    /// An empty scene with a zero-size canvas
    pub fn new() -> Self {
        Self::with_root_size(Vec2::ZERO)
    }

    pub fn with_root_size(root_size: Vec2) -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            root_size,
            selection: Vec::new(),
            open: None,
            undo_stack: Vec::new(),
        }
    }

    pub fn add_root(&mut self, node: LayoutNode) -> Result<NodeId, SceneError> {
        self.create_node(None, node)
    }

    pub fn add_child(&mut self, parent: NodeId, node: LayoutNode) -> Result<NodeId, SceneError> {
        self.create_node(Some(parent), node)
    }

    /// First live node with the given name, in creation order
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    /// All live nodes in creation order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &LayoutNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|n| (NodeId(i as u32), n)))
    }

    /// Every live node, parents before children, siblings in order
    pub fn depth_first(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = self.roots.iter().rev().map(|r| (*r, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            if let Some(node) = self.get(id) {
                stack.extend(node.children.iter().rev().map(|c| (*c, depth + 1)));
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Labels of committed transactions, oldest first
    pub fn history(&self) -> Vec<&str> {
        self.undo_stack.iter().map(|(label, _)| label.as_str()).collect()
    }

    /// Revert the most recent committed transaction, returning its label
    pub fn undo(&mut self) -> Option<String> {
        let (label, snapshot) = self.undo_stack.pop()?;
        self.restore(snapshot);
        debug!(%label, "undo");
        Some(label)
    }

    fn get(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            nodes: self.nodes.clone(),
            roots: self.roots.clone(),
            selection: self.selection.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        // Slots created after the snapshot stay allocated as empty
        let allocated = self.nodes.len().max(snapshot.nodes.len());
        self.nodes = snapshot.nodes;
        self.nodes.resize(allocated, None);
        self.roots = snapshot.roots;
        self.selection = snapshot.selection;
    }

    fn siblings_mut(&mut self, parent: Option<NodeId>) -> Result<&mut Vec<NodeId>, SceneError> {
        match parent {
            None => Ok(&mut self.roots),
            Some(p) => Ok(&mut self.node_mut(p)?.children),
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.get(id).and_then(|n| n.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for Scene {
    fn node(&self, id: NodeId) -> Result<&LayoutNode, SceneError> {
        self.get(id).ok_or(SceneError::not_found(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut LayoutNode, SceneError> {
        self.nodes
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(SceneError::not_found(id))
    }

    fn children(&self, parent: Option<NodeId>) -> Result<&[NodeId], SceneError> {
        match parent {
            None => Ok(&self.roots),
            Some(p) => Ok(&self.node(p)?.children),
        }
    }

    fn root_size(&self) -> Vec2 {
        self.root_size
    }

    fn create_node(
        &mut self,
        parent: Option<NodeId>,
        mut node: LayoutNode,
    ) -> Result<NodeId, SceneError> {
        if let Some(p) = parent {
            self.node(p)?;
        }
        let id = NodeId(self.nodes.len() as u32);
        node.parent = parent;
        node.children.clear();
        self.nodes.push(Some(node));
        self.siblings_mut(parent)?.push(id);
        Ok(id)
    }

    fn set_parent(
        &mut self,
        id: NodeId,
        new_parent: Option<NodeId>,
        preserve_world: bool,
    ) -> Result<(), SceneError> {
        if let Some(p) = new_parent {
            self.node(p)?;
            if self.is_ancestor_or_self(id, p) {
                return Err(SceneError::CyclicParent { node: id, parent: p });
            }
        }

        let world = anchor::world_transform(self, id)?;
        let world_size = anchor::world_size(self, id)?;
        let parent_scale = anchor::parent_transform(self, new_parent)?.scale;

        let old_parent = self.node(id)?.parent;
        self.siblings_mut(old_parent)?.retain(|c| *c != id);
        self.siblings_mut(new_parent)?.push(id);
        self.node_mut(id)?.parent = new_parent;

        if preserve_world {
            fn ratio(world: f64, parent: f64) -> f64 {
                if parent == 0.0 {
                    world
                } else {
                    world / parent
                }
            }
            self.node_mut(id)?.local_scale = Vec3::new(
                ratio(world.scale.x, parent_scale.x),
                ratio(world.scale.y, parent_scale.y),
                ratio(world.scale.z, parent_scale.z),
            );
            // Stretched extents follow the parent rect, so re-solve the size delta
            if self.node(id)?.is_stretched() {
                anchor::set_world_size(self, id, world_size)?;
            }
            anchor::set_world_position(self, id, world.position)?;
        }
        Ok(())
    }

    fn destroy(&mut self, id: NodeId) -> Result<(), SceneError> {
        let parent = self.node(id)?.parent;
        self.siblings_mut(parent)?.retain(|c| *c != id);

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(next.0 as usize).and_then(Option::take) {
                pending.extend(node.children);
            }
        }
        let nodes = &self.nodes;
        self.selection
            .retain(|s| nodes.get(s.0 as usize).map_or(false, Option::is_some));
        Ok(())
    }

    fn select(&mut self, ids: &[NodeId]) {
        self.selection = ids.to_vec();
    }

    fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    fn begin_transaction(&mut self, label: &str) {
        match &mut self.open {
            Some(open) => open.depth += 1,
            None => {
                self.open = Some(OpenTransaction {
                    label: label.to_string(),
                    snapshot: self.snapshot(),
                    depth: 0,
                })
            }
        }
    }

    fn commit_transaction(&mut self) {
        let Some(open) = &mut self.open else {
            return;
        };
        if open.depth > 0 {
            open.depth -= 1;
            return;
        }
        if let Some(open) = self.open.take() {
            self.undo_stack.push((open.label, open.snapshot));
        }
    }

    fn abort_transaction(&mut self) {
        if let Some(open) = self.open.take() {
            debug!(label = %open.label, "rolling back transaction");
            self.restore(open.snapshot);
        }
    }
}
