//! Immutable geometry snapshot of a selection
//!
//! Every read an operation needs is taken here, before the first write, so a
//! batch never observes a sibling or ancestor it has already moved.

use crate::geometry::{anchor, Rect, Vec2, Vec3};
use crate::scene::{NodeId, SceneError, SceneGraph};

/// World-space geometry of one selected node at capture time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeGeometry {
    pub id: NodeId,
    /// World position of the pivot
    pub position: Vec3,
    pub pivot: Vec2,
    pub rect: Rect,
}

/// Ordered copy of the selected nodes' geometry; the first entry is the template
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSnapshot {
    entries: Vec<NodeGeometry>,
}

impl SelectionSnapshot {
    /// Read every selected node, keeping the first occurrence of duplicates
    pub fn capture<S>(scene: &S, ids: &[NodeId]) -> Result<Self, SceneError>
    where
        S: SceneGraph + ?Sized,
    {
        let entries = unique(ids)
            .into_iter()
            .map(|id| {
                Ok(NodeGeometry {
                    id,
                    position: anchor::world_position(scene, id)?,
                    pivot: scene.node(id)?.pivot,
                    rect: anchor::world_rect(scene, id)?,
                })
            })
            .collect::<Result<Vec<_>, SceneError>>()?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The node every Align operation copies from
    pub fn template(&self) -> Option<&NodeGeometry> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[NodeGeometry] {
        &self.entries
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.entries.iter().map(|e| e.id).collect()
    }
}

/// Drop repeated ids, preserving first-seen order
pub fn unique(ids: &[NodeId]) -> Vec<NodeId> {
    let mut out: Vec<NodeId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    out
}
