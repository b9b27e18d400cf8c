//! The layout node: anchor-relative geometry of one rectangle

use crate::geometry::{Aabb, Vec2, Vec3};

use super::NodeId;

/// A rectangular node positioned relative to its parent's rectangle
///
/// Only `anchored_position`, `size_delta`, `local_scale` and the parent link
/// are ever written by the engine. Everything in world space is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Lower-left corner of the anchor rectangle, as a fraction of the parent rect
    pub anchor_min: Vec2,
    /// Upper-right corner of the anchor rectangle, as a fraction of the parent rect
    pub anchor_max: Vec2,
    /// Normalized reference point within the node's own rectangle
    pub pivot: Vec2,
    /// Size for point anchors, padding from the stretched edges otherwise
    pub size_delta: Vec2,
    /// Offset of the pivot from the anchor reference point (z is carried, never laid out)
    pub anchored_position: Vec3,
    pub local_scale: Vec3,
    /// Inactive nodes and their subtrees contribute no bounds
    pub active: bool,
    /// Renderable geometry extents in this node's local space
    pub mesh: Option<Aabb>,
}

impl LayoutNode {
    /// A fixed-size node with centered anchors and pivot
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            anchor_min: Vec2::HALF,
            anchor_max: Vec2::HALF,
            pivot: Vec2::HALF,
            size_delta: Vec2::new(100.0, 100.0),
            anchored_position: Vec3::ZERO,
            local_scale: Vec3::ONE,
            active: true,
            mesh: None,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size_delta = Vec2::new(width, height);
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.anchored_position = Vec3::new(x, y, self.anchored_position.z);
        self
    }

    pub fn with_pivot(mut self, x: f64, y: f64) -> Self {
        self.pivot = Vec2::new(x, y);
        self
    }

    pub fn with_anchors(mut self, min: Vec2, max: Vec2) -> Self {
        self.anchor_min = min;
        self.anchor_max = max;
        self
    }

    pub fn with_scale(mut self, x: f64, y: f64) -> Self {
        self.local_scale = Vec3::new(x, y, self.local_scale.z);
        self
    }

    pub fn with_mesh(mut self, mesh: Aabb) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in sibling order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// True when the node stretches with its parent along either axis
    pub fn is_stretched(&self) -> bool {
        self.anchor_min != self.anchor_max
    }
}
