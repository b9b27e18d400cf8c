//! Anchor and pivot arithmetic
//!
//! Converts between a node's anchor-relative quantities (anchors, pivot,
//! size delta, anchored position) and world space. A node's world transform
//! is translation plus per-axis scale; rotation is not modelled.
//!
//! ## Coordinate Spaces
//!
//! - **Parent rect**: in the parent's local space the parent rectangle spans
//!   `-pivot * size .. (1 - pivot) * size`. Root nodes anchor against the
//!   canvas `[0, root_size]`.
//! - **Anchor reference**: `parent_min + parent_size * lerp(anchor_min, anchor_max, pivot)`.
//!   The node's local position is this point plus `anchored_position`.
//! - **World**: local positions are scaled by the parent's lossy scale and
//!   offset by the parent's world position, all the way to the root.

use crate::geometry::{Aabb, Axis, Rect, Vec2, Vec3};
use crate::scene::{NodeId, SceneError, SceneGraph};

/// Translation and per-axis scale from a local space into world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    pub position: Vec3,
    pub scale: Vec3,
}

impl WorldTransform {
    pub const IDENTITY: WorldTransform = WorldTransform {
        position: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + local.scale(self.scale)
    }

    /// Map a world point into this local space
    ///
    /// Axes with zero scale collapse every point onto the origin.
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        fn solve(w: f64, p: f64, s: f64) -> f64 {
            if s == 0.0 {
                0.0
            } else {
                (w - p) / s
            }
        }
        Vec3::new(
            solve(world.x, self.position.x, self.scale.x),
            solve(world.y, self.position.y, self.scale.y),
            solve(world.z, self.position.z, self.scale.z),
        )
    }

    /// Transform a local box, re-sorting corners so negative scale stays valid
    pub fn transform_aabb(&self, local: &Aabb) -> Aabb {
        let mut out = Aabb::EMPTY;
        for corner in local.corners() {
            out.include_point(self.transform_point(corner));
        }
        out
    }

    pub fn inverse_transform_aabb(&self, world: &Aabb) -> Aabb {
        let mut out = Aabb::EMPTY;
        for corner in [world.min, world.max] {
            out.include_point(self.inverse_transform_point(corner));
        }
        out
    }

    /// Compose with a child's local position and scale
    pub fn then(&self, local_position: Vec3, local_scale: Vec3) -> WorldTransform {
        WorldTransform {
            position: self.transform_point(local_position),
            scale: self.scale.scale(local_scale),
        }
    }
}

/// Minimum corner and size of the rectangle `parent` offers its children,
/// in the parent's local space
pub fn parent_rect<S>(scene: &S, parent: Option<NodeId>) -> Result<(Vec2, Vec2), SceneError>
where
    S: SceneGraph + ?Sized,
{
    match parent {
        None => Ok((Vec2::ZERO, scene.root_size())),
        Some(p) => {
            let size = rect_size(scene, p)?;
            let pivot = scene.node(p)?.pivot;
            Ok((Vec2::ZERO - pivot.scale(size), size))
        }
    }
}

/// Size of a node's own rectangle in its local space (before scale)
pub fn rect_size<S>(scene: &S, id: NodeId) -> Result<Vec2, SceneError>
where
    S: SceneGraph + ?Sized,
{
    let node = scene.node(id)?;
    let (_, parent_size) = parent_rect(scene, node.parent())?;
    Ok(parent_size.scale(node.anchor_max - node.anchor_min) + node.size_delta)
}

/// Point in the parent's local space that `anchored_position` is measured from
pub fn anchor_reference<S>(scene: &S, id: NodeId) -> Result<Vec2, SceneError>
where
    S: SceneGraph + ?Sized,
{
    let node = scene.node(id)?;
    let (min, size) = parent_rect(scene, node.parent())?;
    Ok(min + size.scale(node.anchor_min.lerp(node.anchor_max, node.pivot)))
}

/// Pivot position in the parent's local space
pub fn local_position<S>(scene: &S, id: NodeId) -> Result<Vec3, SceneError>
where
    S: SceneGraph + ?Sized,
{
    let reference = anchor_reference(scene, id)?;
    let anchored = scene.node(id)?.anchored_position;
    Ok((reference + anchored.xy()).extend(anchored.z))
}

/// Transform from `parent`'s local space to world space
pub fn parent_transform<S>(scene: &S, parent: Option<NodeId>) -> Result<WorldTransform, SceneError>
where
    S: SceneGraph + ?Sized,
{
    match parent {
        None => Ok(WorldTransform::IDENTITY),
        Some(p) => world_transform(scene, p),
    }
}

/// Transform from the node's own local space to world space
pub fn world_transform<S>(scene: &S, id: NodeId) -> Result<WorldTransform, SceneError>
where
    S: SceneGraph + ?Sized,
{
    let node = scene.node(id)?;
    let parent = parent_transform(scene, node.parent())?;
    Ok(parent.then(local_position(scene, id)?, node.local_scale))
}

pub fn world_position<S>(scene: &S, id: NodeId) -> Result<Vec3, SceneError>
where
    S: SceneGraph + ?Sized,
{
    Ok(world_transform(scene, id)?.position)
}

/// Product of the node's and all its ancestors' local scales
pub fn lossy_scale<S>(scene: &S, id: NodeId) -> Result<Vec3, SceneError>
where
    S: SceneGraph + ?Sized,
{
    Ok(world_transform(scene, id)?.scale)
}

/// Width and height after scale
pub fn world_size<S>(scene: &S, id: NodeId) -> Result<Vec2, SceneError>
where
    S: SceneGraph + ?Sized,
{
    let lossy = lossy_scale(scene, id)?;
    Ok(rect_size(scene, id)?.scale(lossy.xy()))
}

pub fn world_rect<S>(scene: &S, id: NodeId) -> Result<Rect, SceneError>
where
    S: SceneGraph + ?Sized,
{
    let position = world_position(scene, id)?;
    let pivot = scene.node(id)?.pivot;
    Ok(rect_from_pivot(position.xy(), pivot, world_size(scene, id)?))
}

/// Rectangle whose `pivot` point sits at `position`
pub fn rect_from_pivot(position: Vec2, pivot: Vec2, size: Vec2) -> Rect {
    Rect::new(
        position.x - pivot.x * size.x,
        position.y - pivot.y * size.y,
        size.x,
        size.y,
    )
}

/// Pivot coordinate that puts a rectangle's low edge (left/bottom) at `edge`
pub fn pivot_for_min_edge(edge: f64, extent: f64, pivot: f64) -> f64 {
    edge + pivot * extent
}

/// Pivot coordinate that puts a rectangle's high edge (right/top) at `edge`
pub fn pivot_for_max_edge(edge: f64, extent: f64, pivot: f64) -> f64 {
    edge - extent + pivot * extent
}

/// Pivot coordinate that centers a rectangle of `extent` within `low..low + span`
pub fn pivot_for_center(low: f64, span: f64, extent: f64, pivot: f64) -> f64 {
    low + 0.5 * (span - extent) + pivot * extent
}

/// Solve `anchored_position` so the pivot lands on `world`
pub fn set_world_position<S>(scene: &mut S, id: NodeId, world: Vec3) -> Result<(), SceneError>
where
    S: SceneGraph + ?Sized,
{
    let parent = scene.node(id)?.parent();
    let local = parent_transform(scene, parent)?.inverse_transform_point(world);
    set_local_position(scene, id, local)
}

/// Solve `anchored_position` for a pivot position in the parent's local space
pub fn set_local_position<S>(scene: &mut S, id: NodeId, local: Vec3) -> Result<(), SceneError>
where
    S: SceneGraph + ?Sized,
{
    let reference = anchor_reference(scene, id)?;
    let anchored = local.xy() - reference;
    scene.node_mut(id)?.anchored_position = anchored.extend(local.z);
    Ok(())
}

/// Move the pivot along one world axis, leaving the other untouched
pub fn set_world_axis<S>(scene: &mut S, id: NodeId, axis: Axis, value: f64) -> Result<(), SceneError>
where
    S: SceneGraph + ?Sized,
{
    let current = world_position(scene, id)?;
    let target = match axis {
        Axis::Horizontal => Vec3::new(value, current.y, current.z),
        Axis::Vertical => Vec3::new(current.x, value, current.z),
    };
    set_world_position(scene, id, target)
}

/// Resize to a world width/height with the current anchors, pivot held fixed
///
/// The size delta absorbs the node's own lossy scale, so nodes with different
/// scales end up with the same world extent. Axes with zero scale keep their
/// current size.
pub fn set_world_size<S>(scene: &mut S, id: NodeId, size: Vec2) -> Result<(), SceneError>
where
    S: SceneGraph + ?Sized,
{
    let lossy = lossy_scale(scene, id)?.xy();
    let current = rect_size(scene, id)?;
    let local = Vec2::new(
        if lossy.x == 0.0 { current.x } else { size.x / lossy.x },
        if lossy.y == 0.0 { current.y } else { size.y / lossy.y },
    );
    let parent = scene.node(id)?.parent();
    let (_, parent_size) = parent_rect(scene, parent)?;
    let node = scene.node_mut(id)?;
    node.size_delta = local - parent_size.scale(node.anchor_max - node.anchor_min);
    Ok(())
}
