//! Bounding-box aggregation over nodes and subtrees
//!
//! A node's bounds prefer renderable leaf geometry: if any active node in its
//! subtree carries a mesh, the result is the union of those meshes in world
//! space. Otherwise the four world corners of every active rectangle in the
//! subtree are accumulated, which stays correct under non-uniform scale.
//! With no candidates at all the box degenerates to the node's world
//! position and callers treat it as zero extent.

use crate::geometry::anchor::{world_rect, world_transform};
use crate::geometry::{anchor, Aabb};
use crate::scene::{NodeId, SceneError, SceneGraph};

/// Which candidates produced a bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsSource {
    /// Union of mesh extents
    Mesh,
    /// Union of rectangle corners
    Rect,
    /// No candidates; a single point at the node's world position
    Degenerate,
}

/// Bounds of a node's visible subtree, with the source that produced them
pub fn measure<S>(scene: &S, id: NodeId) -> Result<(Aabb, BoundsSource), SceneError>
where
    S: SceneGraph + ?Sized,
{
    let mut meshes = Aabb::EMPTY;
    let mut corners = Aabb::EMPTY;
    collect(scene, id, &mut meshes, &mut corners)?;

    if !meshes.is_empty() {
        Ok((meshes, BoundsSource::Mesh))
    } else if !corners.is_empty() {
        Ok((corners, BoundsSource::Rect))
    } else {
        let position = anchor::world_position(scene, id)?;
        Ok((Aabb::point(position), BoundsSource::Degenerate))
    }
}

/// World-space bounds of a node's visible subtree
pub fn node_bounds<S>(scene: &S, id: NodeId) -> Result<Aabb, SceneError>
where
    S: SceneGraph + ?Sized,
{
    Ok(measure(scene, id)?.0)
}

/// Union of per-node bounds; empty when `ids` is empty
pub fn selection_bounds<S>(scene: &S, ids: &[NodeId]) -> Result<Aabb, SceneError>
where
    S: SceneGraph + ?Sized,
{
    let mut total = Aabb::EMPTY;
    for id in ids {
        total = total.union(&node_bounds(scene, *id)?);
    }
    Ok(total)
}

fn collect<S>(
    scene: &S,
    id: NodeId,
    meshes: &mut Aabb,
    corners: &mut Aabb,
) -> Result<(), SceneError>
where
    S: SceneGraph + ?Sized,
{
    let node = scene.node(id)?;
    if !node.active {
        return Ok(());
    }

    let transform = world_transform(scene, id)?;
    if let Some(mesh) = &node.mesh {
        *meshes = meshes.union(&transform.transform_aabb(mesh));
    }
    for corner in world_rect(scene, id)?.corners() {
        corners.include_point(corner.extend(transform.position.z));
    }

    for child in node.children() {
        collect(scene, *child, meshes, corners)?;
    }
    Ok(())
}
