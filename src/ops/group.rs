//! Wrapping nodes in a container and unwrapping them again
//!
//! Grouping measures the selection in the common parent's local space, creates
//! a container covering that box, then reparents the selection into it in
//! sibling order. Ungrouping moves a container's children up to its parent and
//! destroys the emptied container. Both rely on the host's world-preserving
//! reparent primitive, so nodes keep their on-screen geometry.

use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::geometry::anchor::{parent_transform, set_local_position};
use crate::geometry::bounds::node_bounds;
use crate::geometry::Aabb;
use crate::scene::{LayoutNode, NodeId, SceneError, SceneGraph};

use super::in_transaction;
use super::selection::unique;

/// Wrap `selection` in a new container and return it
///
/// Every node must share the same parent. The container is appended as the
/// parent's last child, sized to the selection's bounds and positioned so its
/// pivot sits at the matching point of that box.
#[tracing::instrument(level = "debug", skip(scene, selection, config), fields(nodes = selection.len()))]
pub fn make_group<S>(
    scene: &mut S,
    selection: &[NodeId],
    config: &LayoutConfig,
) -> Result<NodeId, LayoutError>
where
    S: SceneGraph + ?Sized,
{
    let ids = unique(selection);
    let Some(&first) = ids.first() else {
        return Err(LayoutError::EmptySelection);
    };

    let parent = scene.node(first)?.parent();
    for id in &ids[1..] {
        if scene.node(*id)?.parent() != parent {
            return Err(LayoutError::cross_parent(first, *id));
        }
    }

    let to_parent = parent_transform(scene, parent)?;
    let mut local = Aabb::EMPTY;
    for id in &ids {
        let world = node_bounds(scene, *id)?;
        local = local.union(&to_parent.inverse_transform_aabb(&world));
    }

    let mut ordered = ids
        .iter()
        .map(|id| Ok((scene.sibling_index(*id)?, *id)))
        .collect::<Result<Vec<_>, SceneError>>()?;
    ordered.sort_by_key(|(index, _)| *index);

    let size = local.size().xy();
    let pivot = config.container_pivot;
    let pivot_point = (local.min.xy() + pivot.scale(size)).extend(local.center().z);
    debug!(?size, ?pivot_point, "container box in parent space");

    in_transaction(scene, "Make Group", |scene| {
        let container = scene.create_node(
            parent,
            LayoutNode::new(config.container_name.clone())
                .with_pivot(pivot.x, pivot.y)
                .with_size(size.x, size.y),
        )?;
        set_local_position(scene, container, pivot_point)?;

        for (_, id) in &ordered {
            scene.set_parent(*id, Some(container), true)?;
        }
        if config.select_result {
            scene.select(&[container]);
        }
        Ok(container)
    })
}

/// Ungroup the single selected node
pub fn ungroup_selection<S>(
    scene: &mut S,
    selection: &[NodeId],
    config: &LayoutConfig,
) -> Result<Vec<NodeId>, LayoutError>
where
    S: SceneGraph + ?Sized,
{
    match unique(selection).as_slice() {
        [] => Err(LayoutError::EmptySelection),
        [node] => ungroup(scene, *node, config),
        many => Err(LayoutError::MultipleSelection { count: many.len() }),
    }
}

/// Move every child of `node` to `node`'s parent, then destroy `node`
///
/// Returns the released children in their former sibling order.
#[tracing::instrument(level = "debug", skip(scene, config))]
pub fn ungroup<S>(
    scene: &mut S,
    node: NodeId,
    config: &LayoutConfig,
) -> Result<Vec<NodeId>, LayoutError>
where
    S: SceneGraph + ?Sized,
{
    let target = scene.node(node)?;
    let parent = target.parent();
    let children = target.children().to_vec();
    if children.is_empty() {
        return Err(LayoutError::NoChildren { node });
    }

    in_transaction(scene, "UnGroup", |scene| {
        for child in &children {
            scene.set_parent(*child, parent, true)?;
        }
        scene.destroy(node)?;
        if config.select_result {
            scene.select(&children);
        }
        Ok(children.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{anchor, Rect, Vec2};
    use crate::scene::Scene;

    fn two_boxes() -> (Scene, NodeId, NodeId, NodeId) {
        let mut scene = Scene::new();
        let root = scene
            .add_root(LayoutNode::new("root").with_size(400.0, 400.0))
            .unwrap();
        let a = scene
            .add_child(root, LayoutNode::new("a").with_size(10.0, 10.0).with_position(-20.0, 0.0))
            .unwrap();
        let b = scene
            .add_child(root, LayoutNode::new("b").with_size(10.0, 20.0).with_position(20.0, 10.0))
            .unwrap();
        (scene, root, a, b)
    }

    #[test]
    fn test_group_creates_container_in_parent_space() {
        let (mut scene, root, a, b) = two_boxes();
        let container = make_group(&mut scene, &[b, a], &LayoutConfig::default()).unwrap();

        let node = scene.node(container).unwrap();
        assert_eq!(node.name, "container");
        assert_eq!(node.parent(), Some(root));
        assert_eq!(node.size_delta, Vec2::new(50.0, 25.0));
        assert_eq!(
            anchor::world_rect(&scene, container).unwrap(),
            Rect::new(-25.0, -5.0, 50.0, 25.0)
        );
        // Children keep their sibling order, not selection order
        assert_eq!(node.children(), &[a, b]);
        assert_eq!(scene.selection(), &[container]);
    }

    #[test]
    fn test_group_empty_selection() {
        let (mut scene, ..) = two_boxes();
        assert_eq!(
            make_group(&mut scene, &[], &LayoutConfig::default()),
            Err(LayoutError::EmptySelection)
        );
    }

    #[test]
    fn test_group_across_parents_rejected() {
        let (mut scene, root, a, _) = two_boxes();
        let before = scene.len();
        let err = make_group(&mut scene, &[a, root], &LayoutConfig::default()).unwrap_err();
        assert_eq!(err, LayoutError::cross_parent(a, root));
        assert_eq!(scene.len(), before);
        assert!(scene.history().is_empty());
    }

    #[test]
    fn test_ungroup_leaf_rejected() {
        let (mut scene, _, a, _) = two_boxes();
        assert_eq!(
            ungroup(&mut scene, a, &LayoutConfig::default()),
            Err(LayoutError::NoChildren { node: a })
        );
    }

    #[test]
    fn test_ungroup_selection_counts() {
        let (mut scene, _, a, b) = two_boxes();
        let config = LayoutConfig::default();
        assert_eq!(
            ungroup_selection(&mut scene, &[a, b], &config),
            Err(LayoutError::MultipleSelection { count: 2 })
        );
        assert_eq!(
            ungroup_selection(&mut scene, &[], &config),
            Err(LayoutError::EmptySelection)
        );
    }

    #[test]
    fn test_ungroup_releases_children_to_parent() {
        let (mut scene, root, a, b) = two_boxes();
        let container = make_group(&mut scene, &[a, b], &LayoutConfig::default()).unwrap();
        let released = ungroup(&mut scene, container, &LayoutConfig::default()).unwrap();

        assert_eq!(released, vec![a, b]);
        assert!(scene.node(container).is_err());
        assert_eq!(scene.children(Some(root)).unwrap(), &[a, b]);
        assert_eq!(scene.history(), vec!["Make Group", "UnGroup"]);
    }

    #[test]
    fn test_custom_container_pivot() {
        let (mut scene, _, a, b) = two_boxes();
        let config = LayoutConfig::default().with_container_pivot(Vec2::ZERO);
        let container = make_group(&mut scene, &[a, b], &config).unwrap();
        assert_eq!(
            anchor::world_rect(&scene, container).unwrap(),
            Rect::new(-25.0, -5.0, 50.0, 25.0)
        );
    }
}
