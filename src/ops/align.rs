//! Alignment, distribution and size matching over an ordered selection
//!
//! The first selected node is the template. Edge and center alignments copy
//! the template's edge into every other node and never move the template.
//! Distribution re-sorts the selection by low edge and spaces the interior
//! nodes' pivots evenly between the smallest and largest pivot position.
//! Size matching resizes every node, template included, to the min or max
//! world extent.
//!
//! Edits are planned from a [`SelectionSnapshot`] and only then written.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::geometry::anchor::{
    pivot_for_center, pivot_for_max_edge, pivot_for_min_edge, set_world_axis, set_world_size,
};
use crate::geometry::{Axis, Vec2};
use crate::scene::{NodeId, SceneError, SceneGraph};

use super::in_transaction;
use super::selection::{NodeGeometry, SelectionSnapshot};

/// The ten alignment operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignKind {
    Top,
    Bottom,
    Left,
    Right,
    HorizontalCenter,
    VerticalCenter,
    /// Distribute along x
    Horizontal,
    /// Distribute along y
    Vertical,
    SizeMin,
    SizeMax,
}

impl AlignKind {
    pub const ALL: [AlignKind; 10] = [
        AlignKind::Top,
        AlignKind::Bottom,
        AlignKind::Left,
        AlignKind::Right,
        AlignKind::HorizontalCenter,
        AlignKind::VerticalCenter,
        AlignKind::Horizontal,
        AlignKind::Vertical,
        AlignKind::SizeMin,
        AlignKind::SizeMax,
    ];

    /// Kebab-case name, as accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            AlignKind::Top => "top",
            AlignKind::Bottom => "bottom",
            AlignKind::Left => "left",
            AlignKind::Right => "right",
            AlignKind::HorizontalCenter => "horizontal-center",
            AlignKind::VerticalCenter => "vertical-center",
            AlignKind::Horizontal => "horizontal",
            AlignKind::Vertical => "vertical",
            AlignKind::SizeMin => "size-min",
            AlignKind::SizeMax => "size-max",
        }
    }

    /// Undo label for the operation
    pub fn label(self) -> &'static str {
        match self {
            AlignKind::Top => "Align Top",
            AlignKind::Bottom => "Align Bottom",
            AlignKind::Left => "Align Left",
            AlignKind::Right => "Align Right",
            AlignKind::HorizontalCenter => "Align HorizontalCenter",
            AlignKind::VerticalCenter => "Align VerticalCenter",
            AlignKind::Horizontal => "Align Horizontal",
            AlignKind::Vertical => "Align Vertical",
            AlignKind::SizeMin => "Align SizeMin",
            AlignKind::SizeMax => "Align SizeMax",
        }
    }
}

impl fmt::Display for AlignKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlignKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        AlignKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| LayoutError::UnknownAlignKind {
                name: s.to_string(),
            })
    }
}

/// A single planned write
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edit {
    /// Put the node's world pivot at `value` along `axis`
    Move { id: NodeId, axis: Axis, value: f64 },
    /// Give the node this world width and height
    Resize { id: NodeId, size: Vec2 },
}

/// Align `selection` in place; fewer than two nodes is a no-op
#[tracing::instrument(level = "debug", skip(scene, selection, config), fields(nodes = selection.len()))]
pub fn align<S>(
    scene: &mut S,
    kind: AlignKind,
    selection: &[NodeId],
    config: &LayoutConfig,
) -> Result<(), LayoutError>
where
    S: SceneGraph + ?Sized,
{
    let snapshot = SelectionSnapshot::capture(scene, selection)?;
    if snapshot.len() < 2 {
        debug!("fewer than two nodes selected, nothing to align");
        return Ok(());
    }

    let edits = plan(kind, &snapshot, config);
    if edits.is_empty() {
        debug!("alignment produced no edits");
        return Ok(());
    }

    in_transaction(scene, kind.label(), |scene| {
        for edit in &edits {
            apply(scene, edit)?;
        }
        Ok(())
    })
}

/// Compute the writes for `kind` from snapshot geometry alone
pub fn plan(kind: AlignKind, snapshot: &SelectionSnapshot, config: &LayoutConfig) -> Vec<Edit> {
    let Some((template, rest)) = snapshot.entries().split_first() else {
        return Vec::new();
    };
    let t = template.rect;

    match kind {
        AlignKind::Left => edge_moves(rest, Axis::Horizontal, |n| {
            pivot_for_min_edge(t.left(), n.rect.width, n.pivot.x)
        }),
        AlignKind::Right => edge_moves(rest, Axis::Horizontal, |n| {
            pivot_for_max_edge(t.right(), n.rect.width, n.pivot.x)
        }),
        AlignKind::HorizontalCenter => edge_moves(rest, Axis::Horizontal, |n| {
            pivot_for_center(t.left(), t.width, n.rect.width, n.pivot.x)
        }),
        AlignKind::Top => edge_moves(rest, Axis::Vertical, |n| {
            pivot_for_max_edge(t.top(), n.rect.height, n.pivot.y)
        }),
        AlignKind::Bottom => edge_moves(rest, Axis::Vertical, |n| {
            pivot_for_min_edge(t.bottom(), n.rect.height, n.pivot.y)
        }),
        AlignKind::VerticalCenter => edge_moves(rest, Axis::Vertical, |n| {
            pivot_for_center(t.bottom(), t.height, n.rect.height, n.pivot.y)
        }),
        AlignKind::Horizontal => distribute(snapshot.entries(), Axis::Horizontal, config.tolerance),
        AlignKind::Vertical => distribute(snapshot.entries(), Axis::Vertical, config.tolerance),
        AlignKind::SizeMin => match_size(snapshot.entries(), f64::INFINITY, f64::min),
        AlignKind::SizeMax => match_size(snapshot.entries(), f64::NEG_INFINITY, f64::max),
    }
}

fn edge_moves(rest: &[NodeGeometry], axis: Axis, target: impl Fn(&NodeGeometry) -> f64) -> Vec<Edit> {
    rest.iter()
        .map(|n| Edit::Move {
            id: n.id,
            axis,
            value: target(n),
        })
        .collect()
}

/// Even spacing between the extreme pivot positions
///
/// The range comes from pivot positions over the whole selection, while the
/// order comes from a stable sort on the low edge. The first and last nodes
/// in that order stay put.
fn distribute(entries: &[NodeGeometry], axis: Axis, tolerance: f64) -> Vec<Edit> {
    let n = entries.len();
    if n < 3 {
        return Vec::new();
    }

    let positions = entries.iter().map(|e| e.position.xy().get(axis));
    let min = positions.clone().fold(f64::INFINITY, f64::min);
    let max = positions.fold(f64::NEG_INFINITY, f64::max);
    if max - min <= tolerance {
        debug!(?axis, "all pivots coincide, nothing to distribute");
        return Vec::new();
    }

    let mut order: Vec<&NodeGeometry> = entries.iter().collect();
    order.sort_by(|a, b| a.rect.min_edge(axis).total_cmp(&b.rect.min_edge(axis)));

    let step = (max - min) / (n - 1) as f64;
    order[1..n - 1]
        .iter()
        .enumerate()
        .map(|(i, node)| Edit::Move {
            id: node.id,
            axis,
            value: min + (i + 1) as f64 * step,
        })
        .collect()
}

fn match_size(entries: &[NodeGeometry], init: f64, pick: fn(f64, f64) -> f64) -> Vec<Edit> {
    let width = entries.iter().map(|e| e.rect.width).fold(init, pick);
    let height = entries.iter().map(|e| e.rect.height).fold(init, pick);
    let size = Vec2::new(width, height);
    entries
        .iter()
        .map(|e| Edit::Resize { id: e.id, size })
        .collect()
}

fn apply<S>(scene: &mut S, edit: &Edit) -> Result<(), SceneError>
where
    S: SceneGraph + ?Sized,
{
    match *edit {
        Edit::Move { id, axis, value } => set_world_axis(scene, id, axis, value),
        Edit::Resize { id, size } => set_world_size(scene, id, size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{anchor, Rect, Vec3};
    use crate::scene::{LayoutNode, Scene};
    use pretty_assertions::assert_eq;

    fn geometry(id: u32, x: f64, width: f64) -> NodeGeometry {
        NodeGeometry {
            id: NodeId::from_raw(id),
            position: Vec3::new(x, 0.0, 0.0),
            pivot: Vec2::HALF,
            rect: Rect::new(x - width / 2.0, -5.0, width, 10.0),
        }
    }

    fn snapshot_of(entries: Vec<NodeGeometry>) -> SelectionSnapshot {
        let mut scene = Scene::new();
        let mut ids = Vec::new();
        for e in &entries {
            let id = scene
                .add_root(
                    LayoutNode::new(format!("n{}", e.id.raw()))
                        .with_size(e.rect.width, e.rect.height)
                        .with_position(e.position.x, e.position.y),
                )
                .unwrap();
            ids.push(id);
        }
        SelectionSnapshot::capture(&scene, &ids).unwrap()
    }

    #[test]
    fn test_parse_align_kind() {
        assert_eq!("left".parse::<AlignKind>().unwrap(), AlignKind::Left);
        assert_eq!(
            "Horizontal_Center".parse::<AlignKind>().unwrap(),
            AlignKind::HorizontalCenter
        );
        assert!(matches!(
            "diagonal".parse::<AlignKind>(),
            Err(LayoutError::UnknownAlignKind { .. })
        ));
        for kind in AlignKind::ALL {
            assert_eq!(kind.to_string().parse::<AlignKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_left_plan_skips_template() {
        let snapshot = snapshot_of(vec![
            geometry(0, 0.0, 20.0),
            geometry(1, 50.0, 20.0),
            geometry(2, 100.0, 40.0),
        ]);
        let edits = plan(AlignKind::Left, &snapshot, &LayoutConfig::default());
        let ids = snapshot.ids();
        assert_eq!(
            edits,
            vec![
                Edit::Move { id: ids[1], axis: Axis::Horizontal, value: 0.0 },
                Edit::Move { id: ids[2], axis: Axis::Horizontal, value: 10.0 },
            ]
        );
    }

    #[test]
    fn test_distribute_needs_three_nodes() {
        let snapshot = snapshot_of(vec![geometry(0, 0.0, 10.0), geometry(1, 40.0, 10.0)]);
        assert!(plan(AlignKind::Horizontal, &snapshot, &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn test_distribute_coincident_pivots_is_noop() {
        let snapshot = snapshot_of(vec![
            geometry(0, 5.0, 10.0),
            geometry(1, 5.0, 20.0),
            geometry(2, 5.0, 30.0),
        ]);
        assert!(plan(AlignKind::Horizontal, &snapshot, &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn test_distribute_sort_is_stable_on_equal_edges() {
        // n1 and n2 share a left edge; selection order decides which is interior first
        let snapshot = snapshot_of(vec![
            geometry(0, 100.0, 10.0),
            geometry(1, 10.0, 10.0),
            geometry(2, 10.0, 10.0),
            geometry(3, 0.0, 10.0),
        ]);
        let ids = snapshot.ids();
        let edits = plan(AlignKind::Horizontal, &snapshot, &LayoutConfig::default());
        let moved: Vec<NodeId> = edits
            .iter()
            .map(|e| match e {
                Edit::Move { id, .. } => *id,
                Edit::Resize { id, .. } => *id,
            })
            .collect();
        assert_eq!(moved, vec![ids[1], ids[2]]);
    }

    #[test]
    fn test_size_max_plan_includes_template() {
        let snapshot = snapshot_of(vec![geometry(0, 0.0, 10.0), geometry(1, 50.0, 30.0)]);
        let edits = plan(AlignKind::SizeMax, &snapshot, &LayoutConfig::default());
        assert_eq!(edits.len(), 2);
        for edit in edits {
            assert!(matches!(edit, Edit::Resize { size, .. } if size == Vec2::new(30.0, 10.0)));
        }
    }

    #[test]
    fn test_align_single_node_is_noop() {
        let mut scene = Scene::new();
        let a = scene.add_root(LayoutNode::new("a")).unwrap();
        align(&mut scene, AlignKind::Right, &[a], &LayoutConfig::default()).unwrap();
        assert!(scene.history().is_empty());
    }

    #[test]
    fn test_align_top_uses_lossy_scale() {
        let mut scene = Scene::new();
        let template = scene
            .add_root(LayoutNode::new("t").with_size(10.0, 10.0).with_position(0.0, 100.0))
            .unwrap();
        let parent = scene
            .add_root(LayoutNode::new("p").with_scale(2.0, 2.0))
            .unwrap();
        let other = scene
            .add_child(parent, LayoutNode::new("o").with_size(10.0, 10.0).with_pivot(0.5, 0.0))
            .unwrap();

        align(&mut scene, AlignKind::Top, &[template, other], &LayoutConfig::default()).unwrap();

        let t = anchor::world_rect(&scene, template).unwrap();
        let o = anchor::world_rect(&scene, other).unwrap();
        assert_eq!(o.height, 20.0);
        assert!((o.top() - t.top()).abs() < 1e-9);
        assert_eq!(scene.history(), vec!["Align Top"]);
    }
}
