//! Batch edits over a selection: alignment, distribution, sizing and grouping
//!
//! Every operation follows the same shape: validate and snapshot, then apply
//! all writes inside one host transaction. A failure while writing aborts the
//! transaction so the caller never sees a half-applied batch.

pub mod align;
pub mod group;
pub mod selection;

pub use align::{align, AlignKind, Edit};
pub use group::{make_group, ungroup, ungroup_selection};
pub use selection::{NodeGeometry, SelectionSnapshot};

use tracing::warn;

use crate::error::LayoutError;
use crate::scene::SceneGraph;

/// Run `f` inside a host transaction labelled `label`
///
/// Commits on success. On error the transaction is aborted and the error
/// returned unchanged.
pub fn in_transaction<S, T, F>(scene: &mut S, label: &str, f: F) -> Result<T, LayoutError>
where
    S: SceneGraph + ?Sized,
    F: FnOnce(&mut S) -> Result<T, LayoutError>,
{
    scene.begin_transaction(label);
    match f(scene) {
        Ok(value) => {
            scene.commit_transaction();
            Ok(value)
        }
        Err(err) => {
            warn!(%label, error = %err, "operation failed, rolling back");
            scene.abort_transaction();
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use crate::scene::{LayoutNode, Scene, SceneError};

    #[test]
    fn test_in_transaction_commits() {
        let mut scene = Scene::new();
        let id = in_transaction(&mut scene, "Create", |s| Ok(s.add_root(LayoutNode::new("a"))?))
            .unwrap();
        assert!(scene.node(id).is_ok());
        assert_eq!(scene.history(), vec!["Create"]);
    }

    #[test]
    fn test_in_transaction_rolls_back() {
        let mut scene = Scene::new();
        let a = scene.add_root(LayoutNode::new("a")).unwrap();
        let result: Result<(), LayoutError> = in_transaction(&mut scene, "Edit", |s| {
            s.node_mut(a)?.size_delta = Vec2::ZERO;
            Err(SceneError::refused("edit", "test").into())
        });

        assert!(result.is_err());
        assert_eq!(scene.node(a).unwrap().size_delta, Vec2::new(100.0, 100.0));
        assert!(scene.history().is_empty());
    }
}
