//! Rect Arrange - alignment, distribution and grouping for anchored 2D layouts
//!
//! This library measures anchored rectangles in world space and edits a
//! selection of them as one undoable batch: edge and center alignment,
//! even distribution, size matching, and wrapping nodes in a container.
//!
//! # Example
//!
//! ```rust
//! use rect_arrange::{run_command, LayoutConfig, LayoutNode, Scene};
//! use rect_arrange::geometry::anchor::world_rect;
//!
//! let mut scene = Scene::new();
//! let a = scene.add_root(LayoutNode::new("a").with_size(50.0, 50.0).with_position(10.0, 0.0)).unwrap();
//! let b = scene.add_root(LayoutNode::new("b").with_size(20.0, 20.0).with_position(90.0, 40.0)).unwrap();
//!
//! run_command(&mut scene, "align-left", &[a, b], &LayoutConfig::default()).unwrap();
//! assert_eq!(world_rect(&scene, b).unwrap().left(), world_rect(&scene, a).unwrap().left());
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod geometry;
pub mod ops;
pub mod scene;

pub use commands::{CommandContext, CommandDescriptor, CommandRegistry};
pub use config::{ConfigError, LayoutConfig};
pub use error::LayoutError;
pub use geometry::{Aabb, Axis, Rect, Vec2, Vec3};
pub use ops::{align, make_group, ungroup, AlignKind};
pub use scene::{LayoutNode, NodeId, Scene, SceneError, SceneFile, SceneGraph};

/// Run a standard toolbar command against `scene`
///
/// Returns the selection the command leaves behind.
///
/// # Example
///
/// ```rust
/// use rect_arrange::{run_command, LayoutConfig, LayoutNode, Scene, SceneGraph};
///
/// let mut scene = Scene::new();
/// let a = scene.add_root(LayoutNode::new("a")).unwrap();
/// let b = scene.add_root(LayoutNode::new("b")).unwrap();
///
/// let selection = run_command(&mut scene, "group", &[a, b], &LayoutConfig::default()).unwrap();
/// assert_eq!(scene.node(selection[0]).unwrap().children(), &[a, b]);
/// ```
pub fn run_command(
    scene: &mut dyn SceneGraph,
    id: &str,
    selection: &[NodeId],
    config: &LayoutConfig,
) -> Result<Vec<NodeId>, LayoutError> {
    let mut ctx = CommandContext {
        scene,
        selection,
        config,
    };
    CommandRegistry::standard().run(id, &mut ctx)
}
