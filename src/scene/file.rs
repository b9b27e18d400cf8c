//! TOML scene documents
//!
//! A document lists a canvas size and a flat array of nodes. Parents are
//! referenced by name and must appear before their children:
//!
//! ```toml
//! [canvas]
//! width = 800
//! height = 600
//!
//! [[node]]
//! name = "panel"
//! size = [200, 100]
//!
//! [[node]]
//! name = "button"
//! parent = "panel"
//! position = [10, 0]
//! pivot = [0, 0.5]
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{anchor, Aabb, Vec2, Vec3};

use super::{LayoutNode, NodeId, Scene, SceneError, SceneGraph};

/// Errors that can occur when loading or saving scene documents
#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize scene TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("duplicate node name '{name}'")]
    DuplicateName { name: String },
    #[error("node '{node}' references unknown parent '{parent}' (parents must be listed first)")]
    UnknownParent { node: String, parent: String },
    #[error("node '{name}' has a position with {len} components (expected 2 or 3)")]
    BadPosition { name: String, len: usize },
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Serialized form of a whole scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

/// Serialized form of one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default = "default_half")]
    pub anchor_min: Vec2,
    #[serde(default = "default_half")]
    pub anchor_max: Vec2,
    #[serde(default = "default_half")]
    pub pivot: Vec2,
    #[serde(default = "default_size")]
    pub size: Vec2,
    /// Anchored position, `[x, y]` or `[x, y, z]`
    #[serde(default = "default_position")]
    pub position: Vec<f64>,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<Aabb>,
}

fn default_half() -> Vec2 {
    Vec2::HALF
}

fn default_size() -> Vec2 {
    LayoutNode::new("").size_delta
}

fn default_position() -> Vec<f64> {
    vec![0.0, 0.0]
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

fn default_active() -> bool {
    true
}

impl SceneFile {
    pub fn from_file(path: &Path) -> Result<Self, SceneFileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self, SceneFileError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, SceneFileError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build a live scene, resolving parents by name
    pub fn build(&self) -> Result<Scene, SceneFileError> {
        let mut scene = Scene::with_root_size(Vec2::new(self.canvas.width, self.canvas.height));
        let mut ids: HashMap<&str, NodeId> = HashMap::new();

        for spec in &self.nodes {
            if ids.contains_key(spec.name.as_str()) {
                return Err(SceneFileError::DuplicateName {
                    name: spec.name.clone(),
                });
            }
            let parent = match &spec.parent {
                None => None,
                Some(name) => Some(*ids.get(name.as_str()).ok_or_else(|| {
                    SceneFileError::UnknownParent {
                        node: spec.name.clone(),
                        parent: name.clone(),
                    }
                })?),
            };
            let id = scene.create_node(parent, spec.to_node()?)?;
            ids.insert(&spec.name, id);
        }
        Ok(scene)
    }

    /// Capture a live scene, parents before children
    pub fn from_scene(scene: &Scene) -> Result<Self, SceneFileError> {
        let root = scene.root_size();
        let mut nodes = Vec::new();
        for (id, _) in scene.depth_first() {
            let node = scene.node(id)?;
            let parent = match node.parent() {
                Some(p) => Some(scene.node(p)?.name.clone()),
                None => None,
            };
            nodes.push(NodeSpec::from_node(node, parent));
        }
        Ok(Self {
            canvas: Canvas {
                width: root.x,
                height: root.y,
            },
            nodes,
        })
    }
}

impl NodeSpec {
    fn to_node(&self) -> Result<LayoutNode, SceneFileError> {
        let position = match self.position.as_slice() {
            [x, y] => Vec3::new(*x, *y, 0.0),
            [x, y, z] => Vec3::new(*x, *y, *z),
            other => {
                return Err(SceneFileError::BadPosition {
                    name: self.name.clone(),
                    len: other.len(),
                })
            }
        };
        let mut node = LayoutNode::new(self.name.clone())
            .with_anchors(self.anchor_min, self.anchor_max)
            .with_active(self.active);
        node.pivot = self.pivot;
        node.size_delta = self.size;
        node.anchored_position = position;
        node.local_scale = self.scale;
        node.mesh = self.mesh;
        Ok(node)
    }

    fn from_node(node: &LayoutNode, parent: Option<String>) -> Self {
        let p = node.anchored_position;
        let position = if p.z == 0.0 {
            vec![p.x, p.y]
        } else {
            vec![p.x, p.y, p.z]
        };
        Self {
            name: node.name.clone(),
            parent,
            anchor_min: node.anchor_min,
            anchor_max: node.anchor_max,
            pivot: node.pivot,
            size: node.size_delta,
            position,
            scale: node.local_scale,
            active: node.active,
            mesh: node.mesh,
        }
    }
}

/// One line per node with its world rectangle, indented by depth
pub fn world_report(scene: &Scene) -> Result<String, SceneError> {
    let mut out = String::new();
    for (id, depth) in scene.depth_first() {
        let node = scene.node(id)?;
        let rect = anchor::world_rect(scene, id)?;
        out.push_str(&format!(
            "{:indent$}{} x={:.2} y={:.2} w={:.2} h={:.2}\n",
            "",
            node.name,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            indent = depth * 2
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
[canvas]
width = 800
height = 600

[[node]]
name = "panel"
size = [200, 100]
anchor_min = [0, 0]
anchor_max = [0, 0]
position = [100, 50]

[[node]]
name = "button"
parent = "panel"
size = [40, 20]
position = [10, 0, 5]
scale = [2, 2, 1]
"#;

    #[test]
    fn test_parse_and_build() {
        let file = SceneFile::from_str(SAMPLE).expect("Should parse");
        let scene = file.build().expect("Should build");

        let panel = scene.find("panel").unwrap();
        let button = scene.find("button").unwrap();
        assert_eq!(scene.node(button).unwrap().parent(), Some(panel));
        assert_eq!(scene.node(button).unwrap().anchored_position, Vec3::new(10.0, 0.0, 5.0));
        assert_eq!(scene.root_size(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_defaults_apply() {
        let file = SceneFile::from_str("[[node]]\nname = \"a\"\n").unwrap();
        let spec = &file.nodes[0];
        assert_eq!(spec.pivot, Vec2::HALF);
        assert_eq!(spec.size, Vec2::new(100.0, 100.0));
        assert_eq!(spec.scale, Vec3::ONE);
        assert!(spec.active);
        assert_eq!(file.canvas, Canvas::default());
    }

    #[test]
    fn test_unknown_parent_error() {
        let file = SceneFile::from_str(
            r#"
[[node]]
name = "child"
parent = "missing"
"#,
        )
        .unwrap();
        let err = file.build().unwrap_err();
        assert!(matches!(err, SceneFileError::UnknownParent { .. }));
    }

    #[test]
    fn test_duplicate_name_error() {
        let file = SceneFile::from_str("[[node]]\nname = \"a\"\n[[node]]\nname = \"a\"\n").unwrap();
        assert!(matches!(
            file.build().unwrap_err(),
            SceneFileError::DuplicateName { .. }
        ));
    }

    #[test]
    fn test_bad_position_error() {
        let file = SceneFile::from_str("[[node]]\nname = \"a\"\nposition = [1]\n").unwrap();
        assert!(matches!(
            file.build().unwrap_err(),
            SceneFileError::BadPosition { len: 1, .. }
        ));
    }

    #[test]
    fn test_save_and_reload_preserves_scene() {
        let scene = SceneFile::from_str(SAMPLE).unwrap().build().unwrap();
        let saved = SceneFile::from_scene(&scene).unwrap();
        let text = saved.to_toml().unwrap();
        let reloaded = SceneFile::from_str(&text).unwrap();
        assert_eq!(saved, reloaded);
    }

    #[test]
    fn test_world_report() {
        let scene = SceneFile::from_str(SAMPLE).unwrap().build().unwrap();
        let report = world_report(&scene).unwrap();
        insta::assert_snapshot!(report.trim_end(), @r"
        panel x=0.00 y=0.00 w=200.00 h=100.00
          button x=70.00 y=30.00 w=80.00 h=40.00
        ");
    }
}
