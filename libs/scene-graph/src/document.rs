//! # Scene Documents
//!
//! Serializable snapshot of a scene: a nested node tree plus the material
//! list, with materials referenced by name. Used to author fixtures and to
//! feed the headless runner.
//!
//! ```text
//! SceneDocument(
//!     materials: [(name: "Paint", kind: "UPlasticMaterial")],
//!     root: (name: "Root", children: [
//!         (name: "Door", kind: Geometry, bounds: Some((0, 0, 0, 1, 1, 1)), primitives: 10, material: Some("Paint")),
//!     ]),
//! )
//! ```

use crate::material::Material;
use crate::NodeKind;
use serde::{Deserialize, Serialize};

/// Whole-scene snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default)]
    pub materials: Vec<MaterialDocument>,
    pub root: NodeDocument,
}

/// Materials are stored verbatim.
pub type MaterialDocument = Material;

/// One node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: NodeKind,
    /// `[xmin, ymin, zmin, xmax, ymax, zmax]`.
    #[serde(default)]
    pub bounds: Option<[f64; 6]>,
    #[serde(default)]
    pub primitives: u64,
    /// Material name.
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub children: Vec<NodeDocument>,
}

impl NodeDocument {
    /// Container with no children.
    pub fn container(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Container,
            bounds: None,
            primitives: 0,
            material: None,
            visible: true,
            children: Vec::new(),
        }
    }
}

fn default_kind() -> NodeKind {
    NodeKind::Container
}

fn default_visible() -> bool {
    true
}
