//! Scene builders shared by unit tests.

use glam::DVec3;
use scene_graph::{BoundingBox, MemoryScene, NodeKey, SceneQuery};

use crate::walker::find_by_name;

/// Box centered on `(x, y, z)` with the given edge lengths.
pub fn boxed(center: [f64; 3], size: [f64; 3]) -> BoundingBox {
    BoundingBox::from_center_size(DVec3::from_array(center), DVec3::from_array(size))
}

/// Unit cube centered on `(x, y, z)`.
pub fn cube_at(x: f64, y: f64, z: f64) -> BoundingBox {
    boxed([x, y, z], [1.0, 1.0, 1.0])
}

/// First node named `name` anywhere in `scene`.
pub fn named(scene: &MemoryScene, name: &str) -> Option<NodeKey> {
    find_by_name(scene, scene.root(), name).unwrap()
}
