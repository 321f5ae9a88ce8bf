use super::*;
use crate::test_support::cube_at;
use scene_graph::{Material, MemoryScene, NodeKey};

/// Root
/// └── Body (container)
///     ├── Left   y = -2
///     ├── Middle y =  0
///     └── Right  y =  2
fn body() -> (MemoryScene, NodeKey, [NodeKey; 3]) {
    let mut scene = MemoryScene::new("Root");
    let root = scene.root();
    let body = scene.add_container(root, "Body").unwrap();
    let left = scene.add_geometry(body, "Left", cube_at(0.0, -2.0, 0.0), 4).unwrap();
    let middle = scene.add_geometry(body, "Middle", cube_at(0.0, 0.0, 0.0), 4).unwrap();
    let right = scene.add_geometry(body, "Right", cube_at(0.0, 2.0, 0.0), 4).unwrap();
    (scene, body, [left, middle, right])
}

#[test]
fn test_lower_half_moves_to_sibling() {
    let (mut scene, body, [left, middle, right]) = body();
    let root = scene.root();

    let pairs = split_symmetric(&mut scene, &[body]).unwrap();
    assert_eq!(pairs.len(), 1);
    let (original, sibling) = pairs[0];
    assert_eq!(original, body);

    assert_eq!(scene.name(sibling).unwrap(), "Body_symmetry");
    assert_eq!(scene.parent(sibling).unwrap(), Some(root));
    assert_eq!(scene.children(sibling).unwrap(), vec![left]);
    assert_eq!(scene.children(body).unwrap(), vec![middle, right]);
}

#[test]
fn test_no_remaining_child_below_plane() {
    let (mut scene, body, _) = body();
    split_symmetric(&mut scene, &[body]).unwrap();
    for child in scene.children(body).unwrap() {
        assert!(scene.bounding_box(child).unwrap().center().y >= 0.0);
    }
}

#[test]
fn test_sibling_inherits_material_and_selection() {
    let (mut scene, body, _) = body();
    let paint = scene.add_material(Material::new("Paint", "UPlasticMaterial"));
    scene.apply_material(body, paint).unwrap();

    let split = plan_symmetry_split(&scene, body).unwrap().unwrap();
    assert_eq!(split.material, Some(paint));
    let sibling = split.apply(&mut scene).unwrap();

    assert_eq!(scene.material(sibling).unwrap(), Some(paint));
    assert_eq!(scene.selection(), &[body, sibling]);
}

#[test]
fn test_missing_material_is_skipped() {
    let (mut scene, body, _) = body();
    let pairs = split_symmetric(&mut scene, &[body]).unwrap();
    assert_eq!(scene.material(pairs[0].1).unwrap(), None);
}

#[test]
fn test_off_plane_container_is_untouched() {
    let mut scene = MemoryScene::new("Root");
    let root = scene.root();
    let body = scene.add_container(root, "Body").unwrap();
    scene.add_geometry(body, "Low", cube_at(0.0, -2.0, 0.0), 1).unwrap();
    scene.add_geometry(body, "High", cube_at(0.0, 3.0, 0.0), 1).unwrap();

    assert!(plan_symmetry_split(&scene, body).unwrap().is_none());
    assert!(split_symmetric(&mut scene, &[body]).unwrap().is_empty());
    assert_eq!(scene.child_count(root).unwrap(), 1);
}

#[test]
fn test_geometry_and_root_are_not_split() {
    let (scene, _, [_, middle, _]) = body();
    assert!(plan_symmetry_split(&scene, middle).unwrap().is_none());

    let mut lone = MemoryScene::new("Root");
    let root = lone.root();
    lone.add_geometry(root, "Low", cube_at(0.0, -1.0, 0.0), 1).unwrap();
    lone.add_geometry(root, "High", cube_at(0.0, 1.0, 0.0), 1).unwrap();
    assert!(plan_symmetry_split(&lone, root).unwrap().is_none());
}
