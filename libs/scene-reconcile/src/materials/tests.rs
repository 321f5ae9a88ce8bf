use super::*;
use crate::test_support::cube_at;
use config::constants::UNRENAMED_MATERIAL_TAG;
use scene_graph::{Material, MemoryScene, NodeSpec, SceneQuery};

#[test]
fn test_brush_paints_every_node() {
    let mut scene = MemoryScene::new("Root");
    let root = scene.root();
    let paint = scene.add_material(Material::new("Paint", "UPlasticMaterial"));
    let a = scene.add_geometry(root, "A", cube_at(0.0, 0.0, 0.0), 1).unwrap();
    let b = scene.add_container(root, "B").unwrap();

    assert_eq!(apply_material(&mut scene, &[a, b], paint).unwrap(), 2);
    assert_eq!(scene.material(a).unwrap(), Some(paint));
    assert_eq!(scene.material(b).unwrap(), Some(paint));
}

#[test]
fn test_select_visible_users_only() {
    let mut scene = MemoryScene::new("Root");
    let root = scene.root();
    let paint = scene.add_material(Material::new("Paint", "UPlasticMaterial"));
    let shown = scene
        .add_node(root, NodeSpec::geometry("Shown", cube_at(0.0, 0.0, 0.0), 1).with_material(paint))
        .unwrap();
    scene
        .add_node(root, NodeSpec::geometry("Hidden", cube_at(1.0, 0.0, 0.0), 1).with_material(paint).hidden())
        .unwrap();
    let other = scene.add_geometry(root, "Other", cube_at(2.0, 0.0, 0.0), 1).unwrap();
    scene.select_nodes(&[other], true).unwrap();

    let selected = select_material_users(&mut scene, shown).unwrap();
    assert_eq!(selected, vec![shown]);
    // replaces the previous selection
    assert_eq!(scene.selection(), &[shown]);
}

#[test]
fn test_select_without_material_is_noop() {
    let mut scene = MemoryScene::new("Root");
    let root = scene.root();
    let bare = scene.add_geometry(root, "Bare", cube_at(0.0, 0.0, 0.0), 1).unwrap();
    assert!(select_material_users(&mut scene, bare).unwrap().is_empty());
    assert!(scene.selection().is_empty());
}

#[test]
fn test_tag_then_rename() {
    let mut scene = MemoryScene::new("Root");
    let known = scene.add_material(Material::new("M_Chrome", "UPlasticMaterial"));
    let stray = scene.add_material(Material::new("Material123", "UPlasticMaterial"));

    let tagged = tag_unlisted(&mut scene, &["M_Chrome", "M_Glass"], UNRENAMED_MATERIAL_TAG).unwrap();
    assert_eq!(tagged, 1);
    assert!(scene.tags(known).unwrap().is_empty());
    assert_eq!(scene.tags(stray).unwrap(), vec![UNRENAMED_MATERIAL_TAG.to_string()]);

    rename_materials(&mut scene, &[stray], "M_Glass", UNRENAMED_MATERIAL_TAG).unwrap();
    assert_eq!(scene.material_name(stray).unwrap(), "M_Glass");
    assert!(scene.tags(stray).unwrap().is_empty());
}

#[test]
fn test_disable_textures_on_all_components() {
    let mut scene = MemoryScene::new("Root");
    let first = scene.add_material(Material::new("A", "UPlasticMaterial"));
    let second = scene.add_material(Material::new("B", "UPlasticMaterial"));

    assert_eq!(disable_textures(&mut scene).unwrap(), 2);
    for material in [first, second] {
        let record = scene.material_record(material).unwrap();
        assert_eq!(record.fields.len(), TEXTURE_COMPONENTS.len());
        assert_eq!(
            record.field("diffuseComponent.useTexture"),
            Some(&FieldValue::Bool(false))
        );
        assert_eq!(
            record.field("ambientOcclusionComponent.useTexture"),
            Some(&FieldValue::Bool(false))
        );
    }
}
