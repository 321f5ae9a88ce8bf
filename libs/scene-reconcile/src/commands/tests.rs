use super::*;
use crate::progress::{NullProgress, RecordingProgress};
use crate::test_support::cube_at;
use config::constants::UNRENAMED_MATERIAL_TAG;
use scene_graph::{Material, MemoryScene, NodeKey, NodeSpec, TessellationQuality};

fn twin_scene() -> (MemoryScene, NodeKey) {
    let mut scene = MemoryScene::new("Root");
    let root = scene.root();
    let group = scene.add_container(root, "Group").unwrap();
    scene.add_geometry(group, "A", cube_at(0.0, 5.0, 0.0), 10).unwrap();
    scene.add_geometry(group, "B", cube_at(0.0, 5.0, 0.0), 10).unwrap();
    (scene, group)
}

#[test]
fn test_empty_selection_is_rejected_without_batch() {
    let (mut scene, _) = twin_scene();
    let config = ReconcileConfig::default();

    assert_eq!(
        remove_duplicates(&mut scene, &[], &config),
        Err(ReconcileError::EmptySelection)
    );
    assert_eq!(split_symmetry(&mut scene, &[]), Err(ReconcileError::EmptySelection));
    assert_eq!(
        merge(&mut scene, &[], &mut NullProgress),
        Err(ReconcileError::EmptySelection)
    );
    assert!(scene.undo_labels().is_empty());
}

#[test]
fn test_command_is_one_undo_step() {
    let (mut scene, group) = twin_scene();
    let before = scene.to_document().unwrap();

    let removed = remove_duplicates(&mut scene, &[group], &ReconcileConfig::default()).unwrap();
    assert_eq!(removed, 1);
    assert_eq!(scene.undo_labels(), vec![UNDO_REMOVE_DUPLICATES.to_string()]);

    assert_eq!(scene.undo(), Some(UNDO_REMOVE_DUPLICATES.to_string()));
    assert_eq!(scene.to_document().unwrap(), before);
}

#[test]
fn test_failed_body_still_closes_batch() {
    let mut scene = MemoryScene::new("Root");
    let root = scene.root();
    let part = scene.add_geometry(root, "Part", cube_at(0.0, 0.0, 0.0), 1).unwrap();
    let stale = scene.add_container(root, "Stale").unwrap();
    scene.delete_node(stale, true).unwrap();
    let paint = scene.add_material(Material::new("Paint", "UPlasticMaterial"));

    let result = apply_material(&mut scene, &[part, stale], paint);
    assert!(matches!(result, Err(ReconcileError::Scene(_))));
    assert!(!scene.in_batch());
    assert_eq!(scene.undo_labels(), vec![UNDO_APPLY_MATERIAL.to_string()]);
}

#[test]
fn test_invalid_tessellation_rejected_before_mutation() {
    let (mut scene, group) = twin_scene();
    let settings = TessellationSettings {
        chordal_deviation: 0.0,
        ..TessellationSettings::from_quality(TessellationQuality::Low)
    };

    let result = tessellate(&mut scene, &[group], &settings, &ReconcileConfig::default());
    assert_eq!(
        result,
        Err(ReconcileError::invalid_parameter("chordal_deviation", 0.0))
    );
    assert!(scene.calls().is_empty());
    assert!(scene.undo_labels().is_empty());
}

#[test]
fn test_match_requires_both_subtrees() {
    let (mut scene, group) = twin_scene();
    let thresholds = MatchThresholds::default();

    assert_eq!(
        match_materials(&mut scene, None, Some(group), &thresholds, &mut NullProgress),
        Err(ReconcileError::MissingReference)
    );
    assert_eq!(
        match_materials(&mut scene, Some(group), None, &thresholds, &mut NullProgress),
        Err(ReconcileError::MissingTarget)
    );
    assert_eq!(
        match_materials(
            &mut scene,
            Some(group),
            Some(group),
            &MatchThresholds::new(0.0, 150.0),
            &mut NullProgress
        ),
        Err(ReconcileError::invalid_parameter("size_threshold_percent", 150.0))
    );
}

#[test]
fn test_match_runs_under_its_label() {
    let mut scene = MemoryScene::new("Root");
    let root = scene.root();
    let paint = scene.add_material(Material::new("Paint", "UPlasticMaterial"));
    let old = scene.add_container(root, "Old").unwrap();
    scene
        .add_node(old, NodeSpec::geometry("Hood", cube_at(0.0, 1.0, 0.0), 30).with_material(paint))
        .unwrap();
    let new = scene.add_container(root, "New").unwrap();
    let hood = scene.add_geometry(new, "Hood", cube_at(0.0, 1.0, 0.0), 32).unwrap();

    let mut progress = RecordingProgress::default();
    let report = match_materials(
        &mut scene,
        Some(old),
        Some(new),
        &MatchThresholds::default(),
        &mut progress,
    )
    .unwrap();

    assert_eq!(report.matched, 1);
    assert_eq!(scene.material(hood).unwrap(), Some(paint));
    assert_eq!(scene.undo_labels(), vec![UNDO_MATCH_MATERIAL.to_string()]);

    // undo drops the marker material and the assignment together
    scene.undo();
    assert_eq!(scene.material(hood).unwrap(), None);
    assert_eq!(scene.find_material("CheckMat").unwrap(), None);
}

#[test]
fn test_rename_labels_by_mode() {
    let (mut scene, group) = twin_scene();
    let config = ReconcileConfig::default();

    rename(&mut scene, RenameMode::Reset, &config).unwrap();
    assert_eq!(scene.name(group).unwrap(), "Group_2");
    rename(&mut scene, RenameMode::Change, &config).unwrap();
    assert_eq!(
        scene.undo_labels(),
        vec![UNDO_RENAME_DEFAULT.to_string(), UNDO_RENAME_CHANGE.to_string()]
    );
}

#[test]
fn test_material_renaming_round() {
    let mut scene = MemoryScene::new("Root");
    let root = scene.root();
    let stray = scene.add_material(Material::new("Material12", "UPlasticMaterial"));
    let part = scene
        .add_node(root, NodeSpec::geometry("Part", cube_at(0.0, 0.0, 0.0), 1).with_material(stray))
        .unwrap();

    assert_eq!(
        tag_unlisted_materials(&mut scene, &["M_Paint"], UNRENAMED_MATERIAL_TAG).unwrap(),
        1
    );
    assert_eq!(
        rename_selected_materials(&mut scene, &[part, part], "M_Paint", UNRENAMED_MATERIAL_TAG).unwrap(),
        1
    );
    assert_eq!(scene.material_name(stray).unwrap(), "M_Paint");
    assert!(scene.tags(stray).unwrap().is_empty());
}

#[test]
fn test_cleanup_commands() {
    let mut scene = MemoryScene::new("Root");
    let root = scene.root();
    let studio = scene.add_container(root, "Studio").unwrap();
    scene.add_geometry(studio, "Floor", cube_at(0.0, 0.0, 0.0), 2).unwrap();
    let group = scene.add_container(root, "Group").unwrap();
    scene.add_geometry(group, "Hollow", cube_at(0.0, 0.0, 0.0), 0).unwrap();

    assert_eq!(clear_environment(&mut scene, "Studio").unwrap(), 1);
    let report = clear_unusable(&mut scene).unwrap();
    assert_eq!(report.empty_geometries, 1);
    // the emptied studio goes with the group
    assert_eq!(report.empty_containers, 2);
    assert_eq!(scene.child_count(root).unwrap(), 0);
    assert_eq!(
        scene.undo_labels(),
        vec![UNDO_CLEAR_ENVIRONMENT.to_string(), UNDO_CLEANUP.to_string()]
    );
}

#[test]
fn test_disable_textures_command() {
    let mut scene = MemoryScene::new("Root");
    scene.add_material(Material::new("A", "UPlasticMaterial"));
    assert_eq!(disable_textures(&mut scene).unwrap(), 1);
    assert_eq!(scene.undo_labels(), vec![UNDO_CLEAR_TEXTURES.to_string()]);
}
