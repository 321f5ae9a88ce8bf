use super::*;
use scene_graph::{HostCall, MemoryScene, NodeKey, NodeSpec, TessellationQuality};

fn extents(values: [f64; 6]) -> BoundingBox {
    BoundingBox::from_extents(values)
}

fn part() -> (MemoryScene, NodeKey) {
    let mut scene = MemoryScene::new("Root");
    let root = scene.root();
    let part = scene
        .add_geometry(root, "Part", extents([0.0, 0.0, 0.0, 10.0, 10.0, 10.0]), 40)
        .unwrap();
    (scene, part)
}

#[test]
fn test_surface_inside_tolerance_is_kept() {
    let (mut scene, part) = part();
    scene.stage_tessellation(
        part,
        vec![NodeSpec::geometry("edge", extents([-1.0, -0.5, 0.0, 11.0, 10.0, 10.5]), 4)],
    );

    let report =
        tessellate_within_envelope(&mut scene, &[part], &TessellationSettings::default(), 1.0).unwrap();
    assert!(report.removed.is_empty());
    assert_eq!(report.kept.len(), 1);
}

#[test]
fn test_single_side_escape_deletes() {
    let (scene, part) = part();
    let envelope = Envelope {
        node: part,
        bounds: scene.bounding_box(part).unwrap(),
    };

    // every side in turn pushed 1.5 units out
    for side in 0..6 {
        let mut values = [1.0, 1.0, 1.0, 9.0, 9.0, 9.0];
        values[side] = if side < 3 { -1.5 } else { 11.5 };
        let mut scene = scene.clone();
        let child = scene
            .add_node(part, NodeSpec::geometry("patch", extents(values), 1))
            .unwrap();

        let plan = plan_escape_removal(&scene, &[envelope], 1.0).unwrap();
        assert_eq!(plan.deleted().collect::<Vec<_>>(), vec![child], "side {side}");
    }
}

#[test]
fn test_envelope_is_taken_before_tessellation() {
    let (mut scene, part) = part();
    // a huge stray surface would grow the part's box if measured afterwards
    scene.stage_tessellation(
        part,
        vec![
            NodeSpec::geometry("good", extents([2.0, 2.0, 2.0, 8.0, 8.0, 8.0]), 4),
            NodeSpec::geometry("stray", extents([100.0, 0.0, 0.0, 200.0, 5.0, 5.0]), 4),
        ],
    );

    let report =
        tessellate_within_envelope(&mut scene, &[part], &TessellationSettings::default(), 1.0).unwrap();
    assert_eq!(report.removed.len(), 1);
    assert_eq!(scene.child_names(part).unwrap(), vec!["good"]);
    assert_eq!(scene.bounding_box(part).unwrap().extents(), [0.0, 0.0, 0.0, 10.0, 10.0, 10.0]);
}

#[test]
fn test_targets_are_leaves_of_selection() {
    let mut scene = MemoryScene::new("Root");
    let root = scene.root();
    let group = scene.add_container(root, "Group").unwrap();
    let a = scene.add_geometry(group, "A", extents([0.0, 0.0, 0.0, 1.0, 1.0, 1.0]), 2).unwrap();
    let b = scene.add_geometry(group, "B", extents([2.0, 0.0, 0.0, 3.0, 1.0, 1.0]), 2).unwrap();

    let settings = TessellationSettings::from_quality(TessellationQuality::High);
    let report = tessellate_within_envelope(&mut scene, &[group], &settings, 1.0).unwrap();

    assert_eq!(report.targets, vec![a, b]);
    assert_eq!(scene.calls(), &[HostCall::Tessellate(vec![a, b], settings)]);
}

#[test]
fn test_nothing_to_tessellate() {
    let mut scene = MemoryScene::new("Root");
    let root = scene.root();
    let empty = scene.add_container(root, "Empty").unwrap();

    let report =
        tessellate_within_envelope(&mut scene, &[empty], &TessellationSettings::default(), 1.0).unwrap();
    assert!(report.targets.is_empty());
    assert!(scene.calls().is_empty());
}

#[test]
fn test_escape_distance() {
    let envelope = extents([0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
    assert_eq!(escape_distance(&envelope, &extents([0.0, -3.0, 0.0, 1.0, 1.0, 2.0])), 3.0);
    assert_eq!(escape_distance(&envelope, &envelope), 0.0);
}

#[test]
fn test_overlapping_selection_tessellates_each_leaf_once() {
    let mut scene = MemoryScene::new("Root");
    let root = scene.root();
    let group = scene.add_container(root, "Group").unwrap();
    let part = scene
        .add_geometry(group, "Part", extents([0.0, 0.0, 0.0, 10.0, 10.0, 10.0]), 40)
        .unwrap();
    scene.stage_tessellation(
        part,
        vec![
            NodeSpec::geometry("good", extents([1.0, 1.0, 1.0, 9.0, 9.0, 9.0]), 4),
            NodeSpec::geometry("stray", extents([50.0, 0.0, 0.0, 60.0, 1.0, 1.0]), 4),
        ],
    );
    let settings = TessellationSettings::default();

    let report = tessellate_within_envelope(&mut scene, &[group, part], &settings, 1.0).unwrap();

    assert_eq!(report.targets, vec![part]);
    assert_eq!(report.removed.len(), 1);
    assert_eq!(report.kept.len(), 1);
    assert_eq!(scene.child_names(part).unwrap(), vec!["good"]);
    assert_eq!(scene.calls(), &[HostCall::Tessellate(vec![part], settings)]);
}

#[test]
fn test_repeated_envelope_plans_one_delete() {
    let (mut scene, part) = part();
    let envelope = Envelope {
        node: part,
        bounds: scene.bounding_box(part).unwrap(),
    };
    let stray = scene
        .add_node(part, NodeSpec::geometry("stray", extents([20.0, 0.0, 0.0, 30.0, 1.0, 1.0]), 1))
        .unwrap();

    let plan = plan_escape_removal(&scene, &[envelope, envelope], 1.0).unwrap();
    assert_eq!(plan.deleted().collect::<Vec<_>>(), vec![stray]);
}
