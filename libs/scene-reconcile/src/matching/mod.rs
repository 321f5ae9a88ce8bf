//! # Spatial Material Matching
//!
//! Carries material assignments from a reference subtree over to a target
//! subtree by pairing up leaves that occupy the same space.
//!
//! ## Algorithm
//!
//! 1. Collect the Geometry leaves of both subtrees
//! 2. Paint every target leaf with the marker material, so leaves left
//!    without a partner stand out
//! 3. Compare every target leaf with every reference leaf
//!    ([`MatchScores`]); a pair passing all [`MatchThresholds`] hands the
//!    reference material to the target
//!
//! When several reference leaves qualify, the last one in traversal order
//! wins. There is no best-match ranking.

mod similarity;

pub use similarity::{
    component_ratio, cosine_similarity, size_ratio, MatchScores, MatchThresholds, SpatialSignature,
};

use config::constants::{
    MARKER_DIFFUSE_COLOR, MARKER_DIFFUSE_FIELD, MARKER_INCANDESCENCE_COLOR,
    MARKER_INCANDESCENCE_FIELD, MARKER_MATERIAL_KIND, MARKER_MATERIAL_NAME,
};
use glam::{DVec3, DVec4};
use scene_graph::{FieldValue, MaterialLibrary, ProgressSink, SceneEdit, SceneQuery, SceneResult};

use crate::plan::{MutationPlan, PlanFor};
use crate::progress::{to_percent, unit_fraction};
use crate::walker::collect_geometry;

/// Summary of one matching run.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport<M> {
    pub reference_leaves: usize,
    pub target_leaves: usize,
    /// Target leaves that received a reference material.
    pub matched: usize,
    /// Marker material left on unmatched leaves.
    pub marker: M,
}

/// Finds the marker material, creating it on first use.
pub fn ensure_marker_material<S>(scene: &mut S) -> SceneResult<S::MaterialId>
where
    S: MaterialLibrary,
{
    if let Some(existing) = scene.find_material(MARKER_MATERIAL_NAME)? {
        return Ok(existing);
    }
    let marker = scene.create_material(MARKER_MATERIAL_KIND)?;
    scene.set_material_name(marker, MARKER_MATERIAL_NAME)?;
    scene.set_field(
        marker,
        MARKER_DIFFUSE_FIELD,
        FieldValue::Vec3(DVec3::from_array(MARKER_DIFFUSE_COLOR)),
    )?;
    scene.set_field(
        marker,
        MARKER_INCANDESCENCE_FIELD,
        FieldValue::Color(DVec4::from_array(MARKER_INCANDESCENCE_COLOR)),
    )?;
    tracing::debug!(material = ?marker, "created marker material");
    Ok(marker)
}

/// Decides which reference material each target leaf receives.
///
/// Progress is reported after each target leaf.
pub fn plan_material_transfer<S, P>(
    scene: &S,
    reference_leaves: &[S::NodeId],
    target_leaves: &[S::NodeId],
    thresholds: &MatchThresholds,
    progress: &mut P,
) -> SceneResult<PlanFor<S>>
where
    S: SceneQuery,
    P: ProgressSink + ?Sized,
{
    let mut references = Vec::with_capacity(reference_leaves.len());
    for &leaf in reference_leaves {
        references.push((SpatialSignature::of(scene, leaf)?, scene.material(leaf)?));
    }

    let mut plan = MutationPlan::new();
    for (index, &target) in target_leaves.iter().enumerate() {
        let signature = SpatialSignature::of(scene, target)?;
        let mut chosen = None;
        for (reference, material) in &references {
            let scores = MatchScores::between(reference, &signature);
            if !thresholds.accepts(&scores) {
                continue;
            }
            // a qualifying reference without material leaves the previous choice
            if material.is_some() {
                chosen = *material;
            }
        }
        match chosen {
            Some(material) => plan.apply_material(target, material),
            None => tracing::debug!(node = ?target, "no reference match"),
        }
        progress.set_value(to_percent(unit_fraction(index + 1, target_leaves.len())));
    }
    Ok(plan)
}

/// Transfers materials from the `reference` subtree to the `target` subtree.
///
/// # Example
///
/// ```rust
/// use scene_graph::{BoundingBox, Material, MemoryScene, NodeSpec, SceneQuery};
/// use scene_reconcile::matching::{transfer_materials, MatchThresholds};
/// use scene_reconcile::progress::NullProgress;
///
/// let mut scene = MemoryScene::new("Root");
/// let root = scene.root();
/// let chrome = scene.add_material(Material::new("Chrome", "UPlasticMaterial"));
/// let spot = BoundingBox::from_extents([0.0, 0.0, 0.0, 2.0, 1.0, 1.0]);
/// let old = scene.add_container(root, "Old").unwrap();
/// scene.add_node(old, NodeSpec::geometry("Grille", spot, 40).with_material(chrome)).unwrap();
/// let new = scene.add_container(root, "New").unwrap();
/// let grille = scene.add_geometry(new, "Grille", spot, 38).unwrap();
///
/// let report = transfer_materials(&mut scene, old, new, &MatchThresholds::default(), &mut NullProgress).unwrap();
/// assert_eq!(report.matched, 1);
/// assert_eq!(scene.material(grille).unwrap(), Some(chrome));
/// ```
pub fn transfer_materials<S, P>(
    scene: &mut S,
    reference: S::NodeId,
    target: S::NodeId,
    thresholds: &MatchThresholds,
    progress: &mut P,
) -> SceneResult<MatchReport<S::MaterialId>>
where
    S: SceneEdit + MaterialLibrary,
    P: ProgressSink + ?Sized,
{
    progress.reset();
    let reference_leaves = collect_geometry(&*scene, reference)?;
    let target_leaves = collect_geometry(&*scene, target)?;

    let marker = ensure_marker_material(scene)?;
    for &leaf in &target_leaves {
        scene.apply_material(leaf, marker)?;
    }

    let plan = plan_material_transfer(&*scene, &reference_leaves, &target_leaves, thresholds, progress)?;
    let matched = plan.apply(scene)?;
    progress.reset();

    tracing::info!(
        reference = reference_leaves.len(),
        target = target_leaves.len(),
        matched,
        "material transfer finished"
    );
    Ok(MatchReport {
        reference_leaves: reference_leaves.len(),
        target_leaves: target_leaves.len(),
        matched,
        marker,
    })
}
