//! # Tessellation Validation
//!
//! Re-tessellates geometry through the host and throws away any generated
//! surface that escapes the geometry's original extents. Hosts occasionally
//! emit stray patches far from the source surface; the bounding box taken
//! before the operation is the reference envelope.

use glam::DVec3;
use scene_graph::{BoundingBox, SceneEdit, SceneQuery, SceneResult, TessellationSettings};
use std::collections::HashSet;

use crate::plan::{MutationPlan, PlanFor};
use crate::walker::collect_geometry_of;

/// Bounding box of one target captured before tessellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope<N> {
    pub node: N,
    pub bounds: BoundingBox,
}

/// Outcome of one tessellation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TessellationReport<N> {
    /// Geometry handed to the host.
    pub targets: Vec<N>,
    /// Children that fit their envelope.
    pub kept: Vec<N>,
    /// Children deleted for escaping their envelope.
    pub removed: Vec<N>,
}

impl<N> Default for TessellationReport<N> {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            kept: Vec::new(),
            removed: Vec::new(),
        }
    }
}

/// Captures the current bounding box of every target.
pub fn snapshot_envelopes<S>(scene: &S, targets: &[S::NodeId]) -> SceneResult<Vec<Envelope<S::NodeId>>>
where
    S: SceneQuery,
{
    targets
        .iter()
        .map(|&node| {
            Ok(Envelope {
                node,
                bounds: scene.bounding_box(node)?,
            })
        })
        .collect()
}

/// Deletes every child of an envelope's node whose box leaves the envelope
/// grown by `tolerance` on any of its six sides.
///
/// A child is planned for deletion at most once, even when its parent has
/// several envelopes.
pub fn plan_escape_removal<S>(
    scene: &S,
    envelopes: &[Envelope<S::NodeId>],
    tolerance: f64,
) -> SceneResult<PlanFor<S>>
where
    S: SceneQuery,
{
    let mut plan = MutationPlan::new();
    let mut planned = HashSet::new();
    for envelope in envelopes {
        for child in scene.children(envelope.node)? {
            if planned.contains(&child) {
                continue;
            }
            let bounds = scene.bounding_box(child)?;
            let checks = envelope.bounds.containment_checks(&bounds, tolerance);
            if checks.iter().all(|inside| *inside) {
                continue;
            }
            tracing::debug!(
                node = ?envelope.node,
                child = ?child,
                escape = %escape_distance(&envelope.bounds, &bounds),
                "surface escapes envelope"
            );
            planned.insert(child);
            plan.delete(child);
        }
    }
    Ok(plan)
}

/// Largest per-axis overshoot of `bounds` beyond `envelope`.
fn escape_distance(envelope: &BoundingBox, bounds: &BoundingBox) -> f64 {
    let below = (envelope.min - bounds.min).max(DVec3::ZERO);
    let above = (bounds.max - envelope.max).max(DVec3::ZERO);
    below.max(above).max_element()
}

/// Tessellates the Geometry leaves of `nodes` and removes escaped surfaces.
///
/// Overlapping selections are fine: each leaf is tessellated and checked
/// once.
///
/// # Example
///
/// ```rust
/// use scene_graph::{BoundingBox, MemoryScene, NodeSpec, SceneQuery, TessellationSettings};
/// use scene_reconcile::tessellation::tessellate_within_envelope;
///
/// let mut scene = MemoryScene::new("Root");
/// let root = scene.root();
/// let part = scene
///     .add_geometry(root, "Part", BoundingBox::from_extents([0.0, 0.0, 0.0, 2.0, 2.0, 2.0]), 8)
///     .unwrap();
/// scene.stage_tessellation(
///     part,
///     vec![
///         NodeSpec::geometry("inside", BoundingBox::from_extents([0.5, 0.5, 0.5, 1.5, 1.5, 1.5]), 2),
///         NodeSpec::geometry("stray", BoundingBox::from_extents([9.0, 0.0, 0.0, 10.0, 1.0, 1.0]), 2),
///     ],
/// );
///
/// let report = tessellate_within_envelope(&mut scene, &[root], &TessellationSettings::default(), 1.0).unwrap();
/// assert_eq!(report.targets, vec![part]);
/// assert_eq!(report.kept.len(), 1);
/// assert_eq!(report.removed.len(), 1);
/// ```
pub fn tessellate_within_envelope<S>(
    scene: &mut S,
    nodes: &[S::NodeId],
    settings: &TessellationSettings,
    tolerance: f64,
) -> SceneResult<TessellationReport<S::NodeId>>
where
    S: SceneEdit,
{
    let targets = collect_geometry_of(&*scene, nodes)?;
    if targets.is_empty() {
        tracing::warn!(selected = nodes.len(), "no geometry to tessellate");
        return Ok(TessellationReport::default());
    }

    let envelopes = snapshot_envelopes(&*scene, &targets)?;
    scene.tessellate(&targets, settings)?;

    let plan = plan_escape_removal(&*scene, &envelopes, tolerance)?;
    let removed: Vec<_> = plan.deleted().collect();
    plan.apply(scene)?;

    let mut kept = Vec::new();
    for envelope in &envelopes {
        kept.extend(scene.children(envelope.node)?);
    }

    tracing::info!(
        targets = targets.len(),
        kept = kept.len(),
        removed = removed.len(),
        "tessellation finished"
    );
    Ok(TessellationReport {
        targets,
        kept,
        removed,
    })
}

#[cfg(test)]
mod tests;
