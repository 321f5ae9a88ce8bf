//! # Duplicate Detection
//!
//! Removes siblings that occupy the same spot and carry the same amount of
//! geometry. Only the direct children of one container are compared.
//!
//! ## Algorithm
//!
//! 1. Bucket children by bounding-box center ([`CenterKey`])
//! 2. A bucket of two or more children whose primitive counts all agree is
//!    a duplicate set: every member but the last one (in child order) is
//!    deleted
//! 3. A bucket with differing primitive counts is a coincidental overlap
//!    and is left alone

use config::constants::ReconcileConfig;
use glam::DVec3;
use scene_graph::{SceneEdit, SceneQuery, SceneResult};
use std::collections::HashMap;

use crate::plan::{MutationPlan, PlanFor};

/// How centers are compared.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CenterKey {
    /// Exact floating equality; `-0.0` equals `0.0`, NaN equals nothing.
    #[default]
    Exact,
    /// Centers rounded to multiples of the given epsilon.
    Quantized(f64),
}

impl CenterKey {
    /// Key selected by the configuration's center epsilon.
    pub fn from_config(config: &ReconcileConfig) -> Self {
        match config.center_key_epsilon {
            Some(epsilon) => CenterKey::Quantized(epsilon),
            None => CenterKey::Exact,
        }
    }

    /// Hashable bucket for `center`, or `None` when the center cannot be
    /// compared.
    pub fn bucket(&self, center: DVec3) -> Option<[i64; 3]> {
        if !center.is_finite() {
            return None;
        }
        let coords = center.to_array();
        Some(match *self {
            CenterKey::Exact => coords.map(|value| {
                // fold -0.0 onto 0.0 so both hash alike
                let value = if value == 0.0 { 0.0 } else { value };
                value.to_bits() as i64
            }),
            CenterKey::Quantized(epsilon) => coords.map(|value| (value / epsilon).round() as i64),
        })
    }
}

/// Children of `container` sharing a bucket, in first-seen order.
fn center_groups<S>(scene: &S, container: S::NodeId, key: CenterKey) -> SceneResult<Vec<Vec<S::NodeId>>>
where
    S: SceneQuery,
{
    let mut groups: Vec<Vec<S::NodeId>> = Vec::new();
    let mut index: HashMap<[i64; 3], usize> = HashMap::new();
    for child in scene.children(container)? {
        let Some(bucket) = key.bucket(scene.bounding_box(child)?.center()) else {
            continue;
        };
        match index.get(&bucket) {
            Some(&slot) => groups[slot].push(child),
            None => {
                index.insert(bucket, groups.len());
                groups.push(vec![child]);
            }
        }
    }
    Ok(groups)
}

/// Decides which children of `container` to delete.
pub fn plan_duplicate_removal<S>(scene: &S, container: S::NodeId, key: CenterKey) -> SceneResult<PlanFor<S>>
where
    S: SceneQuery,
{
    let mut plan = MutationPlan::new();
    for group in center_groups(scene, container, key)? {
        let Some((&survivor, rest)) = group.split_last() else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        let expected = scene.primitive_count(survivor)?;
        let mut uniform = true;
        for node in rest {
            if scene.primitive_count(*node)? != expected {
                uniform = false;
                break;
            }
        }
        if !uniform {
            tracing::debug!(members = group.len(), "coincident siblings differ in primitive count, keeping all");
            continue;
        }
        tracing::debug!(survivor = ?survivor, removed = rest.len(), "duplicate siblings found");
        for node in rest {
            plan.delete(*node);
        }
    }
    Ok(plan)
}

/// Deletes duplicate children of `container`, returning how many were
/// removed.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use scene_graph::{BoundingBox, MemoryScene, SceneQuery};
/// use scene_reconcile::dedupe::{remove_duplicates, CenterKey};
///
/// let mut scene = MemoryScene::new("Root");
/// let root = scene.root();
/// let spot = BoundingBox::from_center_size(DVec3::new(0.0, 5.0, 0.0), DVec3::ONE);
/// scene.add_geometry(root, "A", spot, 10).unwrap();
/// scene.add_geometry(root, "B", spot, 10).unwrap();
///
/// assert_eq!(remove_duplicates(&mut scene, root, CenterKey::Exact).unwrap(), 1);
/// assert_eq!(scene.child_count(root).unwrap(), 1);
/// ```
pub fn remove_duplicates<S>(scene: &mut S, container: S::NodeId, key: CenterKey) -> SceneResult<usize>
where
    S: SceneEdit,
{
    let plan = plan_duplicate_removal(&*scene, container, key)?;
    let removed = plan.len();
    plan.apply(scene)?;
    tracing::info!(container = ?container, removed, "removed duplicate siblings");
    Ok(removed)
}
