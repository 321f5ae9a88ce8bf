//! # Scene Cleanup
//!
//! Removes scene content that carries no renderable geometry.

use scene_graph::{SceneEdit, SceneQuery, SceneResult};

use crate::plan::{MutationPlan, PlanFor};
use crate::walker::{collect_geometry_filtered, find_by_name};

/// Counts from [`clear_unusable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanupReport {
    pub empty_geometries: usize,
    pub empty_containers: usize,
}

/// Deletes every child of the first node named `name` below `root`.
///
/// Returns the number of children deleted; a missing node deletes nothing.
pub fn clear_environment<S>(scene: &mut S, root: S::NodeId, name: &str) -> SceneResult<usize>
where
    S: SceneEdit,
{
    let Some(environment) = find_by_name(&*scene, root, name)? else {
        tracing::warn!(%name, "environment node not found");
        return Ok(0);
    };
    let children = scene.children(environment)?;
    for &child in &children {
        scene.delete_node(child, true)?;
    }
    tracing::debug!(%name, removed = children.len(), "environment cleared");
    Ok(children.len())
}

/// Geometry leaves below `root` that hold no primitives.
pub fn plan_empty_geometry_removal<S>(scene: &S, root: S::NodeId) -> SceneResult<PlanFor<S>>
where
    S: SceneQuery,
{
    let empty = collect_geometry_filtered(scene, root, |node| Ok(scene.primitive_count(node)? == 0))?;
    let mut plan = MutationPlan::new();
    for node in empty {
        if node != root {
            plan.delete(node);
        }
    }
    Ok(plan)
}

/// Deletes Geometry nodes with no primitives.
pub fn remove_empty_geometries<S>(scene: &mut S, root: S::NodeId) -> SceneResult<usize>
where
    S: SceneEdit,
{
    let plan = plan_empty_geometry_removal(&*scene, root)?;
    plan.apply(scene)
}

/// Deletes Containers left without children, innermost first. `root` is
/// never deleted.
pub fn remove_empty_containers<S>(scene: &mut S, root: S::NodeId) -> SceneResult<usize>
where
    S: SceneEdit,
{
    let mut removed = 0;
    for child in scene.children(root)? {
        removed += prune(scene, child)?;
    }
    Ok(removed)
}

/// Post-order pass; returns the number of containers deleted at or below
/// `node`.
fn prune<S>(scene: &mut S, node: S::NodeId) -> SceneResult<usize>
where
    S: SceneEdit,
{
    if scene.kind(node)?.is_geometry() {
        return Ok(0);
    }
    let mut removed = 0;
    for child in scene.children(node)? {
        removed += prune(scene, child)?;
    }
    if scene.child_count(node)? == 0 {
        scene.delete_node(node, true)?;
        removed += 1;
    }
    Ok(removed)
}

/// Removes empty geometry, then the containers it leaves empty.
pub fn clear_unusable<S>(scene: &mut S, root: S::NodeId) -> SceneResult<CleanupReport>
where
    S: SceneEdit,
{
    let report = CleanupReport {
        empty_geometries: remove_empty_geometries(scene, root)?,
        empty_containers: remove_empty_containers(scene, root)?,
    };
    tracing::info!(
        geometries = report.empty_geometries,
        containers = report.empty_containers,
        "unusable nodes cleared"
    );
    Ok(report)
}
