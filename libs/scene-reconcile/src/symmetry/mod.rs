//! # Symmetry Splitting
//!
//! Splits a container that straddles the Y=0 plane into two siblings: the
//! original keeps the children at or above the plane, a new
//! `<name>_symmetry` container receives the children below it.
//!
//! This is a heuristic on bounding-box centers, not a proof that the two
//! halves mirror each other.

use config::constants::SYMMETRY_SUFFIX;
use scene_graph::{NodeKind, SceneEdit, SceneQuery, SceneResult};

/// Decided split of one container.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetrySplit<N, M> {
    /// Container being split.
    pub source: N,
    /// Parent the new sibling is created under.
    pub parent: N,
    /// Name of the new sibling.
    pub name: String,
    /// Children whose center lies below the plane, in child order.
    pub movers: Vec<N>,
    /// Material copied onto the new sibling.
    pub material: Option<M>,
}

/// Split decided for a given host.
pub type SplitFor<S> = SymmetrySplit<<S as SceneQuery>::NodeId, <S as SceneQuery>::MaterialId>;

/// Decides how `node` splits, or `None` when it is not splittable.
///
/// A node is splittable when it is a Container with a parent and its
/// bounding-box center lies exactly on `y == 0`.
pub fn plan_symmetry_split<S>(scene: &S, node: S::NodeId) -> SceneResult<Option<SplitFor<S>>>
where
    S: SceneQuery,
{
    if scene.kind(node)? != NodeKind::Container {
        tracing::debug!(node = ?node, "not a container, skipping symmetry split");
        return Ok(None);
    }
    let center = scene.bounding_box(node)?.center();
    if center.y != 0.0 {
        tracing::debug!(node = ?node, center_y = center.y, "center off the mirror plane");
        return Ok(None);
    }
    let Some(parent) = scene.parent(node)? else {
        tracing::debug!(node = ?node, "root cannot be split");
        return Ok(None);
    };

    let mut movers = Vec::new();
    for child in scene.children(node)? {
        if scene.bounding_box(child)?.center().y < 0.0 {
            movers.push(child);
        }
    }

    Ok(Some(SymmetrySplit {
        source: node,
        parent,
        name: format!("{}{}", scene.name(node)?, SYMMETRY_SUFFIX),
        movers,
        material: scene.material(node)?,
    }))
}

impl<N: Copy, M: Copy> SymmetrySplit<N, M> {
    /// Creates the sibling, moves the lower children into it, copies the
    /// material and selects both halves exclusively.
    ///
    /// Returns the new sibling.
    pub fn apply<S>(&self, scene: &mut S) -> SceneResult<N>
    where
        S: SceneEdit<NodeId = N, MaterialId = M>,
    {
        let sibling = scene.create_node(NodeKind::Container, &self.name, self.parent)?;
        for &child in &self.movers {
            scene.move_node(child, self.source, sibling)?;
        }
        if let Some(material) = self.material {
            scene.apply_material(sibling, material)?;
        }
        scene.select_nodes(&[self.source, sibling], true)?;
        Ok(sibling)
    }
}

/// Splits every splittable node, returning `(original, new sibling)` pairs.
pub fn split_symmetric<S>(scene: &mut S, nodes: &[S::NodeId]) -> SceneResult<Vec<(S::NodeId, S::NodeId)>>
where
    S: SceneEdit,
{
    let mut pairs = Vec::new();
    for &node in nodes {
        let Some(split) = plan_symmetry_split(&*scene, node)? else {
            continue;
        };
        let sibling = split.apply(scene)?;
        tracing::debug!(node = ?node, moved = split.movers.len(), "split along y = 0");
        pairs.push((node, sibling));
    }
    tracing::info!(requested = nodes.len(), split = pairs.len(), "symmetry split finished");
    Ok(pairs)
}

#[cfg(test)]
mod tests;
