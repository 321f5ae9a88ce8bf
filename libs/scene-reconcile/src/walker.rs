//! # Tree Walker
//!
//! Depth-first collection of Geometry leaves.
//!
//! A Geometry node ends descent: it is either emitted or skipped together
//! with everything below it. Containers are always descended into. Children
//! are visited in order, so results are stable for a given tree.
//!
//! There is no cycle protection; hosts guarantee a finite acyclic tree.

use scene_graph::{SceneQuery, SceneResult};
use std::collections::HashSet;

/// Every Geometry leaf below `root` (or `root` itself when it is Geometry).
///
/// # Example
///
/// ```rust
/// use scene_graph::{BoundingBox, MemoryScene, SceneQuery};
/// use scene_reconcile::walker::collect_geometry;
///
/// let mut scene = MemoryScene::new("Root");
/// let root = scene.root();
/// let group = scene.add_container(root, "Group").unwrap();
/// let leaf = scene.add_geometry(group, "Leaf", BoundingBox::default(), 4).unwrap();
/// assert_eq!(collect_geometry(&scene, root).unwrap(), vec![leaf]);
/// ```
pub fn collect_geometry<S>(scene: &S, root: S::NodeId) -> SceneResult<Vec<S::NodeId>>
where
    S: SceneQuery + ?Sized,
{
    collect_geometry_filtered(scene, root, |_| Ok(true))
}

/// Geometry leaves below `root` accepted by `predicate`.
///
/// A Geometry node the predicate rejects is neither emitted nor descended
/// into.
pub fn collect_geometry_filtered<S, F>(
    scene: &S,
    root: S::NodeId,
    mut predicate: F,
) -> SceneResult<Vec<S::NodeId>>
where
    S: SceneQuery + ?Sized,
    F: FnMut(S::NodeId) -> SceneResult<bool>,
{
    let mut leaves = Vec::new();
    visit(scene, root, &mut predicate, &mut leaves)?;
    Ok(leaves)
}

/// Geometry leaves of several roots, concatenated in root order.
///
/// Roots may overlap; a leaf reachable from more than one root is listed
/// once, at its first position.
pub fn collect_geometry_of<S>(scene: &S, roots: &[S::NodeId]) -> SceneResult<Vec<S::NodeId>>
where
    S: SceneQuery + ?Sized,
{
    let mut leaves = Vec::new();
    for root in roots {
        visit(scene, *root, &mut |_| Ok(true), &mut leaves)?;
    }
    let mut seen = HashSet::with_capacity(leaves.len());
    leaves.retain(|leaf| seen.insert(*leaf));
    Ok(leaves)
}

/// `roots` without repeats and without nodes lying below another entry,
/// in input order.
pub fn outermost<S>(scene: &S, roots: &[S::NodeId]) -> SceneResult<Vec<S::NodeId>>
where
    S: SceneQuery + ?Sized,
{
    let selected: HashSet<S::NodeId> = roots.iter().copied().collect();
    let mut seen = HashSet::with_capacity(roots.len());
    let mut kept = Vec::with_capacity(roots.len());
    'roots: for &root in roots {
        if !seen.insert(root) {
            continue;
        }
        let mut ancestor = scene.parent(root)?;
        while let Some(node) = ancestor {
            if selected.contains(&node) {
                tracing::debug!(node = ?root, "covered by a selected ancestor");
                continue 'roots;
            }
            ancestor = scene.parent(node)?;
        }
        kept.push(root);
    }
    Ok(kept)
}

fn visit<S, F>(
    scene: &S,
    node: S::NodeId,
    predicate: &mut F,
    leaves: &mut Vec<S::NodeId>,
) -> SceneResult<()>
where
    S: SceneQuery + ?Sized,
    F: FnMut(S::NodeId) -> SceneResult<bool>,
{
    if scene.kind(node)?.is_geometry() {
        if predicate(node)? {
            leaves.push(node);
        }
        return Ok(());
    }
    for child in scene.children(node)? {
        visit(scene, child, predicate, leaves)?;
    }
    Ok(())
}

/// First node named `name` in depth-first pre-order, of any kind.
pub fn find_by_name<S>(scene: &S, root: S::NodeId, name: &str) -> SceneResult<Option<S::NodeId>>
where
    S: SceneQuery + ?Sized,
{
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if scene.name(node)? == name {
            return Ok(Some(node));
        }
        stack.extend(scene.children(node)?.into_iter().rev());
    }
    Ok(None)
}

// =============================================================================
// TESTS
// =============================================================================
