//! # Hierarchical Merge
//!
//! Collapses each selected subtree into a flat list of merged Geometry
//! nodes, one level below the subtree root. Every non-Geometry child of
//! the root becomes one merge unit: its geometry is pulled up to it,
//! combined by the host, then promoted to the root and the emptied child is
//! deleted.
//!
//! The host does the actual mesh work (`flush_transform`, `merge_geometry`,
//! `unshare`); this module only sequences it and restructures the tree.

use scene_graph::{ProgressSink, SceneEdit, SceneQuery, SceneResult};

use crate::progress::{merge_fraction, to_percent};
use crate::walker::{collect_geometry, outermost};

/// Counts gathered while merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeReport {
    /// Roots processed.
    pub roots: usize,
    /// Geometry nodes moved up to a root.
    pub promoted: usize,
    /// Non-Geometry nodes deleted once emptied.
    pub removed: usize,
}

impl MergeReport {
    fn absorb(&mut self, other: MergeReport) {
        self.roots += other.roots;
        self.promoted += other.promoted;
        self.removed += other.removed;
    }
}

/// Merges every root in `roots`, reporting progress per child.
///
/// The sink is reset before the first root and after the last. A root
/// lying below another selected root is merged as part of it and not on
/// its own.
///
/// # Example
///
/// ```rust
/// use scene_graph::{BoundingBox, MemoryScene, SceneQuery};
/// use scene_reconcile::merge::merge_hierarchies;
/// use scene_reconcile::progress::RecordingProgress;
///
/// let mut scene = MemoryScene::new("Root");
/// let root = scene.root();
/// let car = scene.add_container(root, "Car").unwrap();
/// let door = scene.add_container(car, "Door").unwrap();
/// scene.add_geometry(door, "Panel", BoundingBox::default(), 10).unwrap();
///
/// let mut progress = RecordingProgress::default();
/// let report = merge_hierarchies(&mut scene, &[car], &mut progress).unwrap();
/// assert_eq!(report.promoted, 1);
/// assert_eq!(scene.child_names(car).unwrap(), vec!["Panel"]);
/// assert_eq!(progress.values, vec![100.0]);
/// ```
pub fn merge_hierarchies<S, P>(scene: &mut S, roots: &[S::NodeId], progress: &mut P) -> SceneResult<MergeReport>
where
    S: SceneEdit,
    P: ProgressSink + ?Sized,
{
    progress.reset();
    let roots = outermost(&*scene, roots)?;
    let mut report = MergeReport::default();
    for (index, &root) in roots.iter().enumerate() {
        scene.unshare(root)?;
        report.absorb(merge_root(scene, root, index, roots.len(), progress)?);
        tracing::debug!(root = ?root, "merged subtree");
    }
    progress.reset();
    tracing::info!(
        roots = report.roots,
        promoted = report.promoted,
        removed = report.removed,
        "merge finished"
    );
    Ok(report)
}

/// Merges one root. `roots_done` is the number of roots finished before it.
fn merge_root<S, P>(
    scene: &mut S,
    node: S::NodeId,
    roots_done: usize,
    root_total: usize,
    progress: &mut P,
) -> SceneResult<MergeReport>
where
    S: SceneEdit,
    P: ProgressSink + ?Sized,
{
    let mut report = MergeReport {
        roots: 1,
        ..MergeReport::default()
    };
    scene.flush_transform(node)?;

    let children = scene.children(node)?;
    let child_total = children.len();
    for (done, child) in children.into_iter().enumerate() {
        if !scene.kind(child)?.is_geometry() {
            report.promoted += merge_unit(scene, node, child)?;
            scene.delete_node(child, true)?;
            report.removed += 1;
        }
        progress.set_value(to_percent(merge_fraction(
            roots_done,
            root_total,
            done + 1,
            child_total,
        )));
    }

    for child in scene.children(node)? {
        if !scene.kind(child)?.is_geometry() {
            scene.delete_node(child, true)?;
            report.removed += 1;
        }
    }
    Ok(report)
}

/// Combines everything below `unit` and promotes the result into `root`.
///
/// Returns the number of nodes promoted.
fn merge_unit<S>(scene: &mut S, root: S::NodeId, unit: S::NodeId) -> SceneResult<usize>
where
    S: SceneEdit,
{
    scene.flush_transform(unit)?;
    scene.merge_geometry(unit)?;

    for leaf in collect_geometry(&*scene, unit)? {
        if let Some(parent) = scene.parent(leaf)? {
            if parent != unit {
                scene.move_node(leaf, parent, unit)?;
            }
        }
    }
    scene.merge_geometry(unit)?;

    let mut promoted = 0;
    for merged in scene.children(unit)? {
        if scene.kind(merged)?.is_geometry() {
            scene.move_node(merged, unit, root)?;
            promoted += 1;
        }
    }
    Ok(promoted)
}
