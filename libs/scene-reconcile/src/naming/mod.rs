//! # Name Normalization
//!
//! Gives Geometry children numbered names derived from their container.
//!
//! A name's *base* is the name without a trailing `_<digits>` counter.
//! Suffixes above the counter limit (dates, hashes) are not counters and
//! stay part of the base.
//!
//! ## Modes
//!
//! - [`RenameMode::Reset`] renumbers every Geometry child from zero and
//!   stores the next free index on the container
//! - [`RenameMode::Change`] only renames children that do not already
//!   carry the base name, continuing from the container's stored counter
//!
//! Both walk the whole tree below the starting node. Non-Geometry children
//! are visited whether or not their parent was renamed.

use scene_graph::{SceneEdit, SceneQuery, SceneResult};

use crate::plan::{MutationPlan, PlanFor};

/// Renaming strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameMode {
    Reset,
    Change,
}

/// Integer after the last `_`, if the tail is all ASCII digits.
///
/// ```rust
/// use scene_reconcile::naming::trailing_counter;
///
/// assert_eq!(trailing_counter("Door_12"), Some(12));
/// assert_eq!(trailing_counter("Door_L"), None);
/// assert_eq!(trailing_counter("Door"), None);
/// ```
pub fn trailing_counter(name: &str) -> Option<u64> {
    let (_, tail) = name.rsplit_once('_')?;
    if tail.is_empty() || !tail.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    tail.parse().ok()
}

/// `name` without its counter suffix.
///
/// ```rust
/// use scene_reconcile::naming::base_name;
///
/// assert_eq!(base_name("Door_3", 10_000_000), "Door");
/// assert_eq!(base_name("Shot_20240101", 10_000_000), "Shot_20240101");
/// ```
pub fn base_name(name: &str, limit: u64) -> &str {
    match (trailing_counter(name), name.rsplit_once('_')) {
        (Some(counter), Some((base, _))) if counter <= limit => base,
        _ => name,
    }
}

fn numbered(base: &str, index: impl std::fmt::Display) -> String {
    format!("{base}_{index}")
}

/// Geometry and other children of `node`, each in child order.
fn split_children<S>(scene: &S, node: S::NodeId) -> SceneResult<(Vec<S::NodeId>, Vec<S::NodeId>)>
where
    S: SceneQuery,
{
    let mut geometry = Vec::new();
    let mut others = Vec::new();
    for child in scene.children(node)? {
        if scene.kind(child)?.is_geometry() {
            geometry.push(child);
        } else {
            others.push(child);
        }
    }
    Ok((geometry, others))
}

/// Renames for [`RenameMode::Reset`] starting at `root`.
///
/// A container `Foo_3` with two Geometry children ends up as `Foo_2` with
/// children `Foo_0` and `Foo_1`.
pub fn plan_reset_names<S>(scene: &S, root: S::NodeId, limit: u64) -> SceneResult<PlanFor<S>>
where
    S: SceneQuery,
{
    let mut plan = MutationPlan::new();
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        let (geometry, others) = split_children(scene, node)?;
        if !geometry.is_empty() {
            let name = scene.name(node)?;
            let base = base_name(&name, limit);
            for (index, child) in geometry.iter().enumerate() {
                plan.rename(*child, numbered(base, index));
            }
            plan.rename(node, numbered(base, geometry.len()));
        }
        pending.extend(others.into_iter().rev());
    }
    Ok(plan)
}

/// Renames for [`RenameMode::Change`] starting at `root`.
///
/// The counter starts at the container's trailing integer, whatever its
/// size, and only children whose name lacks the base are renumbered.
pub fn plan_change_names<S>(scene: &S, root: S::NodeId, limit: u64) -> SceneResult<PlanFor<S>>
where
    S: SceneQuery,
{
    let mut plan = MutationPlan::new();
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        let (geometry, others) = split_children(scene, node)?;
        let name = scene.name(node)?;
        let base = base_name(&name, limit);
        let mut counter = trailing_counter(&name).unwrap_or(0);
        for child in &geometry {
            if scene.name(*child)?.contains(base) {
                continue;
            }
            plan.rename(*child, numbered(base, counter));
            counter = counter.saturating_add(1);
        }
        if !geometry.is_empty() {
            plan.rename(node, numbered(base, counter));
        }
        pending.extend(others.into_iter().rev());
    }
    Ok(plan)
}

/// Plans and applies renames for `mode` below `root`, returning the number
/// of renames performed.
pub fn normalize_names<S>(scene: &mut S, root: S::NodeId, mode: RenameMode, limit: u64) -> SceneResult<usize>
where
    S: SceneEdit,
{
    let plan = match mode {
        RenameMode::Reset => plan_reset_names(&*scene, root, limit)?,
        RenameMode::Change => plan_change_names(&*scene, root, limit)?,
    };
    let renamed = plan.apply(scene)?;
    tracing::info!(?mode, renamed, "names normalized");
    Ok(renamed)
}
