//! # Undo Transactions
//!
//! Brackets a batch of edits in one host undo step. The engine keeps no
//! rollback state: when the body fails the batch is still closed and the
//! edits already applied stay applied until the user undoes them.

use scene_graph::UndoService;

/// Runs `body` between `begin_batch(label)` and `end_batch()`.
///
/// The batch is closed whether `body` succeeds or fails.
///
/// # Example
///
/// ```rust
/// use scene_graph::{MemoryScene, SceneEdit, SceneQuery};
/// use scene_reconcile::transaction::with_undo;
///
/// let mut scene = MemoryScene::new("Root");
/// let root = scene.root();
/// with_undo(&mut scene, "rename", |scene| scene.set_name(root, "World")).unwrap();
/// assert_eq!(scene.undo(), Some("rename".to_string()));
/// assert_eq!(scene.name(root).unwrap(), "Root");
/// ```
pub fn with_undo<H, T, E>(
    host: &mut H,
    label: &str,
    body: impl FnOnce(&mut H) -> Result<T, E>,
) -> Result<T, E>
where
    H: UndoService + ?Sized,
    E: std::fmt::Display,
{
    host.begin_batch(label);
    let outcome = body(host);
    host.end_batch();
    if let Err(err) = &outcome {
        tracing::warn!(%label, error = %err, "batch failed; applied edits remain until undone");
    }
    outcome
}

// =============================================================================
// TESTS
// =============================================================================
