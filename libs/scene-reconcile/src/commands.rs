//! # Commands
//!
//! Entry points a host UI calls. Each command validates its inputs, runs
//! one component inside a single undo batch and returns a report.
//!
//! This is the only layer that produces validation errors
//! ([`ReconcileError::EmptySelection`], [`ReconcileError::MissingReference`],
//! [`ReconcileError::MissingTarget`], [`ReconcileError::InvalidParameter`]).
//! Validation happens before the batch opens, so a rejected command leaves
//! no undo step behind.

use config::constants::{
    ReconcileConfig, UNDO_APPLY_MATERIAL, UNDO_CLEANUP, UNDO_CLEAR_ENVIRONMENT, UNDO_CLEAR_TEXTURES,
    UNDO_MATCH_MATERIAL, UNDO_MERGE, UNDO_REMOVE_DUPLICATES, UNDO_RENAME_CHANGE,
    UNDO_RENAME_DEFAULT, UNDO_SPLIT_SYMMETRY, UNDO_TAG_MATERIALS, UNDO_TESSELLATE,
};
use scene_graph::{
    MaterialLibrary, ProgressSink, SceneEdit, SceneQuery, TessellationSettings, UndoService,
};

use crate::cleanup::{self, CleanupReport};
use crate::dedupe::{self, CenterKey};
use crate::error::{ReconcileError, ReconcileResult};
use crate::matching::{self, MatchReport, MatchThresholds};
use crate::materials;
use crate::merge::{self, MergeReport};
use crate::naming::{self, RenameMode};
use crate::symmetry;
use crate::tessellation::{self, TessellationReport};
use crate::transaction::with_undo;

/// Everything a command may ask of the host.
pub trait Host: SceneEdit + MaterialLibrary + UndoService {}

impl<T> Host for T where T: SceneEdit + MaterialLibrary + UndoService {}

type Node<H> = <H as SceneQuery>::NodeId;
type MaterialOf<H> = <H as SceneQuery>::MaterialId;

fn require_selection<N>(selection: &[N]) -> ReconcileResult<()> {
    if selection.is_empty() {
        return Err(ReconcileError::EmptySelection);
    }
    Ok(())
}

fn check_parameter(invalid: Option<(&'static str, f64)>) -> ReconcileResult<()> {
    match invalid {
        Some((name, value)) => Err(ReconcileError::invalid_parameter(name, value)),
        None => Ok(()),
    }
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Removes duplicate children of every selected node.
pub fn remove_duplicates<H: Host>(
    host: &mut H,
    selection: &[Node<H>],
    config: &ReconcileConfig,
) -> ReconcileResult<usize> {
    require_selection(selection)?;
    let key = CenterKey::from_config(config);
    with_undo(host, UNDO_REMOVE_DUPLICATES, |host| -> ReconcileResult<usize> {
        let mut removed = 0;
        for &container in selection {
            removed += dedupe::remove_duplicates(host, container, key)?;
        }
        Ok(removed)
    })
}

/// Splits every selected container across the Y=0 plane.
pub fn split_symmetry<H: Host>(
    host: &mut H,
    selection: &[Node<H>],
) -> ReconcileResult<Vec<(Node<H>, Node<H>)>> {
    require_selection(selection)?;
    with_undo(host, UNDO_SPLIT_SYMMETRY, |host| {
        symmetry::split_symmetric(host, selection).map_err(ReconcileError::from)
    })
}

/// Tessellates the geometry below the selection, dropping escaped surfaces.
pub fn tessellate<H: Host>(
    host: &mut H,
    selection: &[Node<H>],
    settings: &TessellationSettings,
    config: &ReconcileConfig,
) -> ReconcileResult<TessellationReport<Node<H>>> {
    check_parameter(settings.first_invalid())?;
    require_selection(selection)?;
    with_undo(host, UNDO_TESSELLATE, |host| {
        tessellation::tessellate_within_envelope(host, selection, settings, config.bounds_tolerance)
            .map_err(ReconcileError::from)
    })
}

/// Merges every selected subtree.
pub fn merge<H: Host, P: ProgressSink + ?Sized>(
    host: &mut H,
    selection: &[Node<H>],
    progress: &mut P,
) -> ReconcileResult<MergeReport> {
    require_selection(selection)?;
    with_undo(host, UNDO_MERGE, |host| {
        merge::merge_hierarchies(host, selection, progress).map_err(ReconcileError::from)
    })
}

// =============================================================================
// NAMES
// =============================================================================

/// Normalizes names across the whole scene.
pub fn rename<H: Host>(host: &mut H, mode: RenameMode, config: &ReconcileConfig) -> ReconcileResult<usize> {
    let label = match mode {
        RenameMode::Reset => UNDO_RENAME_DEFAULT,
        RenameMode::Change => UNDO_RENAME_CHANGE,
    };
    let root = host.root();
    with_undo(host, label, |host| {
        naming::normalize_names(host, root, mode, config.counter_suffix_limit).map_err(ReconcileError::from)
    })
}

// =============================================================================
// MATERIALS
// =============================================================================

/// Transfers materials from `reference` to `target`.
pub fn match_materials<H: Host, P: ProgressSink + ?Sized>(
    host: &mut H,
    reference: Option<Node<H>>,
    target: Option<Node<H>>,
    thresholds: &MatchThresholds,
    progress: &mut P,
) -> ReconcileResult<MatchReport<MaterialOf<H>>> {
    let reference = reference.ok_or(ReconcileError::MissingReference)?;
    let target = target.ok_or(ReconcileError::MissingTarget)?;
    check_parameter(thresholds.first_invalid())?;
    with_undo(host, UNDO_MATCH_MATERIAL, |host| {
        matching::transfer_materials(host, reference, target, thresholds, progress)
            .map_err(ReconcileError::from)
    })
}

/// Paints the selection with a previously recorded material.
pub fn apply_material<H: Host>(
    host: &mut H,
    selection: &[Node<H>],
    material: MaterialOf<H>,
) -> ReconcileResult<usize> {
    require_selection(selection)?;
    with_undo(host, UNDO_APPLY_MATERIAL, |host| {
        materials::apply_material(host, selection, material).map_err(ReconcileError::from)
    })
}

/// Tags every material missing from `known_names`.
pub fn tag_unlisted_materials<H: Host, T: AsRef<str>>(
    host: &mut H,
    known_names: &[T],
    tag: &str,
) -> ReconcileResult<usize> {
    with_undo(host, UNDO_TAG_MATERIALS, |host| {
        materials::tag_unlisted(host, known_names, tag).map_err(ReconcileError::from)
    })
}

/// Renames the materials of the selected nodes and clears `tag` from them.
pub fn rename_selected_materials<H: Host>(
    host: &mut H,
    selection: &[Node<H>],
    new_name: &str,
    tag: &str,
) -> ReconcileResult<usize> {
    require_selection(selection)?;
    let mut targets = Vec::new();
    for &node in selection {
        if let Some(material) = host.material(node)? {
            if !targets.contains(&material) {
                targets.push(material);
            }
        }
    }
    with_undo(host, UNDO_TAG_MATERIALS, |host| -> ReconcileResult<usize> {
        materials::rename_materials(host, &targets, new_name, tag)?;
        Ok(targets.len())
    })
}

/// Disables texture usage on every material.
pub fn disable_textures<H: Host>(host: &mut H) -> ReconcileResult<usize> {
    with_undo(host, UNDO_CLEAR_TEXTURES, |host| {
        materials::disable_textures(host).map_err(ReconcileError::from)
    })
}

// =============================================================================
// CLEANUP
// =============================================================================

/// Empties the environment node named `name`.
pub fn clear_environment<H: Host>(host: &mut H, name: &str) -> ReconcileResult<usize> {
    let root = host.root();
    with_undo(host, UNDO_CLEAR_ENVIRONMENT, |host| {
        cleanup::clear_environment(host, root, name).map_err(ReconcileError::from)
    })
}

/// Removes empty geometry and containers across the scene.
pub fn clear_unusable<H: Host>(host: &mut H) -> ReconcileResult<CleanupReport> {
    let root = host.root();
    with_undo(host, UNDO_CLEANUP, |host| {
        cleanup::clear_unusable(host, root).map_err(ReconcileError::from)
    })
}

#[cfg(test)]
mod tests;
