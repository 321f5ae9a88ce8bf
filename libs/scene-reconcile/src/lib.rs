//! # Scene Reconcile
//!
//! Geometric reconciliation over a host-owned scene tree: removes duplicate
//! geometry, splits symmetric assemblies, checks tessellation against the
//! original envelope, flattens hierarchies, normalizes names and transfers
//! materials between two versions of the same model by spatial similarity.
//!
//! ## Architecture
//!
//! ```text
//! commands ──► with_undo ──► component ──► plan_* (pure, &S)
//!                               │                │
//!                               │                ▼
//!                               └──────► MutationPlan::apply (&mut S)
//!
//! components: dedupe, symmetry, tessellation, merge, naming,
//!             matching, materials, cleanup
//! shared:     walker, progress, plan
//! ```
//!
//! Every component is generic over the capability traits in `scene_graph`,
//! so the same code runs against a DCC host or the in-memory
//! [`scene_graph::MemoryScene`].
//!
//! ## Example
//!
//! ```rust
//! use config::constants::ReconcileConfig;
//! use scene_graph::{BoundingBox, MemoryScene, SceneQuery};
//! use glam::DVec3;
//!
//! let mut scene = MemoryScene::new("Root");
//! let root = scene.root();
//! let group = scene.add_container(root, "Group").unwrap();
//! let cube = BoundingBox::from_center_size(DVec3::new(0.0, 5.0, 0.0), DVec3::ONE);
//! scene.add_geometry(group, "A", cube, 10).unwrap();
//! scene.add_geometry(group, "B", cube, 10).unwrap();
//!
//! let removed =
//!     scene_reconcile::commands::remove_duplicates(&mut scene, &[group], &ReconcileConfig::default())
//!         .unwrap();
//! assert_eq!(removed, 1);
//! assert_eq!(scene.child_names(group).unwrap(), vec!["B"]);
//! ```

pub mod cleanup;
pub mod commands;
pub mod dedupe;
pub mod error;
pub mod matching;
pub mod materials;
pub mod merge;
pub mod naming;
pub mod plan;
pub mod progress;
pub mod symmetry;
pub mod tessellation;
pub mod transaction;
pub mod walker;

#[cfg(test)]
mod test_support;

pub use cleanup::CleanupReport;
pub use commands::Host;
pub use dedupe::CenterKey;
pub use error::{ReconcileError, ReconcileResult};
pub use matching::{MatchReport, MatchThresholds};
pub use merge::MergeReport;
pub use naming::RenameMode;
pub use plan::{MutationPlan, PlanFor};
pub use symmetry::SymmetrySplit;
pub use tessellation::TessellationReport;
