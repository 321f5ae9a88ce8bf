//! # Scene Graph
//!
//! Data model and host capabilities for scene-tree reconciliation.
//!
//! The scene itself is owned by an external host (a DCC application, a
//! viewer, a test fixture). This crate describes what the engine may ask of
//! that host and provides [`MemoryScene`], an arena-backed host used for
//! tests, headless runs and embedding.
//!
//! ## Architecture
//!
//! ```text
//! SceneQuery ──► SceneEdit ──┐
//!      │                     ├──► engine (scene-reconcile)
//!      └──► MaterialLibrary ─┘
//! UndoService, ProgressSink ─────► caller boundary
//! ```

pub mod bounds;
pub mod document;
pub mod error;
pub mod host;
pub mod material;
pub mod memory;
pub mod settings;

pub use bounds::BoundingBox;
pub use document::{MaterialDocument, NodeDocument, SceneDocument};
pub use error::{SceneError, SceneResult};
pub use host::{MaterialLibrary, ProgressSink, SceneEdit, SceneQuery, UndoService};
pub use material::{FieldValue, Material};
pub use memory::{HostCall, MaterialKey, MemoryScene, NodeKey, NodeSpec};
pub use settings::{TessellationQuality, TessellationSettings};

use serde::{Deserialize, Serialize};

/// Classification of a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Renderable mesh; the walker never descends below one.
    Geometry,
    /// Grouping node.
    Container,
}

impl NodeKind {
    /// Returns true for [`NodeKind::Geometry`].
    #[inline]
    pub fn is_geometry(self) -> bool {
        matches!(self, NodeKind::Geometry)
    }
}
