//! # Host Capabilities
//!
//! Traits implemented by whatever owns the scene. The engine never holds
//! nodes or materials itself; it reads through [`SceneQuery`], requests
//! changes through [`SceneEdit`] and [`MaterialLibrary`], and reports to
//! [`ProgressSink`]. Transactions are bracketed with [`UndoService`].
//!
//! Handles are associated types so a host can expose its own identifiers.

use crate::bounds::BoundingBox;
use crate::error::SceneResult;
use crate::material::FieldValue;
use crate::settings::TessellationSettings;
use crate::NodeKind;
use std::fmt::Debug;
use std::hash::Hash;

/// Read access to the scene tree.
pub trait SceneQuery {
    /// Node handle.
    type NodeId: Copy + Eq + Hash + Debug;
    /// Material handle.
    type MaterialId: Copy + Eq + Hash + Debug;

    /// Top of the scene tree.
    fn root(&self) -> Self::NodeId;

    /// Direct children in order.
    fn children(&self, node: Self::NodeId) -> SceneResult<Vec<Self::NodeId>>;

    fn parent(&self, node: Self::NodeId) -> SceneResult<Option<Self::NodeId>>;

    fn kind(&self, node: Self::NodeId) -> SceneResult<NodeKind>;

    fn name(&self, node: Self::NodeId) -> SceneResult<String>;

    /// World-space bounding box.
    fn bounding_box(&self, node: Self::NodeId) -> SceneResult<BoundingBox>;

    fn material(&self, node: Self::NodeId) -> SceneResult<Option<Self::MaterialId>>;

    fn primitive_count(&self, node: Self::NodeId) -> SceneResult<u64>;

    /// Number of direct children.
    fn child_count(&self, node: Self::NodeId) -> SceneResult<usize> {
        Ok(self.children(node)?.len())
    }

    fn is_visible(&self, node: Self::NodeId) -> SceneResult<bool>;
}

/// Structural and attribute edits on the scene tree.
pub trait SceneEdit: SceneQuery {
    /// Creates an empty node appended to `parent`'s children.
    fn create_node(
        &mut self,
        kind: NodeKind,
        name: &str,
        parent: Self::NodeId,
    ) -> SceneResult<Self::NodeId>;

    fn set_name(&mut self, node: Self::NodeId, name: &str) -> SceneResult<()>;

    /// Re-parents `node` from `from` to the end of `to`'s children.
    fn move_node(
        &mut self,
        node: Self::NodeId,
        from: Self::NodeId,
        to: Self::NodeId,
    ) -> SceneResult<()>;

    /// Deletes `node`; without `recursive` its children are handed to its parent.
    fn delete_node(&mut self, node: Self::NodeId, recursive: bool) -> SceneResult<()>;

    fn apply_material(
        &mut self,
        node: Self::NodeId,
        material: Self::MaterialId,
    ) -> SceneResult<()>;

    /// Selects `nodes`, replacing the current selection when `exclusive`.
    fn select_nodes(&mut self, nodes: &[Self::NodeId], exclusive: bool) -> SceneResult<()>;

    /// Bakes the node's transform into its geometry and resets it to identity.
    fn flush_transform(&mut self, node: Self::NodeId) -> SceneResult<()>;

    /// Breaks shared-geometry links below `node`.
    fn unshare(&mut self, node: Self::NodeId) -> SceneResult<()>;

    /// Combines the geometry directly below `node`.
    fn merge_geometry(&mut self, node: Self::NodeId) -> SceneResult<()>;

    /// Re-tessellates the surfaces of `nodes`.
    fn tessellate(
        &mut self,
        nodes: &[Self::NodeId],
        settings: &TessellationSettings,
    ) -> SceneResult<()>;
}

/// The host's material service.
pub trait MaterialLibrary: SceneQuery {
    /// Creates a material of a host-specific kind.
    fn create_material(&mut self, kind: &str) -> SceneResult<Self::MaterialId>;

    /// Looks a material up by name.
    fn find_material(&self, name: &str) -> SceneResult<Option<Self::MaterialId>>;

    /// Every material in the scene.
    fn materials(&self) -> SceneResult<Vec<Self::MaterialId>>;

    fn material_name(&self, material: Self::MaterialId) -> SceneResult<String>;

    fn set_material_name(&mut self, material: Self::MaterialId, name: &str) -> SceneResult<()>;

    fn set_field(
        &mut self,
        material: Self::MaterialId,
        field: &str,
        value: FieldValue,
    ) -> SceneResult<()>;

    fn tags(&self, material: Self::MaterialId) -> SceneResult<Vec<String>>;

    fn add_tag(&mut self, material: Self::MaterialId, tag: &str) -> SceneResult<()>;

    fn remove_tag(&mut self, material: Self::MaterialId, tag: &str) -> SceneResult<()>;

    /// Nodes the material is applied to.
    fn users(&self, material: Self::MaterialId) -> SceneResult<Vec<Self::NodeId>>;
}

/// Host undo stack.
///
/// Every mutation between `begin_batch` and the matching `end_batch` is
/// reverted as one step by the host.
pub trait UndoService {
    fn begin_batch(&mut self, label: &str);
    fn end_batch(&mut self);
}

/// Advisory progress output.
pub trait ProgressSink {
    /// Reports a value in `0..=100`.
    fn set_value(&mut self, value: f64);
    fn reset(&mut self);
}
