//! # In-Memory Scene
//!
//! Arena-backed host implementing every capability trait. Nodes and
//! materials live in [`SlotMap`]s; children are ordered key lists and the
//! parent is a non-owning back-edge, so reparenting never fights ownership.
//!
//! Host-side effects that have no structural meaning here (transform
//! flushing, unsharing) are recorded in a call log so callers can observe
//! that the engine requested them.

mod convert;
mod history;


use crate::bounds::BoundingBox;
use crate::error::{SceneError, SceneResult};
use crate::host::{MaterialLibrary, SceneEdit, SceneQuery, UndoService};
use crate::material::{FieldValue, Material};
use crate::settings::TessellationSettings;
use crate::NodeKind;
use history::History;
use slotmap::{new_key_type, SlotMap};
use std::collections::HashMap;

new_key_type! {
    /// Handle of a node in a [`MemoryScene`].
    pub struct NodeKey;
    /// Handle of a material in a [`MemoryScene`].
    pub struct MaterialKey;
}

/// Attributes of a node added through [`MemoryScene::add_node`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub name: String,
    pub kind: NodeKind,
    /// Own extents; containers usually leave this empty and report the
    /// union of their children.
    pub bounds: Option<BoundingBox>,
    pub primitive_count: u64,
    pub material: Option<MaterialKey>,
    pub visible: bool,
}

impl NodeSpec {
    pub fn container(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Container,
            bounds: None,
            primitive_count: 0,
            material: None,
            visible: true,
        }
    }

    pub fn geometry(name: impl Into<String>, bounds: BoundingBox, primitive_count: u64) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Geometry,
            bounds: Some(bounds),
            primitive_count,
            material: None,
            visible: true,
        }
    }

    pub fn with_material(mut self, material: MaterialKey) -> Self {
        self.material = Some(material);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Effects requested from the host that are recorded rather than simulated.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    FlushTransform(NodeKey),
    Unshare(NodeKey),
    MergeGeometry(NodeKey),
    Tessellate(Vec<NodeKey>, TessellationSettings),
    Select(Vec<NodeKey>, bool),
}

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    kind: NodeKind,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    bounds: Option<BoundingBox>,
    material: Option<MaterialKey>,
    primitive_count: u64,
    visible: bool,
}

impl NodeData {
    fn from_spec(spec: NodeSpec, parent: Option<NodeKey>) -> Self {
        Self {
            name: spec.name,
            kind: spec.kind,
            parent,
            children: Vec::new(),
            bounds: spec.bounds,
            material: spec.material,
            primitive_count: spec.primitive_count,
            visible: spec.visible,
        }
    }
}

/// Everything the undo stack snapshots.
#[derive(Debug, Clone, Default)]
struct SceneState {
    nodes: SlotMap<NodeKey, NodeData>,
    materials: SlotMap<MaterialKey, Material>,
    selection: Vec<NodeKey>,
}

/// In-memory scene host.
///
/// # Example
///
/// ```rust
/// use scene_graph::{BoundingBox, MemoryScene, NodeSpec, SceneQuery};
///
/// let mut scene = MemoryScene::new("Root");
/// let root = scene.root();
/// let part = scene
///     .add_node(root, NodeSpec::geometry("Part", BoundingBox::from_extents([0.0, 0.0, 0.0, 1.0, 1.0, 1.0]), 12))
///     .unwrap();
/// assert_eq!(scene.children(root).unwrap(), vec![part]);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryScene {
    state: SceneState,
    root: NodeKey,
    history: History<SceneState>,
    calls: Vec<HostCall>,
    staged: HashMap<NodeKey, Vec<NodeSpec>>,
}

impl MemoryScene {
    /// Creates a scene holding a single root container.
    pub fn new(root_name: impl Into<String>) -> Self {
        Self::with_root(NodeSpec::container(root_name))
    }

    /// Creates a scene whose root has the given attributes.
    pub fn with_root(spec: NodeSpec) -> Self {
        let mut state = SceneState::default();
        let root = state.nodes.insert(NodeData::from_spec(spec, None));
        Self {
            state,
            root,
            history: History::default(),
            calls: Vec::new(),
            staged: HashMap::new(),
        }
    }

    // =========================================================================
    // BUILDER API
    // =========================================================================

    /// Appends a node to `parent`.
    pub fn add_node(&mut self, parent: NodeKey, spec: NodeSpec) -> SceneResult<NodeKey> {
        self.node(parent)?;
        if let Some(material) = spec.material {
            self.material_record(material)?;
        }
        tracing::trace!(name = %spec.name, kind = ?spec.kind, "adding scene node");
        let key = self.state.nodes.insert(NodeData::from_spec(spec, Some(parent)));
        self.node_mut(parent)?.children.push(key);
        Ok(key)
    }

    /// Appends a container to `parent`.
    pub fn add_container(&mut self, parent: NodeKey, name: &str) -> SceneResult<NodeKey> {
        self.add_node(parent, NodeSpec::container(name))
    }

    /// Appends a geometry leaf to `parent`.
    pub fn add_geometry(
        &mut self,
        parent: NodeKey,
        name: &str,
        bounds: BoundingBox,
        primitive_count: u64,
    ) -> SceneResult<NodeKey> {
        self.add_node(parent, NodeSpec::geometry(name, bounds, primitive_count))
    }

    /// Registers a material.
    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.state.materials.insert(material)
    }

    /// Queues children that the next [`SceneEdit::tessellate`] call will
    /// attach to `node`.
    pub fn stage_tessellation(&mut self, node: NodeKey, surfaces: Vec<NodeSpec>) {
        self.staged.entry(node).or_default().extend(surfaces);
    }

    // =========================================================================
    // INSPECTION
    // =========================================================================

    /// Returns true if `node` is live.
    pub fn contains(&self, node: NodeKey) -> bool {
        self.state.nodes.contains_key(node)
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.state.nodes.len()
    }

    /// Full material record.
    pub fn material_record(&self, material: MaterialKey) -> SceneResult<&Material> {
        self.state
            .materials
            .get(material)
            .ok_or_else(|| SceneError::unknown_material(material))
    }

    /// Names of `node`'s direct children, in order.
    pub fn child_names(&self, node: NodeKey) -> SceneResult<Vec<String>> {
        let data = self.node(node)?;
        data.children
            .iter()
            .map(|child| Ok(self.node(*child)?.name.clone()))
            .collect()
    }

    pub fn selection(&self) -> &[NodeKey] {
        &self.state.selection
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    // =========================================================================
    // UNDO
    // =========================================================================

    /// Reverts the most recent closed batch, returning its label.
    pub fn undo(&mut self) -> Option<String> {
        let (label, state) = self.history.pop()?;
        self.state = state;
        tracing::debug!(%label, "undo");
        Some(label)
    }

    /// Returns true while a batch is open.
    pub fn in_batch(&self) -> bool {
        self.history.is_open()
    }

    /// Labels of closed batches, oldest first.
    pub fn undo_labels(&self) -> Vec<String> {
        self.history.labels().map(str::to_string).collect()
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn node(&self, key: NodeKey) -> SceneResult<&NodeData> {
        self.state
            .nodes
            .get(key)
            .ok_or_else(|| SceneError::unknown_node(key))
    }

    fn node_mut(&mut self, key: NodeKey) -> SceneResult<&mut NodeData> {
        self.state
            .nodes
            .get_mut(key)
            .ok_or_else(|| SceneError::unknown_node(key))
    }

    fn material_mut(&mut self, key: MaterialKey) -> SceneResult<&mut Material> {
        self.state
            .materials
            .get_mut(key)
            .ok_or_else(|| SceneError::unknown_material(key))
    }

    fn own_and_child_bounds(&self, key: NodeKey) -> SceneResult<Option<BoundingBox>> {
        let data = self.node(key)?;
        let mut bounds = data.bounds;
        for child in &data.children {
            if let Some(child_bounds) = self.own_and_child_bounds(*child)? {
                bounds = Some(match bounds {
                    Some(current) => current.union(&child_bounds),
                    None => child_bounds,
                });
            }
        }
        Ok(bounds)
    }

    fn is_ancestor_of(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        let mut current = Some(node);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = self.state.nodes.get(key).and_then(|data| data.parent);
        }
        false
    }

    fn detach(&mut self, key: NodeKey) -> SceneResult<Option<(NodeKey, usize)>> {
        let Some(parent) = self.node(key)?.parent else {
            return Ok(None);
        };
        let siblings = &mut self.node_mut(parent)?.children;
        let position = siblings.iter().position(|child| *child == key);
        if let Some(index) = position {
            siblings.remove(index);
        }
        self.node_mut(key)?.parent = None;
        Ok(position.map(|index| (parent, index)))
    }

    fn remove_subtree(&mut self, key: NodeKey) {
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(data) = self.state.nodes.remove(current) {
                stack.extend(data.children);
            }
            self.staged.remove(&current);
        }
        let nodes = &self.state.nodes;
        self.state.selection.retain(|selected| nodes.contains_key(*selected));
    }
}

// =============================================================================
// HOST TRAITS
// =============================================================================

impl SceneQuery for MemoryScene {
    type NodeId = NodeKey;
    type MaterialId = MaterialKey;

    fn root(&self) -> NodeKey {
        self.root
    }

    fn children(&self, node: NodeKey) -> SceneResult<Vec<NodeKey>> {
        Ok(self.node(node)?.children.clone())
    }

    fn parent(&self, node: NodeKey) -> SceneResult<Option<NodeKey>> {
        Ok(self.node(node)?.parent)
    }

    fn kind(&self, node: NodeKey) -> SceneResult<NodeKind> {
        Ok(self.node(node)?.kind)
    }

    fn name(&self, node: NodeKey) -> SceneResult<String> {
        Ok(self.node(node)?.name.clone())
    }

    fn bounding_box(&self, node: NodeKey) -> SceneResult<BoundingBox> {
        Ok(self.own_and_child_bounds(node)?.unwrap_or_default())
    }

    fn material(&self, node: NodeKey) -> SceneResult<Option<MaterialKey>> {
        Ok(self.node(node)?.material)
    }

    fn primitive_count(&self, node: NodeKey) -> SceneResult<u64> {
        Ok(self.node(node)?.primitive_count)
    }

    fn child_count(&self, node: NodeKey) -> SceneResult<usize> {
        Ok(self.node(node)?.children.len())
    }

    fn is_visible(&self, node: NodeKey) -> SceneResult<bool> {
        Ok(self.node(node)?.visible)
    }
}

impl SceneEdit for MemoryScene {
    fn create_node(&mut self, kind: NodeKind, name: &str, parent: NodeKey) -> SceneResult<NodeKey> {
        let spec = match kind {
            NodeKind::Container => NodeSpec::container(name),
            NodeKind::Geometry => NodeSpec {
                kind,
                ..NodeSpec::container(name)
            },
        };
        self.add_node(parent, spec)
    }

    fn set_name(&mut self, node: NodeKey, name: &str) -> SceneResult<()> {
        self.node_mut(node)?.name = name.to_string();
        Ok(())
    }

    fn move_node(&mut self, node: NodeKey, from: NodeKey, to: NodeKey) -> SceneResult<()> {
        match self.node(node)?.parent {
            None => return Err(SceneError::detached(node)),
            Some(parent) if parent != from => {
                return Err(SceneError::invalid_move(node, "source is not the current parent"));
            }
            Some(_) => {}
        }
        self.node(to)?;
        if self.is_ancestor_of(node, to) {
            return Err(SceneError::invalid_move(node, "target lies inside the moved subtree"));
        }
        self.detach(node)?;
        self.node_mut(to)?.children.push(node);
        self.node_mut(node)?.parent = Some(to);
        Ok(())
    }

    fn delete_node(&mut self, node: NodeKey, recursive: bool) -> SceneResult<()> {
        if node == self.root {
            return Err(SceneError::Host("the root node cannot be deleted".to_string()));
        }
        let orphans = if recursive {
            Vec::new()
        } else {
            std::mem::take(&mut self.node_mut(node)?.children)
        };
        let slot = self.detach(node)?;
        if let Some((parent, index)) = slot {
            for orphan in &orphans {
                self.node_mut(*orphan)?.parent = Some(parent);
            }
            let siblings = &mut self.node_mut(parent)?.children;
            for (offset, orphan) in orphans.into_iter().enumerate() {
                siblings.insert(index + offset, orphan);
            }
        }
        self.remove_subtree(node);
        Ok(())
    }

    fn apply_material(&mut self, node: NodeKey, material: MaterialKey) -> SceneResult<()> {
        self.material_record(material)?;
        self.node_mut(node)?.material = Some(material);
        Ok(())
    }

    fn select_nodes(&mut self, nodes: &[NodeKey], exclusive: bool) -> SceneResult<()> {
        for node in nodes {
            self.node(*node)?;
        }
        if exclusive {
            self.state.selection.clear();
        }
        for node in nodes {
            if !self.state.selection.contains(node) {
                self.state.selection.push(*node);
            }
        }
        self.calls.push(HostCall::Select(nodes.to_vec(), exclusive));
        Ok(())
    }

    fn flush_transform(&mut self, node: NodeKey) -> SceneResult<()> {
        self.node(node)?;
        self.calls.push(HostCall::FlushTransform(node));
        Ok(())
    }

    fn unshare(&mut self, node: NodeKey) -> SceneResult<()> {
        self.node(node)?;
        self.calls.push(HostCall::Unshare(node));
        Ok(())
    }

    /// Folds direct Geometry children sharing a material into the first of
    /// them.
    fn merge_geometry(&mut self, node: NodeKey) -> SceneResult<()> {
        let children = self.node(node)?.children.clone();
        self.calls.push(HostCall::MergeGeometry(node));
        let mut groups: Vec<(Option<MaterialKey>, Vec<NodeKey>)> = Vec::new();
        for child in children {
            let data = self.node(child)?;
            if !data.kind.is_geometry() {
                continue;
            }
            match groups.iter_mut().find(|(material, _)| *material == data.material) {
                Some((_, members)) => members.push(child),
                None => groups.push((data.material, vec![child])),
            }
        }

        for (_, members) in groups {
            let Some((&survivor, absorbed)) = members.split_first() else {
                continue;
            };
            for &member in absorbed {
                let bounds = self.own_and_child_bounds(member)?;
                let data = self.node(member)?;
                let primitives = data.primitive_count;
                let surfaces = data.children.clone();
                for surface in &surfaces {
                    self.node_mut(*surface)?.parent = Some(survivor);
                }
                let target = self.node_mut(survivor)?;
                target.primitive_count += primitives;
                target.children.extend(surfaces);
                target.bounds = match (target.bounds, bounds) {
                    (Some(a), Some(b)) => Some(a.union(&b)),
                    (a, b) => a.or(b),
                };
                self.node_mut(member)?.children.clear();
                self.detach(member)?;
                self.remove_subtree(member);
            }
        }
        Ok(())
    }

    fn tessellate(&mut self, nodes: &[NodeKey], settings: &TessellationSettings) -> SceneResult<()> {
        for node in nodes {
            self.node(*node)?;
        }
        self.calls.push(HostCall::Tessellate(nodes.to_vec(), *settings));
        for node in nodes {
            if let Some(surfaces) = self.staged.remove(node) {
                for surface in surfaces {
                    self.add_node(*node, surface)?;
                }
            }
        }
        Ok(())
    }
}

impl MaterialLibrary for MemoryScene {
    fn create_material(&mut self, kind: &str) -> SceneResult<MaterialKey> {
        Ok(self.add_material(Material::new(kind, kind)))
    }

    fn find_material(&self, name: &str) -> SceneResult<Option<MaterialKey>> {
        Ok(self
            .state
            .materials
            .iter()
            .find(|(_, material)| material.name == name)
            .map(|(key, _)| key))
    }

    fn materials(&self) -> SceneResult<Vec<MaterialKey>> {
        Ok(self.state.materials.keys().collect())
    }

    fn material_name(&self, material: MaterialKey) -> SceneResult<String> {
        Ok(self.material_record(material)?.name.clone())
    }

    fn set_material_name(&mut self, material: MaterialKey, name: &str) -> SceneResult<()> {
        self.material_mut(material)?.name = name.to_string();
        Ok(())
    }

    fn set_field(&mut self, material: MaterialKey, field: &str, value: FieldValue) -> SceneResult<()> {
        self.material_mut(material)?
            .fields
            .insert(field.to_string(), value);
        Ok(())
    }

    fn tags(&self, material: MaterialKey) -> SceneResult<Vec<String>> {
        Ok(self.material_record(material)?.tags.iter().cloned().collect())
    }

    fn add_tag(&mut self, material: MaterialKey, tag: &str) -> SceneResult<()> {
        self.material_mut(material)?.tags.insert(tag.to_string());
        Ok(())
    }

    fn remove_tag(&mut self, material: MaterialKey, tag: &str) -> SceneResult<()> {
        self.material_mut(material)?.tags.remove(tag);
        Ok(())
    }

    fn users(&self, material: MaterialKey) -> SceneResult<Vec<NodeKey>> {
        self.material_record(material)?;
        let mut users = Vec::new();
        let mut stack = vec![self.root];
        while let Some(key) = stack.pop() {
            let data = self.node(key)?;
            if data.material == Some(material) {
                users.push(key);
            }
            stack.extend(data.children.iter().rev().copied());
        }
        Ok(users)
    }
}

impl UndoService for MemoryScene {
    fn begin_batch(&mut self, label: &str) {
        tracing::debug!(%label, "begin undo batch");
        self.history.begin(label, &self.state);
    }

    fn end_batch(&mut self) {
        self.history.end();
    }
}
