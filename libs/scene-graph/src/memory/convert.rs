//! Conversion between [`MemoryScene`] and [`SceneDocument`].

use super::{MaterialKey, MemoryScene, NodeKey, NodeSpec};
use crate::bounds::BoundingBox;
use crate::document::{NodeDocument, SceneDocument};
use crate::error::{SceneError, SceneResult};
use std::collections::HashMap;

impl MemoryScene {
    /// Builds a scene from a document.
    ///
    /// Material names must be unique and every node's material must name
    /// one of them.
    pub fn from_document(document: &SceneDocument) -> SceneResult<Self> {
        let mut by_name: HashMap<&str, MaterialKey> = HashMap::new();
        let mut scene = MemoryScene::new(document.root.name.as_str());
        for material in &document.materials {
            if by_name.contains_key(material.name.as_str()) {
                return Err(SceneError::InvalidDocument(format!(
                    "duplicate material name '{}'",
                    material.name
                )));
            }
            let key = scene.add_material(material.clone());
            by_name.insert(material.name.as_str(), key);
        }

        let root = scene.root;
        let root_spec = node_spec(&document.root, &by_name)?;
        let root_data = scene.node_mut(root)?;
        root_data.kind = root_spec.kind;
        root_data.bounds = root_spec.bounds;
        root_data.primitive_count = root_spec.primitive_count;
        root_data.material = root_spec.material;
        root_data.visible = root_spec.visible;

        for child in &document.root.children {
            scene.add_document(root, child, &by_name)?;
        }
        Ok(scene)
    }

    /// Snapshots the scene, keeping each node's own bounds only.
    pub fn to_document(&self) -> SceneResult<SceneDocument> {
        let materials = self
            .state
            .materials
            .values()
            .cloned()
            .collect::<Vec<_>>();
        Ok(SceneDocument {
            materials,
            root: self.node_document(self.root)?,
        })
    }

    fn add_document(
        &mut self,
        parent: NodeKey,
        document: &NodeDocument,
        materials: &HashMap<&str, MaterialKey>,
    ) -> SceneResult<()> {
        let key = self.add_node(parent, node_spec(document, materials)?)?;
        for child in &document.children {
            self.add_document(key, child, materials)?;
        }
        Ok(())
    }

    fn node_document(&self, key: NodeKey) -> SceneResult<NodeDocument> {
        let data = self.node(key)?;
        let material = match data.material {
            Some(material) => Some(self.material_record(material)?.name.clone()),
            None => None,
        };
        let children = data
            .children
            .iter()
            .map(|child| self.node_document(*child))
            .collect::<SceneResult<Vec<_>>>()?;
        Ok(NodeDocument {
            name: data.name.clone(),
            kind: data.kind,
            bounds: data.bounds.map(|bounds| bounds.extents()),
            primitives: data.primitive_count,
            material,
            visible: data.visible,
            children,
        })
    }
}

fn node_spec(
    document: &NodeDocument,
    materials: &HashMap<&str, MaterialKey>,
) -> SceneResult<NodeSpec> {
    let material = match &document.material {
        Some(name) => Some(*materials.get(name.as_str()).ok_or_else(|| {
            SceneError::InvalidDocument(format!(
                "node '{}' uses unknown material '{name}'",
                document.name
            ))
        })?),
        None => None,
    };
    Ok(NodeSpec {
        name: document.name.clone(),
        kind: document.kind,
        bounds: document.bounds.map(BoundingBox::from_extents),
        primitive_count: document.primitives,
        material,
        visible: document.visible,
    })
}
