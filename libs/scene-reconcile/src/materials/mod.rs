//! # Material Tools
//!
//! Small material chores: brushing one material onto many nodes, finding
//! the visible users of a material, flagging materials missing from a
//! naming list and switching off texture lookups.

use config::constants::{TEXTURE_COMPONENTS, TEXTURE_COMPONENT_SUFFIX, USE_TEXTURE_FIELD};
use scene_graph::{FieldValue, MaterialLibrary, SceneEdit, SceneQuery, SceneResult};
use std::collections::HashSet;

/// Applies `material` to every node, returning the number of nodes painted.
pub fn apply_material<S>(scene: &mut S, nodes: &[S::NodeId], material: S::MaterialId) -> SceneResult<usize>
where
    S: SceneEdit,
{
    for &node in nodes {
        scene.apply_material(node, material)?;
    }
    tracing::debug!(material = ?material, nodes = nodes.len(), "material applied");
    Ok(nodes.len())
}

/// Visible nodes using `material`.
pub fn visible_users<S>(scene: &S, material: S::MaterialId) -> SceneResult<Vec<S::NodeId>>
where
    S: MaterialLibrary,
{
    let mut visible = Vec::new();
    for node in scene.users(material)? {
        if scene.is_visible(node)? {
            visible.push(node);
        }
    }
    Ok(visible)
}

/// Replaces the selection with the visible users of `node`'s material.
///
/// Returns the selected nodes; a node without material selects nothing.
pub fn select_material_users<S>(scene: &mut S, node: S::NodeId) -> SceneResult<Vec<S::NodeId>>
where
    S: SceneEdit + MaterialLibrary,
{
    let Some(material) = scene.material(node)? else {
        tracing::warn!(node = ?node, "node has no material");
        return Ok(Vec::new());
    };
    let users = visible_users(&*scene, material)?;
    scene.select_nodes(&users, true)?;
    Ok(users)
}

/// Tags every material whose name is not in `known_names`.
///
/// Returns the number of materials tagged.
pub fn tag_unlisted<S, T>(scene: &mut S, known_names: &[T], tag: &str) -> SceneResult<usize>
where
    S: MaterialLibrary,
    T: AsRef<str>,
{
    let known: HashSet<&str> = known_names.iter().map(|name| name.as_ref()).collect();
    let mut tagged = 0;
    for material in scene.materials()? {
        if known.contains(scene.material_name(material)?.as_str()) {
            continue;
        }
        scene.add_tag(material, tag)?;
        tagged += 1;
    }
    tracing::info!(tagged, %tag, "tagged unlisted materials");
    Ok(tagged)
}

/// Renames each material to `new_name` and clears `tag` from it.
pub fn rename_materials<S>(scene: &mut S, materials: &[S::MaterialId], new_name: &str, tag: &str) -> SceneResult<()>
where
    S: MaterialLibrary,
{
    for &material in materials {
        scene.set_material_name(material, new_name)?;
        scene.remove_tag(material, tag)?;
    }
    Ok(())
}

/// Field path of a texture component's `useTexture` switch.
pub fn use_texture_field(component: &str) -> String {
    format!("{component}{TEXTURE_COMPONENT_SUFFIX}.{USE_TEXTURE_FIELD}")
}

/// Turns texture usage off on every component of every material.
///
/// Returns the number of materials touched.
pub fn disable_textures<S>(scene: &mut S) -> SceneResult<usize>
where
    S: MaterialLibrary,
{
    let materials = scene.materials()?;
    for &material in &materials {
        for component in TEXTURE_COMPONENTS {
            scene.set_field(material, &use_texture_field(component), FieldValue::Bool(false))?;
        }
    }
    tracing::info!(materials = materials.len(), "textures disabled");
    Ok(materials.len())
}

#[cfg(test)]
mod tests;
