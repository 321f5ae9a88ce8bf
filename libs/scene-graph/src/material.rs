//! # Materials
//!
//! Material records as seen through the host's material service.

use glam::{DVec3, DVec4};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Value stored in a material field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Bool(bool),
    Scalar(f64),
    Vec3(DVec3),
    Color(DVec4),
}

/// A host material.
///
/// The identifier is the handle the host hands out; this record only
/// carries the attributes the engine reads or writes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Host material type, e.g. `UPlasticMaterial`.
    pub kind: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
    /// Opaque handle to a preview image.
    #[serde(default)]
    pub preview: Option<String>,
}

impl Material {
    /// Creates an untagged material with no fields.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Returns true if the material carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Reads a field.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}
