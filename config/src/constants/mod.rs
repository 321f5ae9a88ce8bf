//! Centralized configuration values shared across the reconciliation crates.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// GEOMETRY THRESHOLDS
// =============================================================================

/// Slack, in scene units, a tessellated child may extend past the bounding
/// box of the node it was generated from before it is discarded.
///
/// # Examples
/// ```
/// use config::constants::BOUNDS_TOLERANCE;
/// assert_eq!(BOUNDS_TOLERANCE, 1.0);
/// ```
pub const BOUNDS_TOLERANCE: f64 = 1.0;

/// Minimum cosine similarity between two bounding-box diagonals for the
/// boxes to be considered the same shape.
///
/// # Examples
/// ```
/// use config::constants::MIN_DIAGONAL_COSINE;
/// assert!(MIN_DIAGONAL_COSINE < 1.0);
/// ```
pub const MIN_DIAGONAL_COSINE: f64 = 0.8;

/// Minimum ratio between the smaller and larger child count of two nodes
/// for them to be considered the same part.
///
/// # Examples
/// ```
/// use config::constants::MIN_COMPONENT_RATIO;
/// assert!(MIN_COMPONENT_RATIO > 0.0 && MIN_COMPONENT_RATIO <= 1.0);
/// ```
pub const MIN_COMPONENT_RATIO: f64 = 0.5;

/// Default maximum center distance for material matching.
pub const DEFAULT_POSITION_THRESHOLD: f64 = 0.0;

/// Default minimum size similarity, in percent, for material matching.
pub const DEFAULT_SIZE_THRESHOLD_PERCENT: f64 = 100.0;

// =============================================================================
// NAMING
// =============================================================================

/// Largest trailing `_<n>` suffix still treated as a counter.
///
/// Anything above is assumed to be a date or a hash and is kept as part of
/// the base name.
///
/// # Examples
/// ```
/// use config::constants::COUNTER_SUFFIX_LIMIT;
/// assert!(42 <= COUNTER_SUFFIX_LIMIT);
/// assert!(20240101 > COUNTER_SUFFIX_LIMIT);
/// ```
pub const COUNTER_SUFFIX_LIMIT: u64 = 10_000_000;

/// Suffix appended to a container's name to name its mirrored half.
pub const SYMMETRY_SUFFIX: &str = "_symmetry";

// =============================================================================
// PROGRESS
// =============================================================================

/// Value reported to a progress sink once an operation is complete.
pub const PROGRESS_SCALE: f64 = 100.0;

// =============================================================================
// TESSELLATION
// =============================================================================

/// Fixed tessellation parameter triple selected by a quality level.
///
/// # Examples
/// ```
/// use config::constants::{QualityPreset, HIGH_QUALITY, ROUGH_QUALITY};
/// assert!(HIGH_QUALITY.chordal_deviation < ROUGH_QUALITY.chordal_deviation);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityPreset {
    /// Maximum distance between the surface and its tessellation.
    pub chordal_deviation: f64,
    /// Maximum angle, in degrees, between adjacent face normals.
    pub normal_tolerance: f64,
    /// Maximum edge length of a generated triangle.
    pub max_chord_length: f64,
}

/// Coarsest preset.
pub const ROUGH_QUALITY: QualityPreset = QualityPreset {
    chordal_deviation: 1.0,
    normal_tolerance: 30.0,
    max_chord_length: 400.0,
};

/// Low preset.
pub const LOW_QUALITY: QualityPreset = QualityPreset {
    chordal_deviation: 0.15,
    normal_tolerance: 20.0,
    max_chord_length: 300.0,
};

/// Medium preset, used by default.
pub const MEDIUM_QUALITY: QualityPreset = QualityPreset {
    chordal_deviation: 0.075,
    normal_tolerance: 10.0,
    max_chord_length: 200.0,
};

/// Finest preset.
pub const HIGH_QUALITY: QualityPreset = QualityPreset {
    chordal_deviation: 0.0375,
    normal_tolerance: 7.5,
    max_chord_length: 100.0,
};

/// Whether stitching is enabled when no override is given.
pub const DEFAULT_ENABLE_STITCHING: bool = true;

/// Stitching tolerance used when no override is given.
pub const DEFAULT_STITCHING_TOLERANCE: f64 = 0.10;

/// Whether UVs are preserved when no override is given.
pub const DEFAULT_PRESERVE_UVS: bool = false;

// =============================================================================
// MATERIALS
// =============================================================================

/// Name of the shared marker material assigned to unmatched target leaves.
pub const MARKER_MATERIAL_NAME: &str = "CheckMat";

/// Host material kind used when the marker material has to be created.
pub const MARKER_MATERIAL_KIND: &str = "UPlasticMaterial";

/// Field receiving [`MARKER_DIFFUSE_COLOR`].
pub const MARKER_DIFFUSE_FIELD: &str = "diffuseColor";

/// Field receiving [`MARKER_INCANDESCENCE_COLOR`].
pub const MARKER_INCANDESCENCE_FIELD: &str = "incandescenceColor";

/// Marker diffuse color (pure green).
pub const MARKER_DIFFUSE_COLOR: [f64; 3] = [0.0, 1.0, 0.0];

/// Marker incandescence color (opaque pure green).
pub const MARKER_INCANDESCENCE_COLOR: [f64; 4] = [0.0, 1.0, 0.0, 1.0];

/// Tag placed on materials whose names are missing from a reference list.
pub const UNRENAMED_MATERIAL_TAG: &str = "Unrenamed Material";

/// Texture channels switched off by a texture clear.
///
/// # Examples
/// ```
/// use config::constants::TEXTURE_COMPONENTS;
/// assert!(TEXTURE_COMPONENTS.contains(&"diffuse"));
/// ```
pub const TEXTURE_COMPONENTS: [&str; 15] = [
    "diffuse",
    "glossy",
    "specular",
    "incandescence",
    "bump",
    "transparency",
    "scatter",
    "roughness",
    "displacement",
    "fresnel",
    "rotation",
    "indexOfRefraction",
    "specularBump",
    "metallic",
    "ambientOcclusion",
];

/// Suffix joining a texture channel to its component container field.
pub const TEXTURE_COMPONENT_SUFFIX: &str = "Component";

/// Boolean field toggling texture usage on a component.
pub const USE_TEXTURE_FIELD: &str = "useTexture";

// =============================================================================
// SCENE
// =============================================================================

/// Name of the node holding environment geometry.
pub const ENVIRONMENT_NODE_NAME: &str = "Studio";

// =============================================================================
// UNDO LABELS
// =============================================================================

/// Undo label for reset-mode renaming.
pub const UNDO_RENAME_DEFAULT: &str = "rename_default";
/// Undo label for change-mode renaming.
pub const UNDO_RENAME_CHANGE: &str = "rename_change";
/// Undo label for material matching.
pub const UNDO_MATCH_MATERIAL: &str = "MatchMaterial";
/// Undo label for the material brush.
pub const UNDO_APPLY_MATERIAL: &str = "applyMaterial";
/// Undo label for duplicate removal.
pub const UNDO_REMOVE_DUPLICATES: &str = "remove_duplicates";
/// Undo label for symmetry splitting.
pub const UNDO_SPLIT_SYMMETRY: &str = "split_symmetry";
/// Undo label for tessellation.
pub const UNDO_TESSELLATE: &str = "tessellate_surfaces";
/// Undo label for hierarchical merging.
pub const UNDO_MERGE: &str = "merge_geometry";
/// Undo label for scene cleanup.
pub const UNDO_CLEANUP: &str = "clear_unusable";
/// Undo label for material tagging and renaming.
pub const UNDO_TAG_MATERIALS: &str = "tag_materials";
/// Undo label for clearing the environment node.
pub const UNDO_CLEAR_ENVIRONMENT: &str = "clear_environments";
/// Undo label for disabling material textures.
pub const UNDO_CLEAR_TEXTURES: &str = "clear_textures";

// =============================================================================
// RUNTIME CONFIGURATION
// =============================================================================

/// Immutable snapshot of the tunable thresholds, shared between crates.
///
/// # Examples
/// ```
/// use config::constants::ReconcileConfig;
/// let config = ReconcileConfig::default();
/// assert!(config.bounds_tolerance > 0.0);
/// assert!(config.center_key_epsilon.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconcileConfig {
    /// Containment slack for tessellated children.
    pub bounds_tolerance: f64,
    /// Diagonal cosine a match must reach.
    pub min_cosine: f64,
    /// Child-count ratio a match must reach.
    pub min_component_ratio: f64,
    /// Largest suffix treated as a counter.
    pub counter_suffix_limit: u64,
    /// Bucket size for duplicate detection; `None` compares centers exactly.
    pub center_key_epsilon: Option<f64>,
}

impl ReconcileConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// thresholds.
    ///
    /// # Examples
    /// ```
    /// use config::constants::ReconcileConfig;
    /// let cfg = ReconcileConfig::new(2.0, 0.9, 0.5).expect("valid config");
    /// assert_eq!(cfg.bounds_tolerance, 2.0);
    /// ```
    pub fn new(
        bounds_tolerance: f64,
        min_cosine: f64,
        min_component_ratio: f64,
    ) -> Result<Self, ConfigError> {
        if !(bounds_tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(bounds_tolerance));
        }
        if !(-1.0..=1.0).contains(&min_cosine) {
            return Err(ConfigError::InvalidCosine(min_cosine));
        }
        if !(0.0..=1.0).contains(&min_component_ratio) {
            return Err(ConfigError::InvalidRatio(min_component_ratio));
        }
        Ok(Self {
            bounds_tolerance,
            min_cosine,
            min_component_ratio,
            ..Self::default()
        })
    }

    /// Switches duplicate detection to centers bucketed by `epsilon`.
    ///
    /// # Examples
    /// ```
    /// use config::constants::ReconcileConfig;
    /// let cfg = ReconcileConfig::default().with_center_epsilon(1.0e-6).unwrap();
    /// assert_eq!(cfg.center_key_epsilon, Some(1.0e-6));
    /// ```
    pub fn with_center_epsilon(self, epsilon: f64) -> Result<Self, ConfigError> {
        if !(epsilon > 0.0) || !epsilon.is_finite() {
            return Err(ConfigError::InvalidEpsilon(epsilon));
        }
        Ok(Self {
            center_key_epsilon: Some(epsilon),
            ..self
        })
    }

    /// Overrides the largest suffix treated as a counter.
    pub fn with_counter_suffix_limit(self, limit: u64) -> Self {
        Self {
            counter_suffix_limit: limit,
            ..self
        }
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            bounds_tolerance: BOUNDS_TOLERANCE,
            min_cosine: MIN_DIAGONAL_COSINE,
            min_component_ratio: MIN_COMPONENT_RATIO,
            counter_suffix_limit: COUNTER_SUFFIX_LIMIT,
            center_key_epsilon: None,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when the bounds tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the cosine threshold lies outside `[-1, 1]`.
    InvalidCosine(f64),
    /// Raised when the component ratio lies outside `[0, 1]`.
    InvalidRatio(f64),
    /// Raised when the center bucket size is not a positive finite number.
    InvalidEpsilon(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "bounds_tolerance must be positive: {value}")
            }
            ConfigError::InvalidCosine(value) => {
                write!(f, "min_cosine must lie in [-1, 1]: {value}")
            }
            ConfigError::InvalidRatio(value) => {
                write!(f, "min_component_ratio must lie in [0, 1]: {value}")
            }
            ConfigError::InvalidEpsilon(value) => {
                write!(f, "center_key_epsilon must be positive and finite: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
