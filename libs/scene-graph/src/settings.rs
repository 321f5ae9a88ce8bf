//! # Tessellation Settings
//!
//! Parameters handed to the host's tessellation operation, with the four
//! fixed quality presets.

use config::constants::{
    QualityPreset, DEFAULT_ENABLE_STITCHING, DEFAULT_PRESERVE_UVS, DEFAULT_STITCHING_TOLERANCE,
    HIGH_QUALITY, LOW_QUALITY, MEDIUM_QUALITY, ROUGH_QUALITY,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Discrete tessellation quality level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TessellationQuality {
    Rough,
    Low,
    #[default]
    Medium,
    High,
}

impl TessellationQuality {
    /// Parameter triple for this level.
    pub fn preset(self) -> QualityPreset {
        match self {
            TessellationQuality::Rough => ROUGH_QUALITY,
            TessellationQuality::Low => LOW_QUALITY,
            TessellationQuality::Medium => MEDIUM_QUALITY,
            TessellationQuality::High => HIGH_QUALITY,
        }
    }
}

/// Returned when a quality name is not one of the four presets.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown tessellation quality: {0}")]
pub struct UnknownQuality(pub String);

impl FromStr for TessellationQuality {
    type Err = UnknownQuality;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rough" => Ok(TessellationQuality::Rough),
            "low" => Ok(TessellationQuality::Low),
            "medium" => Ok(TessellationQuality::Medium),
            "high" => Ok(TessellationQuality::High),
            _ => Err(UnknownQuality(s.to_string())),
        }
    }
}

/// Full parameter set for a tessellation request.
///
/// # Example
///
/// ```rust
/// use scene_graph::{TessellationQuality, TessellationSettings};
///
/// let settings = TessellationSettings::from_quality(TessellationQuality::High);
/// assert_eq!(settings.max_chord_length, 100.0);
/// assert!(settings.enable_stitching);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TessellationSettings {
    pub chordal_deviation: f64,
    pub normal_tolerance: f64,
    pub max_chord_length: f64,
    pub enable_stitching: bool,
    pub stitching_tolerance: f64,
    pub preserve_uvs: bool,
}

impl TessellationSettings {
    /// Preset triple with default stitching and UV options.
    pub fn from_quality(quality: TessellationQuality) -> Self {
        let preset = quality.preset();
        Self {
            chordal_deviation: preset.chordal_deviation,
            normal_tolerance: preset.normal_tolerance,
            max_chord_length: preset.max_chord_length,
            enable_stitching: DEFAULT_ENABLE_STITCHING,
            stitching_tolerance: DEFAULT_STITCHING_TOLERANCE,
            preserve_uvs: DEFAULT_PRESERVE_UVS,
        }
    }

    /// Name and value of the first parameter that is not a positive real.
    pub fn first_invalid(&self) -> Option<(&'static str, f64)> {
        [
            ("chordal_deviation", self.chordal_deviation),
            ("normal_tolerance", self.normal_tolerance),
            ("max_chord_length", self.max_chord_length),
            ("stitching_tolerance", self.stitching_tolerance),
        ]
        .into_iter()
        .find(|(_, value)| !(value.is_finite() && *value > 0.0))
    }
}

impl Default for TessellationSettings {
    fn default() -> Self {
        Self::from_quality(TessellationQuality::default())
    }
}

// =============================================================================
// TESTS
// =============================================================================
