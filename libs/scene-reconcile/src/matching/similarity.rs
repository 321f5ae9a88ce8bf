//! Spatial similarity between two geometry leaves.
//!
//! Zero-length vectors and empty boxes never error; the affected score
//! drops to zero instead.

use config::constants::{
    ReconcileConfig, DEFAULT_POSITION_THRESHOLD, DEFAULT_SIZE_THRESHOLD_PERCENT, PROGRESS_SCALE,
};
use glam::DVec3;
use scene_graph::{SceneQuery, SceneResult};

/// What the matcher knows about one leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialSignature {
    pub center: DVec3,
    /// Box diagonal, `max - min`.
    pub diagonal: DVec3,
    /// Direct child count (surface components).
    pub components: usize,
}

impl SpatialSignature {
    pub fn of<S: SceneQuery>(scene: &S, node: S::NodeId) -> SceneResult<Self> {
        let bounds = scene.bounding_box(node)?;
        Ok(Self {
            center: bounds.center(),
            diagonal: bounds.diagonal(),
            components: scene.child_count(node)?,
        })
    }

    /// Length of the diagonal.
    #[inline]
    pub fn size(&self) -> f64 {
        self.diagonal.length()
    }
}

/// Scores of one reference/target pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScores {
    /// Distance between centers.
    pub distance: f64,
    /// Cosine of the angle between diagonals.
    pub cosine: f64,
    /// Smaller diagonal length as a percentage of the larger.
    pub size_ratio_percent: f64,
    /// Smaller component count over the larger.
    pub component_ratio: f64,
}

impl MatchScores {
    pub fn between(reference: &SpatialSignature, target: &SpatialSignature) -> Self {
        Self {
            distance: reference.center.distance(target.center),
            cosine: cosine_similarity(reference.diagonal, target.diagonal),
            size_ratio_percent: size_ratio(reference.size(), target.size()) * PROGRESS_SCALE,
            component_ratio: component_ratio(reference.components, target.components),
        }
    }
}

/// Cosine similarity, 0 when either vector has zero length.
pub fn cosine_similarity(a: DVec3, b: DVec3) -> f64 {
    let denominator = a.length() * b.length();
    if denominator == 0.0 {
        return 0.0;
    }
    a.dot(b) / denominator
}

/// `min / max` of two lengths, 0 when both are zero.
pub fn size_ratio(a: f64, b: f64) -> f64 {
    let largest = a.max(b);
    if largest == 0.0 {
        return 0.0;
    }
    a.min(b) / largest
}

/// `min / max` of two counts; equal counts (both zero included) give 1.
pub fn component_ratio(a: usize, b: usize) -> f64 {
    if a == b {
        return 1.0;
    }
    a.min(b) as f64 / a.max(b) as f64
}

/// Acceptance limits for a match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchThresholds {
    /// Largest accepted center distance.
    pub position: f64,
    /// Smallest accepted size ratio, in percent.
    pub size_percent: f64,
    pub min_cosine: f64,
    pub min_component_ratio: f64,
}

impl MatchThresholds {
    /// User thresholds with the fixed cosine and component limits.
    pub fn new(position: f64, size_percent: f64) -> Self {
        Self::with_config(position, size_percent, &ReconcileConfig::default())
    }

    pub fn with_config(position: f64, size_percent: f64, config: &ReconcileConfig) -> Self {
        Self {
            position,
            size_percent,
            min_cosine: config.min_cosine,
            min_component_ratio: config.min_component_ratio,
        }
    }

    /// Name and value of the first user threshold out of range.
    pub fn first_invalid(&self) -> Option<(&'static str, f64)> {
        if !(self.position.is_finite() && self.position >= 0.0) {
            return Some(("position_threshold", self.position));
        }
        if !(0.0..=PROGRESS_SCALE).contains(&self.size_percent) {
            return Some(("size_threshold_percent", self.size_percent));
        }
        None
    }

    /// True when every score clears its limit.
    pub fn accepts(&self, scores: &MatchScores) -> bool {
        scores.distance <= self.position
            && scores.size_ratio_percent >= self.size_percent
            && scores.cosine >= self.min_cosine
            && scores.component_ratio >= self.min_component_ratio
    }
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self::new(DEFAULT_POSITION_THRESHOLD, DEFAULT_SIZE_THRESHOLD_PERCENT)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn signature(center: [f64; 3], diagonal: [f64; 3], components: usize) -> SpatialSignature {
        SpatialSignature {
            center: DVec3::from_array(center),
            diagonal: DVec3::from_array(diagonal),
            components,
        }
    }

    #[test]
    fn test_identical_leaves_score_perfectly() {
        let a = signature([1.0, 2.0, 3.0], [2.0, 2.0, 1.0], 4);
        let scores = MatchScores::between(&a, &a);
        assert_eq!(scores.distance, 0.0);
        assert_relative_eq!(scores.cosine, 1.0);
        assert_relative_eq!(scores.size_ratio_percent, 100.0);
        assert_eq!(scores.component_ratio, 1.0);
        assert!(MatchThresholds::default().accepts(&scores));
    }

    #[test]
    fn test_degenerate_vectors_score_zero() {
        assert_eq!(cosine_similarity(DVec3::ZERO, DVec3::X), 0.0);
        assert_eq!(size_ratio(0.0, 0.0), 0.0);
        assert_eq!(component_ratio(0, 0), 1.0);
        assert_eq!(component_ratio(0, 3), 0.0);
    }

    #[test]
    fn test_ratios_are_symmetric() {
        assert_relative_eq!(size_ratio(2.0, 4.0), 0.5);
        assert_relative_eq!(size_ratio(4.0, 2.0), 0.5);
        assert_relative_eq!(component_ratio(3, 6), 0.5);
        assert_relative_eq!(component_ratio(6, 3), 0.5);
    }

    #[test]
    fn test_each_limit_can_reject() {
        let thresholds = MatchThresholds::new(1.0, 90.0);
        let base = MatchScores {
            distance: 0.5,
            cosine: 0.9,
            size_ratio_percent: 95.0,
            component_ratio: 0.5,
        };
        assert!(thresholds.accepts(&base));
        assert!(!thresholds.accepts(&MatchScores { distance: 1.01, ..base }));
        assert!(!thresholds.accepts(&MatchScores { cosine: 0.79, ..base }));
        assert!(!thresholds.accepts(&MatchScores { size_ratio_percent: 89.0, ..base }));
        assert!(!thresholds.accepts(&MatchScores { component_ratio: 0.49, ..base }));
    }

    #[test]
    fn test_rotated_box_fails_cosine() {
        let a = signature([0.0, 0.0, 0.0], [10.0, 1.0, 1.0], 1);
        let b = signature([0.0, 0.0, 0.0], [1.0, 10.0, 1.0], 1);
        let scores = MatchScores::between(&a, &b);
        assert_relative_eq!(scores.size_ratio_percent, 100.0);
        assert!(scores.cosine < 0.8);
        assert!(!MatchThresholds::default().accepts(&scores));
    }

    #[test]
    fn test_threshold_validation() {
        assert_eq!(MatchThresholds::new(0.0, 100.0).first_invalid(), None);
        assert_eq!(
            MatchThresholds::new(-1.0, 50.0).first_invalid(),
            Some(("position_threshold", -1.0))
        );
        assert_eq!(
            MatchThresholds::new(1.0, 101.0).first_invalid(),
            Some(("size_threshold_percent", 101.0))
        );
    }
}
