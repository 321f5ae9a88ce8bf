//! # Bounding Boxes
//!
//! Axis-aligned extents of scene nodes and the spatial signatures derived
//! from them.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in scene units.
///
/// # Example
///
/// ```rust
/// use scene_graph::BoundingBox;
///
/// let bbox = BoundingBox::from_extents([0.0, 0.0, 0.0, 2.0, 4.0, 6.0]);
/// assert_eq!(bbox.center().y, 2.0);
/// assert_eq!(bbox.diagonal().z, 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl BoundingBox {
    /// Creates a box from two corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Creates a box from host extents `[xmin, ymin, zmin, xmax, ymax, zmax]`.
    pub fn from_extents(extents: [f64; 6]) -> Self {
        Self {
            min: DVec3::new(extents[0], extents[1], extents[2]),
            max: DVec3::new(extents[3], extents[4], extents[5]),
        }
    }

    /// Creates a box of the given size centered on `center`.
    pub fn from_center_size(center: DVec3, size: DVec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Returns the host extents `[xmin, ymin, zmin, xmax, ymax, zmax]`.
    pub fn extents(&self) -> [f64; 6] {
        [
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z,
        ]
    }

    /// Box midpoint.
    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Vector from the minimum to the maximum corner.
    #[inline]
    pub fn diagonal(&self) -> DVec3 {
        self.max - self.min
    }

    /// Euclidean length of the diagonal.
    #[inline]
    pub fn size(&self) -> f64 {
        self.diagonal().length()
    }

    /// Smallest box enclosing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Box grown by `amount` on every side.
    pub fn expanded(&self, amount: f64) -> BoundingBox {
        BoundingBox {
            min: self.min - DVec3::splat(amount),
            max: self.max + DVec3::splat(amount),
        }
    }

    /// The six containment checks of `other` against this box grown by
    /// `tolerance`: three min-side checks followed by three max-side checks.
    pub fn containment_checks(&self, other: &BoundingBox, tolerance: f64) -> [bool; 6] {
        let envelope = self.expanded(tolerance);
        [
            envelope.min.x <= other.min.x,
            envelope.min.y <= other.min.y,
            envelope.min.z <= other.min.z,
            envelope.max.x >= other.max.x,
            envelope.max.y >= other.max.y,
            envelope.max.z >= other.max.z,
        ]
    }

    /// True when all six containment checks hold.
    pub fn contains_within(&self, other: &BoundingBox, tolerance: f64) -> bool {
        self.containment_checks(other, tolerance)
            .iter()
            .all(|inside| *inside)
    }
}

impl From<[f64; 6]> for BoundingBox {
    fn from(extents: [f64; 6]) -> Self {
        Self::from_extents(extents)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_extents_round_trip() {
        let extents = [-1.0, -2.0, -3.0, 4.0, 5.0, 6.0];
        assert_eq!(BoundingBox::from_extents(extents).extents(), extents);
    }

    #[test]
    fn test_center_and_size() {
        let bbox = BoundingBox::from_extents([0.0, 0.0, 0.0, 3.0, 4.0, 0.0]);
        assert_eq!(bbox.center(), DVec3::new(1.5, 2.0, 0.0));
        assert_relative_eq!(bbox.size(), 5.0);
    }

    #[test]
    fn test_union_covers_both() {
        let a = BoundingBox::from_extents([0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let b = BoundingBox::from_extents([-2.0, 0.5, 0.5, 0.5, 3.0, 0.7]);
        let u = a.union(&b);
        assert_eq!(u.extents(), [-2.0, 0.0, 0.0, 1.0, 3.0, 1.0]);
    }

    #[test]
    fn test_containment_within_tolerance() {
        let source = BoundingBox::from_extents([0.0, 0.0, 0.0, 10.0, 10.0, 10.0]);
        let inside = BoundingBox::from_extents([-1.0, -0.5, 0.0, 11.0, 10.0, 10.5]);
        assert!(source.contains_within(&inside, 1.0));
    }

    #[test]
    fn test_single_component_escape_is_detected() {
        let source = BoundingBox::from_extents([0.0, 0.0, 0.0, 10.0, 10.0, 10.0]);
        let escaped = BoundingBox::from_extents([0.0, 0.0, 0.0, 10.0, 10.0, 11.5]);
        let checks = source.containment_checks(&escaped, 1.0);
        assert_eq!(checks, [true, true, true, true, true, false]);
        assert!(!source.contains_within(&escaped, 1.0));
    }

    #[test]
    fn test_from_center_size() {
        let bbox = BoundingBox::from_center_size(DVec3::new(0.0, 5.0, 0.0), DVec3::splat(2.0));
        assert_eq!(bbox.extents(), [-1.0, 4.0, -1.0, 1.0, 6.0, 1.0]);
    }
}
