//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants.

use crate::constants::*;

// =============================================================================
// THRESHOLD TESTS
// =============================================================================

#[test]
fn test_bounds_tolerance_is_one_unit() {
    assert_eq!(BOUNDS_TOLERANCE, 1.0);
}

#[test]
fn test_cosine_threshold_in_range() {
    assert!(MIN_DIAGONAL_COSINE > 0.0 && MIN_DIAGONAL_COSINE <= 1.0);
}

#[test]
fn test_component_ratio_in_range() {
    assert!(MIN_COMPONENT_RATIO > 0.0 && MIN_COMPONENT_RATIO <= 1.0);
}

#[test]
fn test_size_threshold_is_a_percentage() {
    assert!((0.0..=100.0).contains(&DEFAULT_SIZE_THRESHOLD_PERCENT));
    assert!(DEFAULT_POSITION_THRESHOLD >= 0.0);
}

// =============================================================================
// NAMING TESTS
// =============================================================================

#[test]
fn test_suffix_limit_separates_counters_from_dates() {
    // A yyyymmdd stamp must never be mistaken for a counter
    assert!(COUNTER_SUFFIX_LIMIT < 19_700_101);
    assert!(COUNTER_SUFFIX_LIMIT >= 1_000_000);
}

#[test]
fn test_symmetry_suffix_starts_with_separator() {
    assert!(SYMMETRY_SUFFIX.starts_with('_'));
}

// =============================================================================
// TESSELLATION PRESET TESTS
// =============================================================================

#[test]
fn test_presets_get_finer_with_quality() {
    let ladder = [ROUGH_QUALITY, LOW_QUALITY, MEDIUM_QUALITY, HIGH_QUALITY];
    for pair in ladder.windows(2) {
        assert!(pair[0].chordal_deviation > pair[1].chordal_deviation);
        assert!(pair[0].normal_tolerance > pair[1].normal_tolerance);
        assert!(pair[0].max_chord_length > pair[1].max_chord_length);
    }
}

#[test]
fn test_medium_preset_values() {
    assert_eq!(MEDIUM_QUALITY.chordal_deviation, 0.075);
    assert_eq!(MEDIUM_QUALITY.normal_tolerance, 10.0);
    assert_eq!(MEDIUM_QUALITY.max_chord_length, 200.0);
}

#[test]
fn test_stitching_defaults() {
    assert!(DEFAULT_ENABLE_STITCHING);
    assert!(!DEFAULT_PRESERVE_UVS);
    assert!(DEFAULT_STITCHING_TOLERANCE > 0.0);
}

// =============================================================================
// MATERIAL TESTS
// =============================================================================

#[test]
fn test_marker_is_green() {
    assert_eq!(MARKER_DIFFUSE_COLOR, [0.0, 1.0, 0.0]);
    assert_eq!(MARKER_INCANDESCENCE_COLOR[3], 1.0);
}

#[test]
fn test_texture_components_are_unique() {
    let mut names = TEXTURE_COMPONENTS.to_vec();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), TEXTURE_COMPONENTS.len());
}
