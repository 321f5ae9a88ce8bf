//! # Progress Reporting
//!
//! Fraction arithmetic for long-running operations and a few stock
//! [`ProgressSink`] implementations.

use config::constants::PROGRESS_SCALE;
use scene_graph::ProgressSink;

/// Overall completion while merging root `roots_done` (0-based count of
/// roots already finished) after `children_done` of its `child_total`
/// children.
///
/// # Example
///
/// ```rust
/// use scene_reconcile::progress::merge_fraction;
///
/// // second of two roots, half of its children done
/// assert_eq!(merge_fraction(1, 2, 1, 2), 0.75);
/// ```
pub fn merge_fraction(roots_done: usize, root_total: usize, children_done: usize, child_total: usize) -> f64 {
    if root_total == 0 || child_total == 0 {
        return 0.0;
    }
    let root_share = 1.0 / root_total as f64;
    roots_done as f64 * root_share + (children_done as f64 / child_total as f64) * root_share
}

/// Completion after `done` of `total` equal units.
pub fn unit_fraction(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    done as f64 / total as f64
}

/// Scales a fraction to the `0..=100` range a sink expects.
#[inline]
pub fn to_percent(fraction: f64) -> f64 {
    (fraction * PROGRESS_SCALE).clamp(0.0, PROGRESS_SCALE)
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn set_value(&mut self, _value: f64) {}
    fn reset(&mut self) {}
}

/// Sink that keeps every reported value, for tests and batch reports.
#[derive(Debug, Default, Clone)]
pub struct RecordingProgress {
    pub values: Vec<f64>,
    pub resets: usize,
}

impl ProgressSink for RecordingProgress {
    fn set_value(&mut self, value: f64) {
        self.values.push(value);
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

/// Sink that forwards values to `tracing` at debug level.
#[derive(Debug, Clone)]
pub struct TracingProgress {
    label: String,
}

impl TracingProgress {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl ProgressSink for TracingProgress {
    fn set_value(&mut self, value: f64) {
        tracing::debug!(target: "progress", label = %self.label, percent = value, "progress");
    }

    fn reset(&mut self) {
        tracing::trace!(target: "progress", label = %self.label, "progress reset");
    }
}

// =============================================================================
// TESTS
// =============================================================================
