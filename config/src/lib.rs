//! # Config Crate
//!
//! Centralized configuration constants for the scene reconciliation engine.
//! Every threshold, tolerance, preset and undo label used by the engine is
//! defined here so the algorithms stay free of literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{BOUNDS_TOLERANCE, COUNTER_SUFFIX_LIMIT, MIN_DIAGONAL_COSINE};
//!
//! // A tessellated child may overhang its source box by this much.
//! let overhang = 0.5;
//! assert!(overhang <= BOUNDS_TOLERANCE);
//!
//! // Suffixes above the limit are dates or hashes, not counters.
//! assert!(20240101 > COUNTER_SUFFIX_LIMIT);
//!
//! assert!(MIN_DIAGONAL_COSINE > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Dependency-Free**: Plain Rust, usable from any crate in the workspace
//! - **Validated Overrides**: Runtime overrides go through [`constants::ReconcileConfig::new`]

pub mod constants;

#[cfg(test)]
mod tests;
