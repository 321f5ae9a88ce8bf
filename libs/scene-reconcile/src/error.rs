//! # Reconcile Errors
//!
//! Error types surfaced at the command boundary.
//!
//! ## Error Policy
//!
//! - Component algorithms only propagate host failures ([`SceneError`])
//! - Selection and parameter validation happens in [`crate::commands`]
//! - Degenerate vectors in similarity math resolve to 0 and never error

use config::constants::ConfigError;
use scene_graph::SceneError;
use thiserror::Error;

/// Errors returned by reconciliation commands.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReconcileError {
    /// Host failed to answer a query or apply an edit.
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Runtime configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Command needs at least one selected node.
    #[error("Nothing selected")]
    EmptySelection,

    /// Material matching was started without a reference subtree.
    #[error("No reference node chosen")]
    MissingReference,

    /// Material matching was started without a target subtree.
    #[error("No target node chosen")]
    MissingTarget,

    /// Numeric parameter outside its allowed range.
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
    },
}

impl ReconcileError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter { name, value }
    }
}

/// Result type alias for reconciliation commands.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReconcileError::invalid_parameter("size_threshold_percent", 120.0);
        assert!(err.to_string().contains("size_threshold_percent"));

        let err: ReconcileError = SceneError::Host("boom".to_string()).into();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_config_errors_convert() {
        let err: ReconcileError = ConfigError::InvalidTolerance(0.0).into();
        assert!(matches!(err, ReconcileError::Config(_)));
    }
}
