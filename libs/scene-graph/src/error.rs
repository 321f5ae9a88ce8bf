//! # Scene Errors
//!
//! Error types for host scene operations.

use thiserror::Error;

/// Errors a host can report while answering queries or applying edits.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// Handle does not refer to a live node.
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// Handle does not refer to a live material.
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    /// Operation needs a parent but the node is the root or detached.
    #[error("Node has no parent: {0}")]
    Detached(String),

    /// Move would leave the tree cyclic or name the wrong source parent.
    #[error("Invalid move of {node}: {message}")]
    InvalidMove { node: String, message: String },

    /// Scene document could not be turned into a scene.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Any other failure raised by the host application.
    #[error("Host failure: {0}")]
    Host(String),
}

impl SceneError {
    /// Creates an unknown node error from any debuggable handle.
    pub fn unknown_node(node: impl std::fmt::Debug) -> Self {
        Self::UnknownNode(format!("{node:?}"))
    }

    /// Creates an unknown material error from any debuggable handle.
    pub fn unknown_material(material: impl std::fmt::Debug) -> Self {
        Self::UnknownMaterial(format!("{material:?}"))
    }

    /// Creates a detached node error.
    pub fn detached(node: impl std::fmt::Debug) -> Self {
        Self::Detached(format!("{node:?}"))
    }

    /// Creates an invalid move error.
    pub fn invalid_move(node: impl std::fmt::Debug, message: impl Into<String>) -> Self {
        Self::InvalidMove {
            node: format!("{node:?}"),
            message: message.into(),
        }
    }
}

/// Result type alias for host operations.
pub type SceneResult<T> = Result<T, SceneError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SceneError::invalid_move(7u32, "target is a descendant");
        assert!(err.to_string().contains("Invalid move of 7"));
        assert!(err.to_string().contains("descendant"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SceneError>();
    }
}
