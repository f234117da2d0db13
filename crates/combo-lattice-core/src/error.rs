//! Error types for the document model.

use crate::document::NodeId;

/// Errors that can occur during document operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The node ID is invalid or the node has been removed.
    #[error("invalid or removed node {0:?}")]
    InvalidNode(NodeId),

    /// Attempted to insert a node under itself or one of its descendants.
    #[error("cannot insert {child:?} under its own descendant {parent:?}")]
    HierarchyRequest {
        /// The node that was being inserted.
        child: NodeId,
        /// The would-be parent.
        parent: NodeId,
    },

    /// The operation requires an element but the node is a text node.
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
}

/// Result type for document operations.
pub type DomResult<T> = std::result::Result<T, DomError>;
