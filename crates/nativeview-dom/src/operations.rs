//! DOM Node Operations
//!
//! Core node manipulation: appendChild, removeChild, insertBefore.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found (also raised for operations on a null node)
    #[error("Node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Invalid node type for the operation
    #[error("Invalid node type")]
    InvalidNodeType,
    /// Node is not a child of the given parent
    #[error("Node is not a child")]
    NotAChild,
}

/// Node operations trait
pub trait NodeOperations {
    /// Append a child node
    fn append_child(&self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Remove a child node
    fn remove_child(&self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Insert before a reference node
    fn insert_before(&self, parent: NodeId, new_child: NodeId, ref_child: Option<NodeId>) -> DomResult<NodeId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(DomError::NotFound.to_string(), "Node not found");
        assert_eq!(DomError::NotAChild.to_string(), "Node is not a child");
    }
}
