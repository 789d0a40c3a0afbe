//! Error types for graph operations.

use thiserror::Error;

use super::node::NodeId;

/// Errors that can occur when mutating or querying a [`Dag`](super::Dag).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DagError {
    /// A node with the given ID already exists.
    #[error("node already exists: {0}")]
    NodeAlreadyExists(NodeId),

    /// A referenced node does not exist.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// No relation between the two nodes, in at least one direction.
    #[error("relation not present: {parent} -> {child}")]
    RelationNotFound {
        /// The parent end of the missing relation.
        parent: NodeId,
        /// The child end of the missing relation.
        child: NodeId,
    },

    /// Inserting the relation would make a node its own ancestor.
    #[error("cannot create cyclic dependency: {parent} -> {child}")]
    CyclicDependency {
        /// The parent end of the rejected relation.
        parent: NodeId,
        /// The child end of the rejected relation.
        child: NodeId,
    },

    /// A node failed field validation.
    #[error("invalid node: {reason}")]
    InvalidNode {
        /// Which field was rejected.
        reason: &'static str,
    },
}

impl DagError {
    pub(crate) fn relation_not_found(parent: &NodeId, child: &NodeId) -> Self {
        Self::RelationNotFound {
            parent: parent.clone(),
            child: child.clone(),
        }
    }

    pub(crate) fn cyclic(parent: &NodeId, child: &NodeId) -> Self {
        Self::CyclicDependency {
            parent: parent.clone(),
            child: child.clone(),
        }
    }
}

/// Result type for graph operations.
pub type DagResult<T> = Result<T, DagError>;
