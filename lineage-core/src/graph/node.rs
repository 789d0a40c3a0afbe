//! Graph Nodes
//!
//! This module defines the node type that lives in the graph store.
//!
//! A node never owns its neighbors. Both adjacency sets hold ids that are
//! resolved through the store, so an edge is visible from both endpoints
//! without any shared ownership between nodes.

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexSet;

use super::error::{DagError, DagResult};

/// Unique identifier for a node in the graph.
///
/// Ids are caller-defined text. The only constraint is that they are
/// non-empty, which is checked when a [`Node`] is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Create an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the id is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Which adjacency set a walk follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow incoming edges, towards ancestors.
    Parents,

    /// Follow outgoing edges, towards descendants.
    Children,
}

/// A node in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Unique identifier for this node.
    id: NodeId,

    /// Display label.
    name: String,

    /// Nodes this node is a child of (sources of incoming edges).
    parents: IndexSet<NodeId>,

    /// Nodes this node is a parent of (targets of outgoing edges).
    children: IndexSet<NodeId>,
}

impl Node {
    /// Create a new node with empty adjacency.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::InvalidNode`] if `id` or `name` is empty.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> DagResult<Self> {
        let node = Self {
            id: id.into(),
            name: name.into(),
            parents: IndexSet::new(),
            children: IndexSet::new(),
        };
        node.validate()?;
        Ok(node)
    }

    fn validate(&self) -> DagResult<()> {
        if self.id.is_empty() {
            return Err(DagError::InvalidNode {
                reason: "id must not be empty",
            });
        }
        if self.name.is_empty() {
            return Err(DagError::InvalidNode {
                reason: "name must not be empty",
            });
        }
        Ok(())
    }

    /// Get the node's ID.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Get the node's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the ids of all immediate parents.
    pub fn parents(&self) -> &IndexSet<NodeId> {
        &self.parents
    }

    /// Get the ids of all immediate children.
    pub fn children(&self) -> &IndexSet<NodeId> {
        &self.children
    }

    /// Get the immediate neighbors in the given direction.
    pub fn neighbors(&self, direction: Direction) -> &IndexSet<NodeId> {
        match direction {
            Direction::Parents => &self.parents,
            Direction::Children => &self.children,
        }
    }

    /// Check if the node has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Check if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Record `node_id` as a parent. Returns `true` if it was not present.
    pub(crate) fn add_parent(&mut self, node_id: NodeId) -> bool {
        self.parents.insert(node_id)
    }

    /// Forget a parent. Returns `true` if it was present.
    pub(crate) fn remove_parent(&mut self, node_id: &str) -> bool {
        self.parents.shift_remove(node_id)
    }

    /// Record `node_id` as a child. Returns `true` if it was not present.
    pub(crate) fn add_child(&mut self, node_id: NodeId) -> bool {
        self.children.insert(node_id)
    }

    /// Forget a child. Returns `true` if it was present.
    pub(crate) fn remove_child(&mut self, node_id: &str) -> bool {
        self.children.shift_remove(node_id)
    }
}
