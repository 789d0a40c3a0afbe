//! Graph Store
//!
//! The store owns every node and keeps the graph acyclic. All relations are
//! checked before they are inserted, so the structure is a DAG at every
//! point between calls.
//!
//! # Algorithm
//!
//! A relation `parent -> child` would close a cycle exactly when `child` is
//! already reachable from `parent` by following parent links (or when the
//! two are the same node). The check walks upwards from `parent` with a
//! visited set and stops at the first hit.
//!
//! Ancestor and descendant queries are a breadth-first walk over one
//! adjacency direction. Each node is expanded at most once, so a walk is
//! O(V + E) even on graphs with many converging paths.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use super::config::{DagConfig, MemberInsertion};
use super::error::{DagError, DagResult};
use super::node::{Direction, Node, NodeId};

/// Query result: node snapshots keyed by id.
///
/// The nodes are copies, so holding or mutating a result never touches the
/// store.
pub type NodeMap = IndexMap<NodeId, Node>;

/// An in-memory directed acyclic graph of named nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dag {
    /// All nodes in the graph, indexed by ID.
    nodes: IndexMap<NodeId, Node>,

    config: DagConfig,
}

impl Dag {
    /// Create a new empty graph with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DagConfig::default())
    }

    /// Create a new empty graph with the given configuration.
    pub fn with_config(config: DagConfig) -> Self {
        Self {
            nodes: IndexMap::with_capacity(config.initial_capacity),
            config,
        }
    }

    /// Get the active configuration.
    pub fn config(&self) -> &DagConfig {
        &self.config
    }

    /// Add a node with no relations.
    ///
    /// # Errors
    ///
    /// - [`DagError::InvalidNode`] if `id` or `name` is empty.
    /// - [`DagError::NodeAlreadyExists`] if `id` is taken.
    pub fn add_node(&mut self, id: impl Into<NodeId>, name: impl Into<String>) -> DagResult<()> {
        let node = Node::new(id, name)?;
        if self.nodes.contains_key(node.id()) {
            return Err(DagError::NodeAlreadyExists(node.id().clone()));
        }

        debug!(node = %node.id(), label = node.name(), "added node");
        self.nodes.insert(node.id().clone(), node);
        Ok(())
    }

    /// Get a reference to a node.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Check if a node exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Get the total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of relations in the graph.
    pub fn relation_count(&self) -> usize {
        self.nodes.values().map(|node| node.children().len()).sum()
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the immediate parents of a node.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::NodeNotFound`] if `id` is unknown.
    pub fn get_parents(&self, id: &str) -> DagResult<NodeMap> {
        self.neighbors(id, Direction::Parents)
    }

    /// Get the immediate children of a node.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::NodeNotFound`] if `id` is unknown.
    pub fn get_children(&self, id: &str) -> DagResult<NodeMap> {
        self.neighbors(id, Direction::Children)
    }

    /// Get every node reachable from `id` by following parent links.
    ///
    /// The node itself is not included. A root yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::NodeNotFound`] if `id` is unknown.
    pub fn get_ancestors(&self, id: &str) -> DagResult<NodeMap> {
        self.closure(id, Direction::Parents)
    }

    /// Get every node reachable from `id` by following child links.
    ///
    /// The node itself is not included. A leaf yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::NodeNotFound`] if `id` is unknown.
    pub fn get_descendants(&self, id: &str) -> DagResult<NodeMap> {
        self.closure(id, Direction::Children)
    }

    /// Check if `candidate` is an ancestor of `of`.
    ///
    /// A node is never its own ancestor.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::NodeNotFound`] if either id is unknown.
    pub fn is_ancestor(&self, candidate: &str, of: &str) -> DagResult<bool> {
        let target = self.get(candidate)?;
        let start = self.get(of)?;
        Ok(self.reaches(start, target.id().as_str(), Direction::Parents))
    }

    /// Check if the relation `parent -> child` exists.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::NodeNotFound`] if either id is unknown.
    pub fn has_relation(&self, parent: &str, child: &str) -> DagResult<bool> {
        let parent_node = self.get(parent)?;
        let child_node = self.get(child)?;
        Ok(parent_node.children().contains(child) && child_node.parents().contains(parent))
    }

    /// Add the relation `parent -> child`.
    ///
    /// Adding a relation that already exists is a no-op.
    ///
    /// # Errors
    ///
    /// - [`DagError::NodeNotFound`] if either id is unknown.
    /// - [`DagError::CyclicDependency`] if `child` is `parent` or one of its
    ///   ancestors. The graph is left unchanged.
    pub fn add_relation(&mut self, parent: &str, child: &str) -> DagResult<()> {
        self.link(parent, child).map(|_| ())
    }

    /// Delete the relation `parent -> child`.
    ///
    /// # Errors
    ///
    /// - [`DagError::NodeNotFound`] if either id is unknown.
    /// - [`DagError::RelationNotFound`] if the relation is missing from
    ///   either node's adjacency. The graph is left unchanged.
    pub fn delete_relation(&mut self, parent: &str, child: &str) -> DagResult<()> {
        let parent_node = self.get(parent)?;
        let child_node = self.get(child)?;

        let forward = parent_node.children().contains(child);
        let backward = child_node.parents().contains(parent);
        if !(forward && backward) {
            if forward || backward {
                warn!(
                    parent = %parent_node.id(),
                    child = %child_node.id(),
                    forward,
                    backward,
                    "relation recorded in one direction only"
                );
            }
            return Err(DagError::relation_not_found(parent_node.id(), child_node.id()));
        }

        self.unlink(parent, child);
        debug!(parent, child, "deleted relation");
        Ok(())
    }

    /// Remove a node together with all of its relations.
    ///
    /// Returns the removed node as it was before it was detached.
    ///
    /// # Errors
    ///
    /// Returns [`DagError::NodeNotFound`] if `id` is unknown.
    pub fn remove_node(&mut self, id: &str) -> DagResult<Node> {
        let node = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| DagError::NodeNotFound(NodeId::from(id)))?;

        // Remove this node from its parents' child lists
        for parent_id in node.parents() {
            if let Some(parent) = self.nodes.get_mut(parent_id) {
                parent.remove_child(id);
            }
        }

        // Remove this node from its children's parent lists
        for child_id in node.children() {
            if let Some(child) = self.nodes.get_mut(child_id) {
                child.remove_parent(id);
            }
        }

        debug!(
            node = %node.id(),
            parents = node.parents().len(),
            children = node.children().len(),
            "removed node"
        );
        Ok(node)
    }

    /// Splice an existing node between `parent` and `child` by adding
    /// `parent -> new_id` and then `new_id -> child`.
    ///
    /// The existing `parent -> child` relation, if any, is left in place.
    ///
    /// With [`MemberInsertion::Sequential`] the call is not atomic: if the
    /// second relation is rejected, the first one stays committed. With
    /// [`MemberInsertion::Atomic`] a newly added first relation is removed
    /// again before the error is returned.
    ///
    /// # Errors
    ///
    /// - [`DagError::NodeNotFound`] if any of the three ids is unknown. The
    ///   graph is left unchanged.
    /// - [`DagError::CyclicDependency`] if either relation would close a
    ///   cycle.
    pub fn add_member(&mut self, new_id: &str, parent: &str, child: &str) -> DagResult<()> {
        for id in [parent, child, new_id] {
            self.get(id)?;
        }

        let inserted = self.link(parent, new_id)?;
        if let Err(err) = self.link(new_id, child) {
            if inserted && self.config.member_insertion == MemberInsertion::Atomic {
                self.unlink(parent, new_id);
                debug!(parent, member = new_id, "rolled back partial member insertion");
            }
            return Err(err);
        }

        debug!(member = new_id, parent, child, "added member");
        Ok(())
    }

    fn get(&self, id: &str) -> DagResult<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| DagError::NodeNotFound(NodeId::from(id)))
    }

    /// Insert `parent -> child` after the cycle check. Returns `false` if the
    /// relation already existed.
    fn link(&mut self, parent: &str, child: &str) -> DagResult<bool> {
        let parent_node = self.get(parent)?;
        let child_node = self.get(child)?;
        let parent_id = parent_node.id().clone();
        let child_id = child_node.id().clone();

        if parent_id == child_id || self.reaches(parent_node, child, Direction::Parents) {
            warn!(parent = %parent_id, child = %child_id, "rejected cyclic relation");
            return Err(DagError::cyclic(&parent_id, &child_id));
        }

        if parent_node.children().contains(child) && child_node.parents().contains(parent) {
            trace!(parent, child, "relation already present");
            return Ok(false);
        }

        // Both endpoints exist, so neither insert can be skipped.
        if let Some(node) = self.nodes.get_mut(parent) {
            node.add_child(child_id.clone());
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.add_parent(parent_id.clone());
        }

        debug!(parent = %parent_id, child = %child_id, "added relation");
        Ok(true)
    }

    fn unlink(&mut self, parent: &str, child: &str) {
        if let Some(node) = self.nodes.get_mut(parent) {
            node.remove_child(child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.remove_parent(parent);
        }
    }

    fn neighbors(&self, id: &str, direction: Direction) -> DagResult<NodeMap> {
        let node = self.get(id)?;
        Ok(self.snapshot(node.neighbors(direction)))
    }

    fn closure(&self, id: &str, direction: Direction) -> DagResult<NodeMap> {
        let start = self.get(id)?;
        let found = self.reachable(start, direction);
        trace!(node = %start.id(), ?direction, count = found.len(), "computed closure");
        Ok(self.snapshot(found))
    }

    /// Breadth-first walk from `start`, excluding `start` itself. Ids come
    /// back in discovery order.
    fn reachable<'a>(&'a self, start: &'a Node, direction: Direction) -> IndexSet<&'a NodeId> {
        let mut seen: IndexSet<&NodeId> = IndexSet::new();
        let mut frontier: SmallVec<[&NodeId; 8]> = start.neighbors(direction).iter().collect();

        while !frontier.is_empty() {
            let mut next: SmallVec<[&NodeId; 8]> = SmallVec::new();
            for id in frontier {
                if id == start.id() || !seen.insert(id) {
                    continue;
                }
                if let Some(node) = self.nodes.get(id) {
                    next.extend(node.neighbors(direction).iter());
                }
            }
            frontier = next;
        }

        seen
    }

    /// Depth-first search for `target`, stopping at the first hit.
    fn reaches(&self, start: &Node, target: &str, direction: Direction) -> bool {
        let mut seen: HashSet<&NodeId> = HashSet::new();
        let mut stack: SmallVec<[&NodeId; 16]> = start.neighbors(direction).iter().collect();

        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.neighbors(direction).iter());
            }
        }

        false
    }

    fn snapshot<'a>(&self, ids: impl IntoIterator<Item = &'a NodeId>) -> NodeMap {
        ids.into_iter()
            .filter_map(|id| self.nodes.get(id).map(|node| (id.clone(), node.clone())))
            .collect()
    }
}
