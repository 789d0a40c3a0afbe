//! Dependency Graph
//!
//! This module implements the graph store: named nodes joined by directed
//! relations, kept acyclic on every insertion.
//!
//! # Overview
//!
//! The graph is a directed acyclic graph (DAG) where:
//!
//! - Nodes carry a caller-chosen id and a display name
//! - A relation `parent -> child` is recorded on both endpoints: the child
//!   id in the parent's `children`, the parent id in the child's `parents`
//!
//! A relation is only inserted after checking that the child is not already
//! an ancestor of the parent, so no node can ever reach itself.
//!
//! # Design Decisions
//!
//! 1. Nodes live in a single arena owned by the store. Adjacency sets hold
//!    ids, never owning pointers, so removing a node is a local map/set edit.
//!
//! 2. The arena is indexed by node ID for O(1) lookups.
//!
//! 3. Both directions are kept so ancestor and descendant walks cost the
//!    same.

mod config;
mod error;
mod node;
mod store;

pub use config::{DagConfig, MemberInsertion};
pub use error::{DagError, DagResult};
pub use node::{Direction, Node, NodeId};
pub use store::{Dag, NodeMap};
