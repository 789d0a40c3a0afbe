//! Lineage Core
//!
//! This crate provides an in-memory directed acyclic graph of named nodes.
//! It implements:
//!
//! - Node storage keyed by caller-defined ids
//! - Parent/child relations, cycle-checked on every insertion
//! - Relation and node removal that never leaves dangling references
//! - Parent, child, ancestor and descendant queries
//!
//! The crate owns no persistence, networking or presentation. It is meant
//! to be embedded wherever dependency tracking is needed: task graphs,
//! build orders, hierarchy validation.
//!
//! # Architecture
//!
//! - `graph`: the node arena, the store operations and their errors
//! - `sync`: a single-lock handle for sharing one store between threads
//!
//! # Example
//!
//! ```rust
//! use lineage_core::graph::{Dag, DagError};
//!
//! let mut dag = Dag::new();
//! dag.add_node("build", "Build")?;
//! dag.add_node("test", "Test")?;
//! dag.add_relation("build", "test")?;
//!
//! // test now depends on build, so the reverse would be a cycle
//! assert!(matches!(
//!     dag.add_relation("test", "build"),
//!     Err(DagError::CyclicDependency { .. })
//! ));
//! assert!(dag.get_ancestors("test")?.contains_key("build"));
//! # Ok::<(), DagError>(())
//! ```

pub mod graph;
pub mod sync;

pub use graph::{Dag, DagConfig, DagError, DagResult, MemberInsertion, Node, NodeId, NodeMap};
pub use sync::SharedDag;
