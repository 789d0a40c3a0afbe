//! Integration Tests for the Graph Store
//!
//! These tests drive the public API through the scenarios a caller relies on.

use lineage_core::graph::{Dag, DagConfig, DagError, MemberInsertion, NodeId, NodeMap};
use lineage_core::SharedDag;

// 4    5
//   \ /
//    2    3
//      \ /
//       1
fn diamond() -> Dag {
    let mut dag = Dag::new();
    for id in ["1", "2", "3", "4", "5"] {
        dag.add_node(id, format!("N{id}-name")).unwrap();
    }
    for (parent, child) in [("2", "1"), ("3", "1"), ("4", "2"), ("5", "2")] {
        dag.add_relation(parent, child).unwrap();
    }
    dag
}

fn sorted_ids(map: &NodeMap) -> Vec<String> {
    let mut ids: Vec<String> = map.keys().map(ToString::to_string).collect();
    ids.sort();
    ids
}

/// A reversed relation is rejected and leaves the graph untouched.
#[test]
fn reverse_relation_is_rejected() {
    let mut dag = Dag::new();
    dag.add_node("P", "parent").unwrap();
    dag.add_node("C", "child").unwrap();

    dag.add_relation("P", "C").unwrap();

    let err = dag.add_relation("C", "P").unwrap_err();
    assert!(matches!(err, DagError::CyclicDependency { .. }));
    assert!(dag.get_children("C").unwrap().is_empty());
    assert_eq!(sorted_ids(&dag.get_children("P").unwrap()), vec!["C"]);
}

/// Queries over the diamond graph.
#[test]
fn diamond_queries() {
    let dag = diamond();

    assert_eq!(sorted_ids(&dag.get_ancestors("1").unwrap()), vec!["2", "3", "4", "5"]);
    assert_eq!(sorted_ids(&dag.get_descendants("5").unwrap()), vec!["1", "2"]);
    assert_eq!(sorted_ids(&dag.get_parents("1").unwrap()), vec!["2", "3"]);
    assert_eq!(sorted_ids(&dag.get_children("2").unwrap()), vec!["1"]);
}

/// Snapshots carry names and adjacency of the neighbor nodes.
#[test]
fn snapshots_carry_node_data() {
    let dag = diamond();
    let parents = dag.get_parents("1").unwrap();

    let two = &parents["2"];
    assert_eq!(two.name(), "N2-name");
    assert!(two.children().contains("1"));
    assert_eq!(two.parents().len(), 2);
}

/// Deleting a relation that was never added fails without side effects.
#[test]
fn missing_relation_cannot_be_deleted() {
    let mut dag = diamond();
    let before = dag.clone();

    let err = dag.delete_relation("5", "1").unwrap_err();
    assert_eq!(
        err,
        DagError::RelationNotFound {
            parent: NodeId::from("5"),
            child: NodeId::from("1"),
        }
    );
    assert_eq!(dag, before);
}

/// A duplicate id does not overwrite the existing node.
#[test]
fn duplicate_node_keeps_original() {
    let mut dag = Dag::new();
    dag.add_node("X", "n").unwrap();

    let err = dag.add_node("X", "n2").unwrap_err();
    assert_eq!(err, DagError::NodeAlreadyExists(NodeId::from("X")));
    assert_eq!(dag.node("X").unwrap().name(), "n");
    assert_eq!(dag.node_count(), 1);
}

/// Removing an inner node detaches it from both sides.
#[test]
fn removing_inner_node() {
    let mut dag = diamond();

    dag.remove_node("2").unwrap();

    assert_eq!(sorted_ids(&dag.get_parents("1").unwrap()), vec!["3"]);
    assert!(dag.get_children("4").unwrap().is_empty());
    assert!(dag.get_children("5").unwrap().is_empty());
    assert!(dag.get_ancestors("1").unwrap().keys().all(|id| id != "2"));
}

/// Isolated nodes have empty, not missing, closures.
#[test]
fn isolated_node_has_empty_closures() {
    let mut dag = Dag::new();
    dag.add_node("alone", "Alone").unwrap();

    assert!(dag.get_ancestors("alone").unwrap().is_empty());
    assert!(dag.get_descendants("alone").unwrap().is_empty());
}

/// Every operation reports the unknown id it was given.
#[test]
fn unknown_ids_are_reported() {
    let mut dag = diamond();
    let missing = DagError::NodeNotFound(NodeId::from("9"));

    assert_eq!(dag.get_parents("9").unwrap_err(), missing);
    assert_eq!(dag.get_children("9").unwrap_err(), missing);
    assert_eq!(dag.get_ancestors("9").unwrap_err(), missing);
    assert_eq!(dag.get_descendants("9").unwrap_err(), missing);
    assert_eq!(dag.add_relation("1", "9").unwrap_err(), missing);
    assert_eq!(dag.delete_relation("9", "1").unwrap_err(), missing);
    assert_eq!(dag.remove_node("9").unwrap_err(), missing);
    assert_eq!(dag.add_member("9", "4", "2").unwrap_err(), missing);
}

/// A shortcut along existing paths is allowed; closing a loop is not,
/// however far apart the endpoints are.
#[test]
fn cycle_check_covers_both_directions() {
    let mut dag = diamond();

    // 4 is already an ancestor of 1, adding the direct edge is fine.
    dag.add_relation("4", "1").unwrap();
    assert!(dag.has_relation("4", "1").unwrap());

    // 1 -> 4 and 1 -> 5 would both loop back through 2.
    assert!(dag.add_relation("1", "4").is_err());
    assert!(dag.add_relation("1", "5").is_err());
    // 3 and 2 are siblings, either direction is acceptable.
    dag.add_relation("3", "2").unwrap();
    assert!(dag.add_relation("2", "3").is_err());
}

/// The two member policies differ only when the second relation fails.
#[test]
fn member_insertion_policies() {
    let build = |policy| {
        let mut dag = Dag::with_config(DagConfig::new().with_member_insertion(policy));
        for id in ["top", "bottom", "mid"] {
            dag.add_node(id, id).unwrap();
        }
        dag.add_relation("top", "bottom").unwrap();
        dag
    };

    let mut sequential = build(MemberInsertion::Sequential);
    assert!(sequential.add_member("mid", "bottom", "top").is_err());
    assert!(sequential.has_relation("bottom", "mid").unwrap());

    let mut atomic = build(MemberInsertion::Atomic);
    assert!(atomic.add_member("mid", "bottom", "top").is_err());
    assert!(!atomic.has_relation("bottom", "mid").unwrap());

    // The happy path is the same for both.
    let mut dag = build(MemberInsertion::Atomic);
    dag.add_member("mid", "top", "bottom").unwrap();
    assert_eq!(sorted_ids(&dag.get_descendants("top").unwrap()), vec!["bottom", "mid"]);
}

/// A shared handle exposes the same store to every clone.
#[test]
fn shared_handle_round_trip() {
    let shared = SharedDag::from(diamond());
    let reader = shared.clone();

    shared.write(|dag| dag.remove_node("3")).unwrap();

    let parents = reader.read(|dag| dag.get_parents("1")).unwrap();
    assert_eq!(sorted_ids(&parents), vec!["2"]);
}
