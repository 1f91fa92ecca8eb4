//! Tests for the base CSR topology.

use super::*;

// 0 -> 1, 2
// 1 -> 2
// 2 ->
// 3 -> 0
fn four_node() -> GraphTopology {
    GraphTopology::new(vec![2, 3, 3, 4], vec![1, 2, 2, 0])
}

#[test]
fn test_edge_ranges_follow_end_offsets() {
    let topo = four_node();
    assert_eq!(topo.num_nodes(), 4);
    assert_eq!(topo.num_edges(), 4);
    assert_eq!(topo.edges(0), 0..2);
    assert_eq!(topo.edges(1), 2..3);
    assert_eq!(topo.edges(2), 3..3);
    assert_eq!(topo.edges(3), 3..4);
    assert_eq!(topo.degree(2), 0);
    assert_eq!(topo.edge_dest(3), 0);
    assert_eq!(topo.all_nodes(), 0..4);
    assert_eq!(topo.all_edges(), 0..4);
}

#[test]
fn test_empty_topology() {
    let topo = GraphTopology::default();
    assert!(topo.is_empty());
    assert_eq!(topo.num_edges(), 0);
    assert_eq!(topo.all_nodes().count(), 0);
    assert!(topo.check().is_ok());
    assert_eq!(topo.to_string(), "");
}

#[test]
fn test_nodes_without_edges() {
    let topo = GraphTopology::new(vec![0, 0, 0], vec![]);
    assert!(!topo.is_empty());
    assert_eq!(topo.num_edges(), 0);
    assert!(topo.all_nodes().all(|n| topo.degree(n) == 0));
}

#[test]
fn test_from_edge_list_keeps_input_order() {
    let topo = GraphTopology::from_edge_list(4, &[(0, 2), (3, 0), (0, 1), (1, 2)]);
    assert_eq!(topo.adj_ends(), &[2, 3, 3, 4]);
    assert_eq!(topo.dests(), &[2, 1, 2, 0]);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_from_edge_list_rejects_unknown_node() {
    let _ = GraphTopology::from_edge_list(2, &[(0, 5)]);
}

#[test]
fn test_check_reports_decreasing_ends() {
    let topo = GraphTopology {
        adj_ends: vec![2, 1, 2],
        dests: vec![0, 0],
    };
    let err = topo.check().unwrap_err();
    assert!(matches!(err, TopologyError::Malformed(_)));
    assert!(err.to_string().contains("node 0"));
}

#[test]
fn test_check_reports_edge_count_mismatch() {
    let topo = GraphTopology {
        adj_ends: vec![1, 2],
        dests: vec![0, 1, 1],
    };
    assert!(matches!(topo.check(), Err(TopologyError::Malformed(_))));
}

#[test]
fn test_check_reports_dangling_destination() {
    let topo = GraphTopology {
        adj_ends: vec![1],
        dests: vec![3],
    };
    let err = topo.check().unwrap_err();
    assert!(err.to_string().contains("points to node 3"));
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "malformed topology")]
fn test_new_validates_in_debug_builds() {
    let _ = GraphTopology::new(vec![1], vec![1]);
}

#[test]
fn test_copy_and_equals() {
    let topo = four_node();
    let copy = topo.copy();
    assert!(topo.equals(&copy));
    assert_eq!(topo, GraphTopology::from_raw(topo.adj_ends(), topo.dests()));

    let other = GraphTopology::new(vec![2, 3, 3, 4], vec![1, 2, 2, 1]);
    assert!(!topo.equals(&other));
}

#[test]
fn test_dest_equal_range() {
    // 0 -> 1, 3, 3, 3, 5
    let topo = GraphTopology::new(vec![5, 5, 5, 5, 5, 5], vec![1, 3, 3, 3, 5]);
    let all = topo.edges(0);
    assert_eq!(topo.dest_equal_range(all.clone(), 3), 1..4);
    assert_eq!(topo.dest_equal_range(all.clone(), 1), 0..1);
    assert_eq!(topo.dest_equal_range(all.clone(), 5), 4..5);
    assert_eq!(topo.dest_equal_range(all.clone(), 2), 5..5);
    assert_eq!(topo.dest_equal_range(all, 4), 5..5);
    assert!(topo.dest_equal_range(topo.edges(1), 1).is_empty());
}

#[test]
fn test_display_lists_adjacency() {
    let text = four_node().to_string();
    assert_eq!(text, "node 0: [1, 2]\nnode 1: [2]\nnode 2: []\nnode 3: [0]\n");
}

#[test]
fn test_topology_trait_forwards() {
    fn total_degree<T: Topology>(t: &T) -> usize {
        t.all_nodes().map(|n| t.degree(n)).sum()
    }
    let topo = four_node();
    assert_eq!(total_degree(&topo), 4);
    assert_eq!(Topology::edge_property_index(&topo, 3), 3);
    assert_eq!(Topology::node_property_index(&topo, 2), 2);
}
