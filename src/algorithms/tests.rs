//! Tests for whole-topology transforms.

use super::*;

// 0 -> 2, 1
// 1 -> 2
// 2 -> 2
// 3 -> 0
fn graph() -> GraphTopology {
    GraphTopology::from_edge_list(4, &[(0, 2), (0, 1), (1, 2), (2, 2), (3, 0)])
}

fn neighbours(topo: &GraphTopology, node: Node) -> Vec<Node> {
    topo.edges(node).map(|e| topo.edge_dest(e)).collect()
}

fn sorted(mut v: Vec<Node>) -> Vec<Node> {
    v.sort_unstable();
    v
}

#[test]
fn test_transpose_topology() {
    let t = create_transpose_topology(&graph());
    assert_eq!(t.num_edges(), 5);
    assert_eq!(neighbours(&t, 0), vec![3]);
    assert_eq!(neighbours(&t, 1), vec![0]);
    assert_eq!(sorted(neighbours(&t, 2)), vec![0, 1, 2]);
    assert!(neighbours(&t, 3).is_empty());
}

#[test]
fn test_transpose_twice_restores_edge_sets() {
    let g = graph();
    let tt = create_transpose_topology(&create_transpose_topology(&g));
    for n in g.all_nodes() {
        assert_eq!(sorted(neighbours(&tt, n)), sorted(neighbours(&g, n)));
    }
}

#[test]
fn test_symmetric_topology() {
    let s = create_symmetric_topology(&graph());
    // 5 edges, one self loop: 5 + 4 reversed.
    assert_eq!(s.num_edges(), 9);
    assert_eq!(&neighbours(&s, 0)[..2], &[2, 1]);
    assert_eq!(sorted(neighbours(&s, 0)), vec![1, 2, 3]);
    assert_eq!(sorted(neighbours(&s, 1)), vec![0, 2]);
    assert_eq!(sorted(neighbours(&s, 2)), vec![0, 1, 2]);
    assert_eq!(neighbours(&s, 3), vec![0]);
}

#[test]
fn test_symmetric_of_empty() {
    assert!(create_symmetric_topology(&GraphTopology::default()).is_empty());
}

#[test]
fn test_sort_all_edges_by_dest() {
    let (topo, perm) = sort_all_edges_by_dest(&graph());
    assert_eq!(topo.dests(), &[1, 2, 2, 2, 0]);
    assert_eq!(perm, vec![1, 0, 2, 3, 4]);
}

#[test]
fn test_sort_nodes_by_degree_descending() {
    // degrees: 0 -> 2, 1 -> 1, 2 -> 1, 3 -> 1
    let g = graph();
    let (topo, old_to_new) = sort_nodes_by_degree(&g);
    assert_eq!(old_to_new, vec![0, 1, 2, 3]);
    assert_eq!(topo, g);

    // 0 -> 1
    // 1 ->
    // 2 -> 0, 1, 2
    let g = GraphTopology::from_edge_list(3, &[(0, 1), (2, 0), (2, 1), (2, 2)]);
    let (topo, old_to_new) = sort_nodes_by_degree(&g);
    assert_eq!(old_to_new, vec![1, 2, 0]);
    assert_eq!(neighbours(&topo, 0), vec![1, 2, 0]);
    assert_eq!(neighbours(&topo, 1), vec![2]);
    assert!(neighbours(&topo, 2).is_empty());
}

#[test]
fn test_find_edge_sorted_by_dest() {
    let (topo, _) = sort_all_edges_by_dest(&graph());
    assert_eq!(find_edge_sorted_by_dest(&topo, 0, 2), Some(1));
    assert_eq!(find_edge_sorted_by_dest(&topo, 0, 3), None);

    let edges: Vec<(Node, Node)> = (1..300).map(|d| (0, d)).collect();
    let big = GraphTopology::from_edge_list(300, &edges);
    assert_eq!(find_edge_sorted_by_dest(&big, 0, 150), Some(149));
    assert_eq!(find_edge_sorted_by_dest(&big, 0, 0), None);
}
