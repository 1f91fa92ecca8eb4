use pgtopo::prelude::*;
use pgtopo::topology::type_map::MAX_UNIQUE_TYPES;
use pgtopo::view::kinds::{BiDirectional, EdgeTypeAwareBiDir, EdgesSortedByDestID};
use pgtopo::{
    CondensedTypeIDMap, EdgeShuffleTopology, EdgeSortKind, EdgeTypeAwareTopology, Node,
    PGViewCache, PropertyGraph, TopologyError, TransposeKind,
};
use std::sync::Arc;

// 0 -> 1, 2 ; 1 -> 2 ; 2 -> 0 ; 3 -> (none)
fn four_node() -> PropertyGraph {
    PropertyGraph::from_edge_list(4, &[(0, 1), (0, 2), (1, 2), (2, 0)])
}

fn edge_pairs<T: Topology>(topo: &T) -> Vec<(Node, Node)> {
    let mut pairs: Vec<_> = topo
        .all_nodes()
        .flat_map(|n| topo.edges(n).map(move |e| (n, topo.edge_dest(e))))
        .collect();
    pairs.sort_unstable();
    pairs
}

#[test]
fn transpose_reverses_the_four_node_graph() {
    let graph = four_node();
    let transposed = EdgeShuffleTopology::make_transpose_copy(graph.topology());
    assert_eq!(edge_pairs(&transposed), vec![(0, 2), (1, 0), (2, 0), (2, 1)]);
}

#[test]
fn sorting_an_already_sorted_node_is_a_no_op() {
    let graph = four_node();
    let sorted = EdgeShuffleTopology::make(&graph, TransposeKind::No, EdgeSortKind::ByDestID);
    assert_eq!(sorted.topology(), graph.topology());
    assert_eq!(sorted.edge_prop_index(), &[0, 1, 2, 3]);

    let e = sorted.find_edge(0, 2).unwrap();
    assert_eq!(sorted.edge_dest(e), 2);
}

#[test]
fn per_type_degrees_add_up() {
    const A: u8 = 0;
    const B: u8 = 1;
    let graph = PropertyGraph::from_edge_list(2, &[(0, 1), (0, 1)])
        .with_edge_types(vec![A, B])
        .unwrap();
    let map = Arc::new(CondensedTypeIDMap::make_from_edge_types(&graph).unwrap());
    let topo = Arc::new(EdgeShuffleTopology::make(
        &graph,
        TransposeKind::No,
        EdgeSortKind::ByEdgeType,
    ));
    let typed = EdgeTypeAwareTopology::make_from(&graph, map, topo);

    assert_eq!(typed.degree_of_type(0, A), 1);
    assert_eq!(typed.degree_of_type(0, B), 1);
    assert_eq!(
        typed.degree_of_type(0, A) + typed.degree_of_type(0, B),
        typed.degree(0)
    );
}

#[test]
fn views_from_one_cache() {
    let graph = four_node();
    let mut cache = PGViewCache::new();

    {
        let bidir = cache.build_view::<BiDirectional, _>(&graph).unwrap();
        assert_eq!(bidir.degree(0), 2);
        assert_eq!(bidir.in_degree(0), 1);
        assert_eq!(bidir.in_degree(3), 0);
    }
    {
        let sorted = cache.build_view::<EdgesSortedByDestID, _>(&graph).unwrap();
        assert!(sorted.has_edge(2, 0));
        assert!(!sorted.has_edge(0, 3));
    }

    assert!(cache.view::<BiDirectional, _>(&graph).is_some());
    assert!(cache.view::<EdgesSortedByDestID, _>(&graph).is_some());
    assert!(cache.view::<EdgeTypeAwareBiDir, _>(&graph).is_none());
}

#[test]
fn too_many_types_is_recoverable() {
    let n = MAX_UNIQUE_TYPES + 1;
    let edges: Vec<(Node, Node)> = (0..n as Node).map(|i| (i, i)).collect();
    let types: Vec<u8> = (0..n).map(|i| i as u8).collect();
    let graph = PropertyGraph::from_edge_list(n, &edges)
        .with_edge_types(types)
        .unwrap();

    let mut cache = PGViewCache::new();
    let err = cache
        .build_or_get_edge_type_aware_topo(&graph, TransposeKind::No)
        .unwrap_err();
    assert!(matches!(err, TopologyError::TooManyTypes { found: 256, .. }));

    // The cache is still usable for views that do not need the type map.
    assert!(cache.build_view::<EdgesSortedByDestID, _>(&graph).is_ok());
}

#[test]
fn blob_round_trip_keeps_views_intact() -> anyhow::Result<()> {
    let graph = four_node();
    let mut blob = Vec::new();
    pgtopo::io::write_topology(graph.topology(), &mut blob)?;
    let restored = PropertyGraph::new(pgtopo::io::read_topology(&blob)?);
    assert!(restored.equals(&graph));

    let mut cache = PGViewCache::new();
    let sorted = cache.build_view::<EdgesSortedByDestID, _>(&restored)?;
    assert_eq!(sorted.find_edges(0, 1), 0..1);
    Ok(())
}
