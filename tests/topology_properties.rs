use pgtopo::prelude::*;
use pgtopo::view::kinds::{EdgeTypeAwareBiDir, NodesSortedByDegreeEdgesSortedByDestID};
use pgtopo::{
    algorithms, CondensedTypeIDMap, EdgeShuffleTopology, EdgeSortKind, EdgeTypeAwareTopology,
    Node, NodeSortKind, PGViewCache, PropertyGraph, PropertyIndex, ShuffleTopology, TransposeKind,
};
use proptest::prelude::*;
use std::sync::Arc;

/// Random multigraphs (self loops and parallel edges included) with up to
/// five edge types. Edges are generated source-major so that the type column
/// lines up with edge ids.
fn arb_graph() -> impl Strategy<Value = PropertyGraph> {
    (1usize..40).prop_flat_map(|n| {
        let edge = (0..n as Node, 0..n as Node, 0u8..5);
        proptest::collection::vec(edge, 0..200).prop_map(move |mut edges| {
            edges.sort_by_key(|&(src, _, _)| src);
            let pairs: Vec<(Node, Node)> = edges.iter().map(|&(s, d, _)| (s, d)).collect();
            let types = edges.iter().map(|&(_, _, t)| t).collect();
            PropertyGraph::from_edge_list(n, &pairs)
                .with_edge_types(types)
                .unwrap()
        })
    })
}

/// `(original src, original dst, original edge id)` of every edge.
fn original_triples<T: Topology>(topo: &T, transposed: bool) -> Vec<(u64, u64, u64)> {
    let mut out: Vec<_> = topo
        .all_nodes()
        .flat_map(|n| {
            topo.edges(n).map(move |e| {
                let a = topo.node_property_index(n);
                let b = topo.node_property_index(topo.edge_dest(e));
                let (src, dst) = if transposed { (b, a) } else { (a, b) };
                (src, dst, topo.edge_property_index(e))
            })
        })
        .collect();
    out.sort_unstable();
    out
}

fn is_permutation(values: &[PropertyIndex]) -> bool {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted.iter().enumerate().all(|(i, &v)| v == i as PropertyIndex)
}

proptest! {
    #[test]
    fn csr_is_well_formed(graph in arb_graph()) {
        let topo = graph.topology();
        prop_assert!(topo.check().is_ok());
        let total: usize = topo.all_nodes().map(|n| topo.degree(n)).sum();
        prop_assert_eq!(total, topo.num_edges());
    }

    #[test]
    fn transpose_preserves_edges(graph in arb_graph()) {
        let base = original_triples(graph.topology(), false);
        let transposed = EdgeShuffleTopology::make_transpose_copy(graph.topology());
        prop_assert!(transposed.topology().check().is_ok());
        prop_assert!(is_permutation(transposed.edge_prop_index()));
        prop_assert_eq!(original_triples(&transposed, true), base);
    }

    #[test]
    fn transpose_twice_restores_adjacency(graph in arb_graph()) {
        let topo = graph.topology();
        let once = algorithms::create_transpose_topology(topo);
        let twice = algorithms::create_transpose_topology(&once);
        prop_assert_eq!(twice.adj_ends(), topo.adj_ends());
        for n in topo.all_nodes() {
            let mut a: Vec<Node> = topo.edges(n).map(|e| topo.edge_dest(e)).collect();
            let mut b: Vec<Node> = twice.edges(n).map(|e| twice.edge_dest(e)).collect();
            a.sort_unstable();
            b.sort_unstable();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn dest_sort_agrees_with_linear_search(graph in arb_graph(), transposed in any::<bool>()) {
        let transpose = if transposed { TransposeKind::Yes } else { TransposeKind::No };
        let sorted = EdgeShuffleTopology::make(&graph, transpose, EdgeSortKind::ByDestID);
        let n = sorted.num_nodes() as Node;
        for src in 0..n {
            let dests: Vec<Node> = sorted.edges(src).map(|e| sorted.edge_dest(e)).collect();
            prop_assert!(dests.windows(2).all(|w| w[0] <= w[1]));
            for dst in 0..n {
                let count = dests.iter().filter(|&&d| d == dst).count();
                let found = sorted.find_edges(src, dst);
                prop_assert_eq!((found.end - found.start) as usize, count);
                prop_assert!(found.clone().all(|e| sorted.edge_dest(e) == dst));
                prop_assert_eq!(sorted.find_edge(src, dst).is_some(), count > 0);
            }
        }
    }

    #[test]
    fn type_ranges_cover_each_node(graph in arb_graph(), transposed in any::<bool>()) {
        let transpose = if transposed { TransposeKind::Yes } else { TransposeKind::No };
        let map = Arc::new(CondensedTypeIDMap::make_from_edge_types(&graph).unwrap());
        let topo =
            Arc::new(EdgeShuffleTopology::make(&graph, transpose, EdgeSortKind::ByEdgeType));
        let typed = EdgeTypeAwareTopology::make_from(&graph, Arc::clone(&map), topo);

        for &ty in map.distinct_types() {
            prop_assert_eq!(map.get_type(map.get_index(ty).unwrap()), ty);
        }
        for n in typed.all_nodes() {
            let mut covered = 0;
            for &ty in typed.distinct_edge_types() {
                let range = typed.edges_of_type(n, ty);
                let all = typed.edges(n);
                prop_assert!(all.start <= range.start && range.end <= all.end);
                for e in range.clone() {
                    prop_assert_eq!(graph.type_of_edge(typed.edge_property_index(e)), ty);
                }
                covered += range.end - range.start;
            }
            prop_assert_eq!(covered as usize, typed.degree(n));
        }
    }

    #[test]
    fn degree_shuffle_is_a_relabelling(graph in arb_graph()) {
        let seed = EdgeShuffleTopology::make_original_copy(graph.topology());
        let shuffled = ShuffleTopology::make_from_topo(
            &graph,
            &seed,
            NodeSortKind::ByDegree,
            EdgeSortKind::ByDestID,
        );
        prop_assert!(is_permutation(shuffled.node_prop_index()));
        prop_assert!(is_permutation(shuffled.edge_shuffle().edge_prop_index()));
        let degrees: Vec<usize> = shuffled.all_nodes().map(|n| shuffled.degree(n)).collect();
        prop_assert!(degrees.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(
            original_triples(&shuffled, false),
            original_triples(graph.topology(), false)
        );
    }

    #[test]
    fn cache_builds_each_layout_once(graph in arb_graph()) {
        let mut cache = PGViewCache::new();
        cache.build_view::<NodesSortedByDegreeEdgesSortedByDestID, _>(&graph).unwrap();
        cache.build_view::<EdgeTypeAwareBiDir, _>(&graph).unwrap();
        let counts = (
            cache.num_edge_shuff_topos(),
            cache.num_shuff_topos(),
            cache.num_edge_type_aware_topos(),
        );
        cache.build_view::<NodesSortedByDegreeEdgesSortedByDestID, _>(&graph).unwrap();
        cache.build_view::<EdgeTypeAwareBiDir, _>(&graph).unwrap();
        prop_assert_eq!(
            (
                cache.num_edge_shuff_topos(),
                cache.num_shuff_topos(),
                cache.num_edge_type_aware_topos(),
            ),
            counts
        );
        let handle =
            cache.find_shuff_topo(TransposeKind::Yes, NodeSortKind::ByDegree, EdgeSortKind::Any);
        prop_assert!(handle.is_some());
    }
}
