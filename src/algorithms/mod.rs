//! Whole-topology transforms returning a new plain [`GraphTopology`].
//!
//! These are for callers that want rewritten arrays rather than a cached view;
//! they share their parallel kernels with the derived topologies.

use core::cmp::Reverse;

use rayon::prelude::*;

use crate::concurrency::{
    identity_permutation, prefix_sum, range_begins, AtomicCounterArray, AtomicNodeSlots,
};
use crate::topology::{
    EdgeShuffleTopology, GraphTopology, ShuffleTopology, BINARY_SEARCH_THRESHOLD,
};
use crate::types::{Edge, Node, NodeSortKind};

/// The reverse of `topo`.
///
/// Edge order within a node is unspecified.
pub fn create_transpose_topology(topo: &GraphTopology) -> GraphTopology {
    EdgeShuffleTopology::make_transpose_copy(topo).into_parts().0
}

/// `topo` plus the reverse of every edge that is not a self loop.
///
/// Node `n` lists its own out-edges first (in their original order), then
/// the reversed in-edges in unspecified order.
pub fn create_symmetric_topology(topo: &GraphTopology) -> GraphTopology {
    if topo.is_empty() {
        return GraphTopology::default();
    }
    let num_nodes = topo.num_nodes();

    let degrees = AtomicCounterArray::zeroed(num_nodes);
    (0..num_nodes).into_par_iter().for_each(|src| {
        let src = src as Node;
        for e in topo.edges(src) {
            let dst = topo.edge_dest(e);
            degrees.increment(src as usize);
            if dst != src {
                degrees.increment(dst as usize);
            }
        }
    });

    let mut adj_ends = degrees.into_vec();
    prefix_sum(&mut adj_ends);
    let num_edges = adj_ends.last().copied().unwrap_or(0) as usize;

    let cursors = AtomicCounterArray::from_values(range_begins(&adj_ends));
    let dests = AtomicNodeSlots::zeroed(num_edges);

    // Out-edges go in a separate region so they form each node's prefix.
    (0..num_nodes).into_par_iter().for_each(|src| {
        let src = src as Node;
        for e in topo.edges(src) {
            let slot = cursors.fetch_increment(src as usize) as usize;
            dests.store(slot, topo.edge_dest(e));
        }
    });
    (0..num_nodes).into_par_iter().for_each(|src| {
        let src = src as Node;
        for e in topo.edges(src) {
            let dst = topo.edge_dest(e);
            if dst != src {
                let slot = cursors.fetch_increment(dst as usize) as usize;
                dests.store(slot, src);
            }
        }
    });

    GraphTopology::new(adj_ends, dests.into_vec())
}

/// Sorts every node's edges by destination.
///
/// Returns the sorted topology and, per new edge, its id in `topo`.
pub fn sort_all_edges_by_dest(topo: &GraphTopology) -> (GraphTopology, Vec<Edge>) {
    EdgeShuffleTopology::make_original_copy(topo)
        .into_sorted_by_dest_id()
        .into_parts()
}

/// Renumbers nodes by non-increasing degree, ties by node id.
///
/// Returns the new topology and the new id of every old node. Edge order
/// within a node is kept.
pub fn sort_nodes_by_degree(topo: &GraphTopology) -> (GraphTopology, Vec<Node>) {
    let seed = EdgeShuffleTopology::make_original_copy(topo);
    let mut order = identity_permutation(topo.num_nodes());
    order.par_sort_unstable_by_key(|&n| (Reverse(topo.degree(n as Node)), n));

    let shuffled = ShuffleTopology::from_node_order(&seed, order, NodeSortKind::Any);
    let old_to_new = shuffled.old_to_new();
    (shuffled.into_parts().0, old_to_new)
}

/// Some edge from `src` to `dst`, assuming `src`'s edges are sorted by
/// destination.
///
/// Small adjacencies are scanned, larger ones binary searched.
pub fn find_edge_sorted_by_dest(topo: &GraphTopology, src: Node, dst: Node) -> Option<Edge> {
    let range = topo.edges(src);
    if range.end - range.start <= BINARY_SEARCH_THRESHOLD as Edge {
        return range.into_iter().find(|&e| topo.edge_dest(e) == dst);
    }
    let found = topo.dest_equal_range(range, dst);
    (!found.is_empty()).then_some(found.start)
}

#[cfg(test)]
mod tests;
