//! Parallel transpose.
//!
//! Two passes over the source edges:
//! 1. count in-degrees into an [`AtomicCounterArray`] and prefix-sum them into
//!    the transposed end offsets;
//! 2. scatter: each source node claims a slot in its destination's new range
//!    with `fetch_increment` and writes itself plus the original edge id there.
//!
//! Edge order within a transposed node depends on scheduling; sort afterwards
//! if a deterministic order is needed.

use rayon::prelude::*;

use super::EdgeShuffleTopology;
use crate::concurrency::{prefix_sum, range_begins, AtomicCounterArray, AtomicNodeSlots};
use crate::topology::GraphTopology;
use crate::types::{Edge, EdgeSortKind, Node, TransposeKind};

impl EdgeShuffleTopology {
    /// Builds the reverse of `topo`: every edge `u -> v` becomes `v -> u`,
    /// remembering its id in `topo`.
    pub fn make_transpose_copy(topo: &GraphTopology) -> Self {
        let (csr, edge_prop_index) = transpose_with_ids(topo);
        Self::from_parts(TransposeKind::Yes, EdgeSortKind::Any, csr, edge_prop_index)
    }
}

/// Returns the transposed adjacency and, per transposed edge, its id in `topo`.
fn transpose_with_ids(topo: &GraphTopology) -> (GraphTopology, Vec<Edge>) {
    if topo.is_empty() {
        return (GraphTopology::default(), Vec::new());
    }
    let num_nodes = topo.num_nodes();
    let num_edges = topo.num_edges();

    let in_degrees = AtomicCounterArray::zeroed(num_nodes);
    topo.dests
        .par_iter()
        .for_each(|&dst| in_degrees.increment(dst as usize));
    let mut adj_ends = in_degrees.into_vec();
    prefix_sum(&mut adj_ends);

    let cursors = AtomicCounterArray::from_values(range_begins(&adj_ends));
    let dests = AtomicNodeSlots::zeroed(num_edges);
    let edge_ids = AtomicCounterArray::zeroed(num_edges);

    (0..num_nodes).into_par_iter().for_each(|src| {
        let src = src as Node;
        for edge in topo.edges(src) {
            let slot = cursors.fetch_increment(topo.edge_dest(edge) as usize) as usize;
            dests.store(slot, src);
            edge_ids.store(slot, edge);
        }
    });

    (
        GraphTopology::new(adj_ends, dests.into_vec()),
        edge_ids.into_vec(),
    )
}
