//! Per-node edge sorts.
//!
//! Destinations and edge property indices are permuted together. Each node's
//! edges form a disjoint sub-slice, so nodes are sorted independently in
//! parallel and no synchronisation is needed beyond the final join.

use rayon::prelude::*;

use super::EdgeShuffleTopology;
use crate::concurrency::split_by_ends;
use crate::graph::GraphSource;
use crate::topology::GraphTopology;
use crate::types::{Edge, EdgeSortKind, Node, PropertyIndex};

impl EdgeShuffleTopology {
    /// Sorts every node's edges by destination id.
    ///
    /// Edges with the same destination end up ordered by original edge id.
    pub fn into_sorted_by_dest_id(mut self) -> Self {
        self.sort_each_node_by(|_| ());
        self.edge_sort_state = EdgeSortKind::ByDestID;
        self
    }

    /// Sorts every node's edges by edge type, then destination id.
    ///
    /// Types are looked up as `graph.type_of_edge(original edge id)`.
    pub fn into_sorted_by_type_then_dest<G>(mut self, graph: &G) -> Self
    where
        G: GraphSource + ?Sized,
    {
        self.sort_each_node_by(|prop| graph.type_of_edge(prop));
        self.edge_sort_state = EdgeSortKind::ByEdgeType;
        self
    }

    /// Sorts each node's `(dest, prop)` pairs by `(key(prop), dest, prop)`.
    fn sort_each_node_by<K, F>(&mut self, key: F)
    where
        K: Ord + Send,
        F: Fn(PropertyIndex) -> K + Sync,
    {
        let GraphTopology { adj_ends, dests } = &mut self.csr;
        let ends: &[Edge] = adj_ends;
        let dest_parts = split_by_ends(&mut dests[..], ends);
        let prop_parts = split_by_ends(&mut self.edge_prop_index[..], ends);

        dest_parts
            .into_par_iter()
            .zip(prop_parts)
            .filter(|(node_dests, _)| node_dests.len() > 1)
            .for_each(|(node_dests, node_props)| {
                let mut scratch: Vec<(K, Node, PropertyIndex)> = node_dests
                    .iter()
                    .zip(node_props.iter())
                    .map(|(&dst, &prop)| (key(prop), dst, prop))
                    .collect();
                scratch.sort_unstable();
                for (slot, (_, dst, prop)) in scratch.into_iter().enumerate() {
                    node_dests[slot] = dst;
                    node_props[slot] = prop;
                }
            });
    }
}
