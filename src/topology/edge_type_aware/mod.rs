//! Per-edge-type adjacency ranges in O(1).
//!
//! Built on an [`EdgeShuffleTopology`] sorted [`ByEdgeType`](EdgeSortKind::ByEdgeType),
//! where every node's edges form one contiguous run per type. With `T`
//! distinct types, `per_type_adj_ends[node * T + i]` is the end of the run
//! of type index `i` (its start is the previous slot's end, or the node's
//! first edge for `i == 0`). Types a node lacks get empty runs.

use core::ops::Range;
use std::sync::Arc;

use rayon::prelude::*;

use crate::graph::GraphSource;
use crate::topology::{
    CondensedTypeIDMap, EdgeShuffleTopology, GraphTopology, ShuffledEdges, Topology,
};
use crate::types::{Edge, EdgeSortKind, EntityType, Node, PropertyIndex, TransposeKind};

/// A type-sorted edge shuffle plus a `node × type` index of edge ranges.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `make_from` | \(O(nT + m)\) | Nodes in parallel |
/// | `edges_of_type` | \(O(1)\) | |
/// | `find_all_edges_with_type` | \(O(\log d_t)\) | Within one type run |
/// | `is_connected` | \(O(T \log d)\) | |
#[derive(Debug)]
pub struct EdgeTypeAwareTopology {
    topo: Arc<EdgeShuffleTopology>,
    type_map: Arc<CondensedTypeIDMap>,
    per_type_adj_ends: Vec<Edge>,
}

impl EdgeTypeAwareTopology {
    /// Builds the per-type index over `topo`.
    ///
    /// `type_map` must index the edge types of `graph` and `topo` must be an
    /// edge shuffle of `graph`.
    ///
    /// # Panics
    /// Panics if `topo` is not sorted by edge type, or if it has edges but no
    /// nodes or no edge types.
    pub fn make_from<G>(
        graph: &G,
        type_map: Arc<CondensedTypeIDMap>,
        topo: Arc<EdgeShuffleTopology>,
    ) -> Self
    where
        G: GraphSource + ?Sized,
    {
        assert!(
            topo.has_edges_sorted_by(EdgeSortKind::ByEdgeType),
            "edge type index needs edges sorted by edge type, found {}",
            topo.edge_sort_state()
        );
        debug_assert_eq!(topo.num_edges(), graph.topology().num_edges());

        let per_type_adj_ends = per_type_adjacency_ends(graph, &type_map, &topo);
        Self {
            topo,
            type_map,
            per_type_adj_ends,
        }
    }

    /// Edges of `node` whose type is `edge_type`; empty if the graph has no
    /// such type.
    #[inline]
    pub fn edges_of_type(&self, node: Node, edge_type: EntityType) -> Range<Edge> {
        let node_range = self.topo.topology().edges(node);
        let Some(index) = self.type_map.get_index(edge_type) else {
            return node_range.start..node_range.start;
        };
        let slot = node as usize * self.type_map.num_unique_types() + index as usize;
        let begin = if index == 0 {
            node_range.start
        } else {
            self.per_type_adj_ends[slot - 1]
        };
        begin..self.per_type_adj_ends[slot]
    }

    /// Number of edges of `node` whose type is `edge_type`.
    #[inline]
    pub fn degree_of_type(&self, node: Node, edge_type: EntityType) -> usize {
        let range = self.edges_of_type(node, edge_type);
        (range.end - range.start) as usize
    }

    /// Distinct edge types of the graph, ascending.
    #[inline]
    pub fn distinct_edge_types(&self) -> &[EntityType] {
        self.type_map.distinct_types()
    }

    /// Returns `true` if some edge of the graph has type `edge_type`.
    #[inline]
    pub fn does_edge_type_exist(&self, edge_type: EntityType) -> bool {
        self.type_map.has_type(edge_type)
    }

    /// The type map this index was built with.
    #[inline]
    pub fn type_map(&self) -> &CondensedTypeIDMap {
        &self.type_map
    }

    /// All edges of `node` with type `edge_type` whose far end is `key`.
    ///
    /// Empty if there are none.
    pub fn find_all_edges_with_type(
        &self,
        node: Node,
        key: Node,
        edge_type: EntityType,
    ) -> Range<Edge> {
        let range = self.edges_of_type(node, edge_type);
        if range.is_empty() {
            return range;
        }
        self.topo.topology().dest_equal_range(range, key)
    }

    /// Returns `true` if `node` has an edge of type `edge_type` to `key`.
    pub fn is_connected_with_edge_type(
        &self,
        node: Node,
        key: Node,
        edge_type: EntityType,
    ) -> bool {
        !self.find_all_edges_with_type(node, key, edge_type).is_empty()
    }

    /// Edges of `node` to `key` of the first type (in index order) that has
    /// any. All returned edges share one type.
    pub fn find_all_edges_single_type(&self, node: Node, key: Node) -> Range<Edge> {
        let end = self.topo.topology().edges(node).end;
        self.distinct_edge_types()
            .iter()
            .map(|&ty| self.find_all_edges_with_type(node, key, ty))
            .find(|found| !found.is_empty())
            .unwrap_or(end..end)
    }

    /// Returns `true` if `node` has an edge of any type to `key`.
    pub fn is_connected(&self, node: Node, key: Node) -> bool {
        !self.find_all_edges_single_type(node, key).is_empty()
    }

    /// The underlying type-sorted edge shuffle.
    #[inline]
    pub fn edge_shuffle_topology(&self) -> &Arc<EdgeShuffleTopology> {
        &self.topo
    }

    /// The raw `node × type` end-offset index.
    #[inline]
    pub fn per_type_adj_ends(&self) -> &[Edge] {
        &self.per_type_adj_ends
    }

    /// Returns `false` once the underlying edge shuffle is invalidated.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.topo.is_valid()
    }

    /// Invalidates the underlying edge shuffle, and with it this index.
    pub fn invalidate(&self) {
        self.topo.invalidate();
    }

    /// Direction of the stored edges.
    #[inline]
    pub fn transpose_state(&self) -> TransposeKind {
        self.topo.transpose_state()
    }
}

impl Topology for EdgeTypeAwareTopology {
    #[inline]
    fn csr(&self) -> &GraphTopology {
        self.topo.topology()
    }

    #[inline]
    fn edge_property_index(&self, edge: Edge) -> PropertyIndex {
        self.topo.edge_property_index(edge)
    }
}

impl ShuffledEdges for EdgeTypeAwareTopology {
    #[inline]
    fn edge_shuffle(&self) -> &EdgeShuffleTopology {
        &self.topo
    }
}

fn per_type_adjacency_ends<G>(
    graph: &G,
    type_map: &CondensedTypeIDMap,
    topo: &EdgeShuffleTopology,
) -> Vec<Edge>
where
    G: GraphSource + ?Sized,
{
    let num_nodes = topo.num_nodes();
    let num_types = type_map.num_unique_types();
    if num_nodes == 0 {
        assert!(topo.num_edges() == 0, "found a graph with edges but no nodes");
        return Vec::new();
    }
    if num_types == 0 {
        assert!(topo.num_edges() == 0, "found a graph with edges but no edge types");
        return Vec::new();
    }

    let mut ends: Vec<Edge> = vec![0; num_nodes * num_types];
    ends.par_chunks_mut(num_types)
        .enumerate()
        .for_each(|(node, slots)| {
            let range = topo.edges(node as Node);
            let mut next = 0usize;
            for edge in range.clone() {
                let ty = graph.type_of_edge(topo.edge_property_index(edge));
                let index = type_map
                    .get_index(ty)
                    .unwrap_or_else(|| panic!("edge type {ty} is missing from the type map"))
                    as usize;
                debug_assert!(index >= next, "edges of node {node} are not grouped by type");
                while next < index {
                    slots[next] = edge;
                    next += 1;
                }
            }
            slots[next..].fill(range.end);
        });
    ends
}
