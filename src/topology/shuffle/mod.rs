//! Topologies with renumbered nodes as well as reordered edges.
//!
//! Nodes are renumbered by sorting old ids on a key (degree, node type); the
//! sorted list is the new-to-old mapping `node_prop_index`. Each new node then
//! copies its old adjacency into its own disjoint slice of the new arrays,
//! translating destinations through the inverse (old-to-new) mapping.

use rayon::prelude::*;

use crate::concurrency::{identity_permutation, prefix_sum, split_by_ends, AtomicNodeSlots};
use crate::graph::GraphSource;
use crate::topology::{EdgeShuffleTopology, GraphTopology, ShuffledEdges, Topology};
use crate::types::{Edge, EdgeSortKind, Node, NodeSortKind, PropertyIndex};

/// An [`EdgeShuffleTopology`] whose node ids have been permuted too.
///
/// `node_property_index(n)` is the id node `n` had in the original graph;
/// `edge_property_index(e)` is still the original edge id.
#[derive(Debug)]
pub struct ShuffleTopology {
    edges: EdgeShuffleTopology,
    node_prop_index: Vec<PropertyIndex>,
    node_sort_state: NodeSortKind,
}

impl ShuffleTopology {
    /// Renumbers the nodes of `seed` by `node_sort`, then sorts each node's
    /// edges by `edge_sort`.
    ///
    /// # Panics
    /// Panics if `edge_sort` is [`EdgeSortKind::ByNodeType`].
    pub fn make_from_topo<G>(
        graph: &G,
        seed: &EdgeShuffleTopology,
        node_sort: NodeSortKind,
        edge_sort: EdgeSortKind,
    ) -> Self
    where
        G: GraphSource + ?Sized,
    {
        let shuffled = match node_sort {
            NodeSortKind::Any => Self::make_from(seed),
            NodeSortKind::ByDegree => Self::make_sorted_by_degree(seed),
            NodeSortKind::ByNodeType => Self::make_sorted_by_node_type(graph, seed),
        };
        shuffled.into_sorted_edges(graph, edge_sort)
    }

    /// Copies `seed` keeping node ids.
    pub fn make_from(seed: &EdgeShuffleTopology) -> Self {
        Self::from_node_order(seed, identity_permutation(seed.num_nodes()), NodeSortKind::Any)
    }

    /// Renumbers nodes in non-decreasing degree order. Nodes of equal degree
    /// keep their relative order.
    pub fn make_sorted_by_degree(seed: &EdgeShuffleTopology) -> Self {
        let mut order = identity_permutation(seed.num_nodes());
        order.par_sort_by_key(|&old| seed.degree(old as Node));
        let topo = Self::from_node_order(seed, order, NodeSortKind::ByDegree);
        debug_assert!(topo
            .topology()
            .adj_ends()
            .windows(2)
            .enumerate()
            .all(|(n, w)| topo.degree(n as Node) <= (w[1] - w[0]) as usize));
        topo
    }

    /// Renumbers nodes in non-decreasing node type order, ties by old id.
    pub fn make_sorted_by_node_type<G>(graph: &G, seed: &EdgeShuffleTopology) -> Self
    where
        G: GraphSource + ?Sized,
    {
        let mut order = identity_permutation(seed.num_nodes());
        order.par_sort_by_key(|&old| graph.type_of_node(old as Node));
        Self::from_node_order(seed, order, NodeSortKind::ByNodeType)
    }

    /// Renumbers nodes so that new node `i` is old node `order[i]`.
    ///
    /// Edges keep their relative order within a node, but destinations are
    /// renamed, so the result is only known to satisfy `EdgeSortKind::Any`.
    pub(crate) fn from_node_order(
        seed: &EdgeShuffleTopology,
        order: Vec<PropertyIndex>,
        node_sort_state: NodeSortKind,
    ) -> Self {
        let num_nodes = seed.num_nodes();
        debug_assert_eq!(order.len(), num_nodes);

        let old_to_new = AtomicNodeSlots::zeroed(num_nodes);
        let mut adj_ends: Vec<Edge> = order
            .par_iter()
            .enumerate()
            .map(|(new, &old)| {
                old_to_new.store(old as usize, new as Node);
                seed.degree(old as Node) as Edge
            })
            .collect();
        let old_to_new = old_to_new.into_vec();
        prefix_sum(&mut adj_ends);

        let num_edges = seed.num_edges();
        let mut dests: Vec<Node> = vec![0; num_edges];
        let mut edge_prop_index: Vec<PropertyIndex> = vec![0; num_edges];
        let dest_parts = split_by_ends(&mut dests[..], &adj_ends);
        let prop_parts = split_by_ends(&mut edge_prop_index[..], &adj_ends);

        dest_parts
            .into_par_iter()
            .zip(prop_parts)
            .zip(order.par_iter())
            .for_each(|((node_dests, node_props), &old)| {
                for (slot, edge) in seed.edges(old as Node).enumerate() {
                    node_dests[slot] = old_to_new[seed.edge_dest(edge) as usize];
                    node_props[slot] = seed.edge_property_index(edge);
                }
            });

        let edges = EdgeShuffleTopology::from_parts(
            seed.transpose_state(),
            EdgeSortKind::Any,
            GraphTopology::new(adj_ends, dests),
            edge_prop_index,
        );
        Self {
            edges,
            node_prop_index: order,
            node_sort_state,
        }
    }

    fn into_sorted_edges<G>(mut self, graph: &G, edge_sort: EdgeSortKind) -> Self
    where
        G: GraphSource + ?Sized,
    {
        self.edges = self.edges.into_sorted(graph, edge_sort);
        self
    }

    /// Node renumbering this topology was built with.
    #[inline]
    pub fn node_sort_state(&self) -> NodeSortKind {
        self.node_sort_state
    }

    /// Returns `true` if nodes satisfy `kind` (always true for `Any`).
    #[inline]
    pub fn has_nodes_sorted_by(&self, kind: NodeSortKind) -> bool {
        kind == NodeSortKind::Any || self.node_sort_state == kind
    }

    /// Original node ids, indexed by new node id.
    #[inline]
    pub fn node_prop_index(&self) -> &[PropertyIndex] {
        &self.node_prop_index
    }

    /// New node id of every original node.
    pub fn old_to_new(&self) -> Vec<Node> {
        let map = AtomicNodeSlots::zeroed(self.node_prop_index.len());
        self.node_prop_index
            .par_iter()
            .enumerate()
            .for_each(|(new, &old)| map.store(old as usize, new as Node));
        map.into_vec()
    }

    /// The stored adjacency.
    #[inline]
    pub fn topology(&self) -> &GraphTopology {
        self.edges.topology()
    }

    /// Marks the topology stale; see [`EdgeShuffleTopology::invalidate`].
    pub fn invalidate(&self) {
        self.edges.invalidate();
    }

    /// Consumes the topology and returns the adjacency, the edge permutation
    /// and the node permutation.
    pub fn into_parts(self) -> (GraphTopology, Vec<PropertyIndex>, Vec<PropertyIndex>) {
        let (csr, edge_prop_index) = self.edges.into_parts();
        (csr, edge_prop_index, self.node_prop_index)
    }
}

impl Topology for ShuffleTopology {
    #[inline]
    fn csr(&self) -> &GraphTopology {
        self.edges.topology()
    }

    #[inline]
    fn edge_property_index(&self, edge: Edge) -> PropertyIndex {
        self.edges.edge_property_index(edge)
    }

    #[inline]
    fn node_property_index(&self, node: Node) -> PropertyIndex {
        self.node_prop_index[node as usize]
    }
}

impl ShuffledEdges for ShuffleTopology {
    #[inline]
    fn edge_shuffle(&self) -> &EdgeShuffleTopology {
        &self.edges
    }
}
