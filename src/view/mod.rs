//! Read-only views pairing a graph with cached derived topologies.
//!
//! Views borrow from a [`PGViewCache`]; they are cheap to create and never
//! own topology data. The wrappers here combine one or two cached topologies
//! into the access pattern an algorithm wants (bidirectional, sorted, typed).
//! [`ViewKind`] marker types in [`kinds`] describe how each view is built.

use core::ops::{Deref, Range};

use crate::graph::GraphSource;
use crate::topology::{
    EdgeShuffleTopology, EdgeTypeAwareTopology, GraphTopology, ShuffleTopology, ShuffledEdges,
    Topology,
};
use crate::types::{Edge, EdgeSortKind, EntityType, Node, PropertyIndex};

mod cache;
pub mod kinds;

pub use cache::{EdgeShuffleHandle, EdgeTypeAwareHandle, PGViewCache, ShuffleHandle};
pub use kinds::ViewKind;

/// A graph together with one of its topologies.
///
/// Dereferences to the topology.
#[derive(Debug, Clone)]
pub struct PropertyGraphView<'a, G, T> {
    graph: &'a G,
    topo: T,
}

impl<'a, G: GraphSource, T> PropertyGraphView<'a, G, T> {
    /// Pairs `graph` with `topo`.
    pub fn new(graph: &'a G, topo: T) -> Self {
        Self { graph, topo }
    }

    /// The underlying property graph.
    #[inline]
    pub fn property_graph(&self) -> &'a G {
        self.graph
    }

    /// The topology wrapper.
    #[inline]
    pub fn topology(&self) -> &T {
        &self.topo
    }
}

impl<G, T> Deref for PropertyGraphView<'_, G, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.topo
    }
}

/// Out-edges from one topology, in-edges from a transposed one.
#[derive(Debug)]
pub struct BiDirTopology<'a, O, I> {
    out_topo: &'a O,
    in_topo: &'a I,
}

/// The usual pairing: the original topology plus its transpose.
pub type SimpleBiDirTopology<'a> = BiDirTopology<'a, GraphTopology, EdgeShuffleTopology>;

impl<O, I> Clone for BiDirTopology<'_, O, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O, I> Copy for BiDirTopology<'_, O, I> {}

impl<'a, O: Topology, I: ShuffledEdges> BiDirTopology<'a, O, I> {
    /// Pairs an out-edge topology with the transpose of the same graph.
    ///
    /// # Panics
    /// In debug builds, panics if `in_topo` is not transposed or the node
    /// counts differ.
    pub fn new(out_topo: &'a O, in_topo: &'a I) -> Self {
        debug_assert!(in_topo.is_transposed(), "in-edge topology is not transposed");
        debug_assert_eq!(out_topo.num_nodes(), in_topo.num_nodes());
        Self { out_topo, in_topo }
    }

    /// Edge ids of `node`'s in-edges, in the in-edge topology.
    #[inline]
    pub fn in_edges(&self, node: Node) -> Range<Edge> {
        self.in_topo.edges(node)
    }

    /// Number of edges pointing at `node`.
    #[inline]
    pub fn in_degree(&self, node: Node) -> usize {
        self.in_topo.degree(node)
    }

    /// Source of in-edge `edge`.
    #[inline]
    pub fn in_edge_src(&self, edge: Edge) -> Node {
        self.in_topo.edge_dest(edge)
    }

    /// Original id of in-edge `edge`.
    #[inline]
    pub fn in_edge_property_index(&self, edge: Edge) -> PropertyIndex {
        self.in_topo.edge_property_index(edge)
    }

    /// The out-edge topology.
    #[inline]
    pub fn out_topology(&self) -> &'a O {
        self.out_topo
    }

    /// The in-edge topology.
    #[inline]
    pub fn in_topology(&self) -> &'a I {
        self.in_topo
    }
}

impl<O: Topology, I: ShuffledEdges> Topology for BiDirTopology<'_, O, I> {
    #[inline]
    fn csr(&self) -> &GraphTopology {
        self.out_topo.csr()
    }

    #[inline]
    fn edge_property_index(&self, edge: Edge) -> PropertyIndex {
        self.out_topo.edge_property_index(edge)
    }

    #[inline]
    fn node_property_index(&self, node: Node) -> PropertyIndex {
        self.out_topo.node_property_index(node)
    }
}

/// A topology known to have edges sorted by destination, exposing the
/// lookups that need it.
#[derive(Debug)]
pub struct SortedTopology<'a, T> {
    topo: &'a T,
}

/// Original node ids, edges sorted by destination.
pub type EdgesSortedByDestTopology<'a> = SortedTopology<'a, EdgeShuffleTopology>;

/// Nodes renumbered by degree, edges sorted by destination.
pub type NodesSortedByDegreeEdgesSortedByDestIDTopology<'a> = SortedTopology<'a, ShuffleTopology>;

impl<T> Clone for SortedTopology<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SortedTopology<'_, T> {}

impl<'a, T: ShuffledEdges> SortedTopology<'a, T> {
    /// Wraps `topo`.
    ///
    /// # Panics
    /// In debug builds, panics if `topo` is not sorted by destination.
    pub fn new(topo: &'a T) -> Self {
        debug_assert!(
            topo.has_edges_sorted_by(EdgeSortKind::ByDestID),
            "topology is not sorted by destination"
        );
        Self { topo }
    }

    /// Some edge from `src` to `dst`.
    #[inline]
    pub fn find_edge(&self, src: Node, dst: Node) -> Option<Edge> {
        self.topo.find_edge(src, dst)
    }

    /// All edges from `src` to `dst`; empty if there are none.
    #[inline]
    pub fn find_edges(&self, src: Node, dst: Node) -> Range<Edge> {
        self.topo.find_edges(src, dst)
    }

    /// Returns `true` if there is an edge from `src` to `dst`.
    #[inline]
    pub fn has_edge(&self, src: Node, dst: Node) -> bool {
        self.topo.has_edge(src, dst)
    }

    /// The wrapped topology.
    #[inline]
    pub fn inner(&self) -> &'a T {
        self.topo
    }
}

impl<T: ShuffledEdges> Topology for SortedTopology<'_, T> {
    #[inline]
    fn csr(&self) -> &GraphTopology {
        self.topo.csr()
    }

    #[inline]
    fn edge_property_index(&self, edge: Edge) -> PropertyIndex {
        self.topo.edge_property_index(edge)
    }

    #[inline]
    fn node_property_index(&self, node: Node) -> PropertyIndex {
        self.topo.node_property_index(node)
    }
}

/// Type-indexed out-edges and in-edges.
///
/// Connectivity queries search whichever side has fewer candidate edges.
#[derive(Debug, Clone, Copy)]
pub struct EdgeTypeAwareBiDirTopology<'a> {
    out_topo: &'a EdgeTypeAwareTopology,
    in_topo: &'a EdgeTypeAwareTopology,
}

impl<'a> EdgeTypeAwareBiDirTopology<'a> {
    /// Pairs the out- and in-edge type indices of one graph.
    ///
    /// # Panics
    /// In debug builds, panics if the directions are wrong or the node counts
    /// differ.
    pub fn new(out_topo: &'a EdgeTypeAwareTopology, in_topo: &'a EdgeTypeAwareTopology) -> Self {
        debug_assert!(!out_topo.is_transposed(), "out-edge index is transposed");
        debug_assert!(in_topo.is_transposed(), "in-edge index is not transposed");
        debug_assert_eq!(out_topo.num_nodes(), in_topo.num_nodes());
        Self { out_topo, in_topo }
    }

    /// Out-edges of `node` with type `edge_type`.
    #[inline]
    pub fn out_edges_of_type(&self, node: Node, edge_type: EntityType) -> Range<Edge> {
        self.out_topo.edges_of_type(node, edge_type)
    }

    /// In-edges of `node` with type `edge_type`, in the in-edge index.
    #[inline]
    pub fn in_edges_of_type(&self, node: Node, edge_type: EntityType) -> Range<Edge> {
        self.in_topo.edges_of_type(node, edge_type)
    }

    /// Number of out-edges of `node` with type `edge_type`.
    #[inline]
    pub fn out_degree_of_type(&self, node: Node, edge_type: EntityType) -> usize {
        self.out_topo.degree_of_type(node, edge_type)
    }

    /// Number of in-edges of `node` with type `edge_type`.
    #[inline]
    pub fn in_degree_of_type(&self, node: Node, edge_type: EntityType) -> usize {
        self.in_topo.degree_of_type(node, edge_type)
    }

    /// Distinct edge types of the graph, ascending.
    #[inline]
    pub fn distinct_edge_types(&self) -> &'a [EntityType] {
        self.out_topo.distinct_edge_types()
    }

    /// Returns `true` if some edge has type `edge_type`.
    #[inline]
    pub fn does_edge_type_exist(&self, edge_type: EntityType) -> bool {
        self.out_topo.does_edge_type_exist(edge_type)
    }

    /// Returns `true` if there is an edge `src -> dst` of type `edge_type`.
    pub fn is_connected_with_edge_type(
        &self,
        src: Node,
        dst: Node,
        edge_type: EntityType,
    ) -> bool {
        if self.out_degree_of_type(src, edge_type) <= self.in_degree_of_type(dst, edge_type) {
            self.out_topo.is_connected_with_edge_type(src, dst, edge_type)
        } else {
            self.in_topo.is_connected_with_edge_type(dst, src, edge_type)
        }
    }

    /// Returns `true` if there is an edge `src -> dst` of any type.
    pub fn is_connected(&self, src: Node, dst: Node) -> bool {
        if self.out_topo.degree(src) <= self.in_topo.degree(dst) {
            self.out_topo.is_connected(src, dst)
        } else {
            self.in_topo.is_connected(dst, src)
        }
    }

    /// Original ids of all edges `src -> dst` with type `edge_type`.
    pub fn find_all_edges(
        &self,
        src: Node,
        dst: Node,
        edge_type: EntityType,
    ) -> Vec<PropertyIndex> {
        if self.out_degree_of_type(src, edge_type) <= self.in_degree_of_type(dst, edge_type) {
            let found = self.out_topo.find_all_edges_with_type(src, dst, edge_type);
            found.map(|e| self.out_topo.edge_property_index(e)).collect()
        } else {
            let found = self.in_topo.find_all_edges_with_type(dst, src, edge_type);
            found.map(|e| self.in_topo.edge_property_index(e)).collect()
        }
    }

    /// The out-edge index.
    #[inline]
    pub fn out_topology(&self) -> &'a EdgeTypeAwareTopology {
        self.out_topo
    }

    /// The in-edge index.
    #[inline]
    pub fn in_topology(&self) -> &'a EdgeTypeAwareTopology {
        self.in_topo
    }
}

impl Topology for EdgeTypeAwareBiDirTopology<'_> {
    #[inline]
    fn csr(&self) -> &GraphTopology {
        self.out_topo.csr()
    }

    #[inline]
    fn edge_property_index(&self, edge: Edge) -> PropertyIndex {
        self.out_topo.edge_property_index(edge)
    }
}
