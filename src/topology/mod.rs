//! CSR topologies and the derived layouts built from them.
//!
//! Everything starts from a [`GraphTopology`]. Derived topologies add side
//! arrays rather than subclassing:
//! - [`EdgeShuffleTopology`]: edges reordered (transposed and/or sorted), with
//!   an edge permutation back to the original edge ids.
//! - [`ShuffleTopology`]: additionally reorders nodes, with a node permutation.
//! - [`EdgeTypeAwareTopology`]: a type-sorted edge shuffle plus a dense
//!   `node × type` index for O(1) per-type edge ranges.
//!
//! [`Topology`] is the read interface shared by all of them (and by the view
//! wrappers in [`crate::view`]); [`ShuffledEdges`] adds layout state and
//! destination lookup for topologies that carry an edge permutation.

use core::ops::Range;

use crate::types::{Edge, EdgeSortKind, Node, PropertyIndex, TransposeKind};

pub mod csr;
pub mod edge_shuffle;
pub mod edge_type_aware;
pub mod shuffle;
pub mod type_map;

pub use csr::GraphTopology;
pub use edge_shuffle::EdgeShuffleTopology;
pub use edge_type_aware::EdgeTypeAwareTopology;
pub use shuffle::ShuffleTopology;
pub use type_map::CondensedTypeIDMap;

/// Degree up to which `find_edge` scans linearly instead of binary searching.
pub const BINARY_SEARCH_THRESHOLD: usize = 64;

/// Read-only CSR traversal interface.
///
/// Implementors only provide [`csr`](Topology::csr) and, if they reorder
/// entities, the property-index mappings; every traversal method is derived.
pub trait Topology: Sync {
    /// The underlying adjacency arrays.
    fn csr(&self) -> &GraphTopology;

    /// Original (property column) index of `edge`.
    #[inline]
    fn edge_property_index(&self, edge: Edge) -> PropertyIndex {
        edge
    }

    /// Original (property column) index of `node`.
    #[inline]
    fn node_property_index(&self, node: Node) -> PropertyIndex {
        PropertyIndex::from(node)
    }

    /// Number of nodes.
    #[inline]
    fn num_nodes(&self) -> usize {
        self.csr().num_nodes()
    }

    /// Number of edges.
    #[inline]
    fn num_edges(&self) -> usize {
        self.csr().num_edges()
    }

    /// Returns `true` if there are no nodes.
    #[inline]
    fn is_empty(&self) -> bool {
        self.csr().is_empty()
    }

    /// Edge ids of `node`'s adjacency.
    #[inline]
    fn edges(&self, node: Node) -> Range<Edge> {
        self.csr().edges(node)
    }

    /// Destination of `edge`.
    #[inline]
    fn edge_dest(&self, edge: Edge) -> Node {
        self.csr().edge_dest(edge)
    }

    /// Number of edges leaving `node`.
    #[inline]
    fn degree(&self, node: Node) -> usize {
        self.csr().degree(node)
    }

    /// All node ids.
    #[inline]
    fn all_nodes(&self) -> Range<Node> {
        self.csr().all_nodes()
    }

    /// All edge ids.
    #[inline]
    fn all_edges(&self) -> Range<Edge> {
        self.csr().all_edges()
    }
}

/// Layout state and destination lookup of topologies with reordered edges.
pub trait ShuffledEdges: Topology {
    /// The edge-shuffled topology backing this one.
    fn edge_shuffle(&self) -> &EdgeShuffleTopology;

    /// Direction of the stored edges.
    #[inline]
    fn transpose_state(&self) -> TransposeKind {
        self.edge_shuffle().transpose_state()
    }

    /// Returns `true` if the stored edges are reversed.
    #[inline]
    fn is_transposed(&self) -> bool {
        self.transpose_state() == TransposeKind::Yes
    }

    /// Returns `true` if the stored edges have direction `expected`.
    #[inline]
    fn has_transpose_state(&self, expected: TransposeKind) -> bool {
        self.transpose_state() == expected
    }

    /// Ordering of edges within each node's range.
    #[inline]
    fn edge_sort_state(&self) -> EdgeSortKind {
        self.edge_shuffle().edge_sort_state()
    }

    /// Returns `true` if edges satisfy `kind` (always true for `Any`).
    #[inline]
    fn has_edges_sorted_by(&self, kind: EdgeSortKind) -> bool {
        kind == EdgeSortKind::Any || self.edge_sort_state() == kind
    }

    /// Returns `false` once the topology has been invalidated.
    #[inline]
    fn is_valid(&self) -> bool {
        self.edge_shuffle().is_valid()
    }

    /// Some edge from `src` to `dst`, if one exists.
    #[inline]
    fn find_edge(&self, src: Node, dst: Node) -> Option<Edge> {
        self.edge_shuffle().find_edge(src, dst)
    }

    /// All edges from `src` to `dst`; empty if there are none.
    ///
    /// # Panics
    /// Panics if `src` has edges and they are not sorted by destination.
    #[inline]
    fn find_edges(&self, src: Node, dst: Node) -> Range<Edge> {
        self.edge_shuffle().find_edges(src, dst)
    }

    /// Returns `true` if there is an edge from `src` to `dst`.
    #[inline]
    fn has_edge(&self, src: Node, dst: Node) -> bool {
        self.find_edge(src, dst).is_some()
    }
}
