//! Topologies whose edges are transposed and/or sorted within each node.
//!
//! An [`EdgeShuffleTopology`] owns a fresh [`GraphTopology`] plus
//! `edge_prop_index`, mapping every stored edge back to the id it had in the
//! original topology (which is also its row in the edge property columns).
//!
//! Construction is pure: [`make`](EdgeShuffleTopology::make) and the
//! `into_sorted*` adapters consume and return values, and a layout state is
//! recorded only once the pass that establishes it has finished.

use core::ops::Range;
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use tracing::warn;

use crate::concurrency::identity_permutation;
use crate::graph::GraphSource;
use crate::topology::{GraphTopology, ShuffledEdges, Topology, BINARY_SEARCH_THRESHOLD};
use crate::types::{Edge, EdgeSortKind, Node, PropertyIndex, TransposeKind};

mod sort;
mod transpose;

/// Warns once per process about `find_edge` on unsorted high-degree nodes.
static UNSORTED_LOOKUP: Once = Once::new();

/// A CSR topology with reordered edges and a mapping back to original edge ids.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `make_original_copy` | \(O(n + m)\) | Parallel copy |
/// | `make_transpose_copy` | \(O(n + m)\) | Atomic count + scatter |
/// | `into_sorted` | \(O(m \log d)\) | One sort per node, nodes in parallel |
/// | `find_edge` | \(O(\log d)\) or \(O(d)\) | Binary search needs `ByDestID` and `d > 64` |
/// | `find_edges` | \(O(\log d)\) | Requires `ByDestID` |
#[derive(Debug)]
pub struct EdgeShuffleTopology {
    csr: GraphTopology,
    edge_prop_index: Vec<PropertyIndex>,
    transpose_state: TransposeKind,
    edge_sort_state: EdgeSortKind,
    valid: AtomicBool,
}

impl EdgeShuffleTopology {
    pub(crate) fn from_parts(
        transpose_state: TransposeKind,
        edge_sort_state: EdgeSortKind,
        csr: GraphTopology,
        edge_prop_index: Vec<PropertyIndex>,
    ) -> Self {
        debug_assert_eq!(csr.num_edges(), edge_prop_index.len());
        Self {
            csr,
            edge_prop_index,
            transpose_state,
            edge_sort_state,
            valid: AtomicBool::new(true),
        }
    }

    /// Builds a topology of `graph` with the requested direction and edge order.
    ///
    /// # Panics
    /// Panics if `sort` is [`EdgeSortKind::ByNodeType`].
    pub fn make<G>(graph: &G, transpose: TransposeKind, sort: EdgeSortKind) -> Self
    where
        G: GraphSource + ?Sized,
    {
        let base = match transpose {
            TransposeKind::No => Self::make_original_copy(graph.topology()),
            TransposeKind::Yes => Self::make_transpose_copy(graph.topology()),
        };
        base.into_sorted(graph, sort)
    }

    /// Copies `topo` unchanged; every edge maps to itself.
    pub fn make_original_copy(topo: &GraphTopology) -> Self {
        Self::from_parts(
            TransposeKind::No,
            EdgeSortKind::Any,
            topo.copy(),
            identity_permutation(topo.num_edges()),
        )
    }

    /// Reorders the edges within each node by `sort`.
    ///
    /// Edge types are looked up through the original edge id, so `graph` must
    /// be the graph this topology was built from.
    ///
    /// # Panics
    /// Panics if `sort` is [`EdgeSortKind::ByNodeType`].
    pub fn into_sorted<G>(self, graph: &G, sort: EdgeSortKind) -> Self
    where
        G: GraphSource + ?Sized,
    {
        match sort {
            EdgeSortKind::Any => self,
            EdgeSortKind::ByDestID => self.into_sorted_by_dest_id(),
            EdgeSortKind::ByEdgeType => self.into_sorted_by_type_then_dest(graph),
            EdgeSortKind::ByNodeType => {
                unimplemented!("sorting edges by destination node type")
            }
        }
    }

    /// Direction of the stored edges.
    #[inline]
    pub fn transpose_state(&self) -> TransposeKind {
        self.transpose_state
    }

    /// Ordering of edges within each node.
    #[inline]
    pub fn edge_sort_state(&self) -> EdgeSortKind {
        self.edge_sort_state
    }

    /// Returns `false` once [`invalidate`](Self::invalidate) has been called.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    /// Marks the topology stale. A stale topology is never handed out by a
    /// view cache again, and there is no way back.
    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }

    /// Original edge ids, indexed by stored edge id.
    #[inline]
    pub fn edge_prop_index(&self) -> &[PropertyIndex] {
        &self.edge_prop_index
    }

    /// The stored adjacency.
    #[inline]
    pub fn topology(&self) -> &GraphTopology {
        &self.csr
    }

    /// Some edge from `src` to `dst`.
    ///
    /// Nodes of degree up to [`BINARY_SEARCH_THRESHOLD`] are scanned. Larger
    /// ones are binary searched when edges are sorted by destination;
    /// otherwise they are scanned as well and a warning is logged once.
    pub fn find_edge(&self, src: Node, dst: Node) -> Option<Edge> {
        let range = self.csr.edges(src);
        let degree = (range.end - range.start) as usize;

        if degree > BINARY_SEARCH_THRESHOLD {
            if self.edge_sort_state == EdgeSortKind::ByDestID {
                let found = self.csr.dest_equal_range(range, dst);
                return (!found.is_empty()).then_some(found.start);
            }
            UNSORTED_LOOKUP.call_once(|| {
                warn!(
                    degree,
                    sort = %self.edge_sort_state,
                    "edge lookup on a high-degree node without destination-sorted edges; falling back to a linear scan"
                );
            });
        }

        range.into_iter().find(|&e| self.csr.edge_dest(e) == dst)
    }

    /// All edges from `src` to `dst`; the empty range `end..end` if there are none.
    ///
    /// # Panics
    /// Panics if `src` has edges and they are not sorted by destination.
    pub fn find_edges(&self, src: Node, dst: Node) -> Range<Edge> {
        let range = self.csr.edges(src);
        if range.is_empty() {
            return range;
        }
        assert!(
            self.edge_sort_state == EdgeSortKind::ByDestID,
            "find_edges needs edges sorted by destination, found {}",
            self.edge_sort_state
        );
        self.csr.dest_equal_range(range, dst)
    }

    /// Consumes the topology and returns the adjacency and edge permutation.
    pub fn into_parts(self) -> (GraphTopology, Vec<PropertyIndex>) {
        (self.csr, self.edge_prop_index)
    }
}

impl Topology for EdgeShuffleTopology {
    #[inline]
    fn csr(&self) -> &GraphTopology {
        &self.csr
    }

    #[inline]
    fn edge_property_index(&self, edge: Edge) -> PropertyIndex {
        self.edge_prop_index[edge as usize]
    }
}

impl ShuffledEdges for EdgeShuffleTopology {
    #[inline]
    fn edge_shuffle(&self) -> &EdgeShuffleTopology {
        self
    }
}
