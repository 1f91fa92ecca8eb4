//! The base CSR adjacency structure.
//!
//! Memory layout:
//! - `adj_ends`: `Vec<Edge>` of length `n`; entry `i` is the exclusive end of
//!   node `i`'s edge range (its start is `adj_ends[i - 1]`, or `0` for node 0)
//! - `dests`: `Vec<Node>` of length `m`; entry `e` is the destination of edge `e`
//!
//! Storing end offsets only (no leading zero) keeps the array layout identical
//! to the on-disk blob, see [`crate::io`].

use core::fmt;
use core::ops::Range;

use rayon::prelude::*;

use crate::error::{Result, TopologyError};
use crate::topology::Topology;
use crate::types::{Edge, Node};

/// An immutable CSR graph: node `n`'s out-edges are the contiguous edge ids
/// `edges(n)`, and `edge_dest(e)` names the node edge `e` points to.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `new` | \(O(1)\) | Validated with [`check`](Self::check) in debug builds |
/// | `from_edge_list` | \(O(n + m)\) | Counting sort, keeps per-source input order |
/// | `edges` / `degree` | \(O(1)\) | Two offset reads |
/// | `edge_dest` | \(O(1)\) | |
/// | `check` | \(O(n + m)\) | Parallel |
#[derive(Clone, Default, PartialEq, Eq)]
pub struct GraphTopology {
    pub(crate) adj_ends: Vec<Edge>,
    pub(crate) dests: Vec<Node>,
}

impl GraphTopology {
    /// Takes ownership of CSR arrays.
    ///
    /// # Panics
    /// In debug builds, panics if the arrays violate a CSR invariant
    /// (see [`check`](Self::check)).
    pub fn new(adj_ends: Vec<Edge>, dests: Vec<Node>) -> Self {
        let topo = Self { adj_ends, dests };
        #[cfg(debug_assertions)]
        if let Err(err) = topo.check() {
            panic!("{err}");
        }
        topo
    }

    /// Copies borrowed CSR arrays into a new topology.
    ///
    /// # Panics
    /// Same as [`new`](Self::new).
    pub fn from_raw(adj_ends: &[Edge], dests: &[Node]) -> Self {
        let mut owned_ends = Vec::with_capacity(adj_ends.len());
        owned_ends.par_extend(adj_ends.par_iter().copied());
        let mut owned_dests = Vec::with_capacity(dests.len());
        owned_dests.par_extend(dests.par_iter().copied());
        Self::new(owned_ends, owned_dests)
    }

    /// Builds a topology from `(src, dst)` pairs.
    ///
    /// Edges of the same source keep their input order.
    ///
    /// # Panics
    /// Panics if any endpoint is `>= num_nodes`.
    pub fn from_edge_list(num_nodes: usize, edge_list: &[(Node, Node)]) -> Self {
        let mut adj_ends = vec![0 as Edge; num_nodes];
        for &(src, dst) in edge_list {
            assert!(
                (src as usize) < num_nodes && (dst as usize) < num_nodes,
                "edge {src}->{dst} is out of bounds for n={num_nodes}"
            );
            adj_ends[src as usize] += 1;
        }
        let mut acc = 0;
        let mut cursors = Vec::with_capacity(num_nodes);
        for end in &mut adj_ends {
            cursors.push(acc);
            acc += *end;
            *end = acc;
        }

        let mut dests = vec![0 as Node; edge_list.len()];
        for &(src, dst) in edge_list {
            let slot = &mut cursors[src as usize];
            dests[*slot as usize] = dst;
            *slot += 1;
        }
        Self::new(adj_ends, dests)
    }

    /// Deep copy, done in parallel.
    pub fn copy(&self) -> Self {
        Self::from_raw(&self.adj_ends, &self.dests)
    }

    /// Validates the CSR invariants.
    ///
    /// # Errors
    /// Returns [`TopologyError::Malformed`] if end offsets decrease, the last
    /// offset differs from the number of edges, or a destination is not a node.
    pub fn check(&self) -> Result<()> {
        let n = self.adj_ends.len();
        let m = self.dests.len() as Edge;

        if let Some(i) = self.adj_ends.par_windows(2).position_any(|w| w[0] > w[1]) {
            return Err(TopologyError::Malformed(format!(
                "adjacency end of node {} ({}) is past that of node {} ({})",
                i,
                self.adj_ends[i],
                i + 1,
                self.adj_ends[i + 1]
            )));
        }

        let last = self.adj_ends.last().copied().unwrap_or(0);
        if last != m {
            return Err(TopologyError::Malformed(format!(
                "adjacency ends at {last} but there are {m} edges"
            )));
        }

        if let Some(e) = self.dests.par_iter().position_any(|&d| d as usize >= n) {
            return Err(TopologyError::Malformed(format!(
                "edge {e} points to node {}, but there are only {n} nodes",
                self.dests[e]
            )));
        }
        Ok(())
    }

    /// Number of nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.adj_ends.len()
    }

    /// Number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.dests.len()
    }

    /// Returns `true` if there are no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adj_ends.is_empty()
    }

    /// Edge ids of `node`'s out-edges.
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    #[inline]
    pub fn edges(&self, node: Node) -> Range<Edge> {
        let n = node as usize;
        let begin = if n == 0 { 0 } else { self.adj_ends[n - 1] };
        begin..self.adj_ends[n]
    }

    /// Destination of `edge`.
    ///
    /// # Panics
    /// Panics if `edge` is out of bounds.
    #[inline]
    pub fn edge_dest(&self, edge: Edge) -> Node {
        self.dests[edge as usize]
    }

    /// Out-degree of `node`.
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    #[inline]
    pub fn degree(&self, node: Node) -> usize {
        let range = self.edges(node);
        (range.end - range.start) as usize
    }

    /// All node ids.
    #[inline]
    pub fn all_nodes(&self) -> Range<Node> {
        0..self.num_nodes() as Node
    }

    /// All edge ids.
    #[inline]
    pub fn all_edges(&self) -> Range<Edge> {
        0..self.num_edges() as Edge
    }

    /// The end-offset array.
    #[inline]
    pub fn adj_ends(&self) -> &[Edge] {
        &self.adj_ends
    }

    /// The destination array.
    #[inline]
    pub fn dests(&self) -> &[Node] {
        &self.dests
    }

    /// Destinations of the edges in `range`.
    #[inline]
    pub(crate) fn dests_in(&self, range: Range<Edge>) -> &[Node] {
        &self.dests[range.start as usize..range.end as usize]
    }

    /// The sub-range of `range` whose destination is `dst`.
    ///
    /// The destinations in `range` must be non-decreasing. Returns the empty
    /// range `range.end..range.end` when `dst` does not occur.
    pub(crate) fn dest_equal_range(&self, range: Range<Edge>, dst: Node) -> Range<Edge> {
        let dests = self.dests_in(range.clone());
        debug_assert!(
            dests.windows(2).all(|w| w[0] <= w[1]),
            "edge range {range:?} is not sorted by destination"
        );
        let lo = dests.partition_point(|&d| d < dst);
        if dests.get(lo) != Some(&dst) {
            return range.end..range.end;
        }
        let hi = lo + dests[lo..].partition_point(|&d| d == dst);
        range.start + lo as Edge..range.start + hi as Edge
    }

    /// Structural equality; same as `==`.
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Consumes the topology and returns `(adj_ends, dests)`.
    pub fn into_parts(self) -> (Vec<Edge>, Vec<Node>) {
        (self.adj_ends, self.dests)
    }
}

impl Topology for GraphTopology {
    #[inline]
    fn csr(&self) -> &GraphTopology {
        self
    }
}

impl fmt::Debug for GraphTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphTopology")
            .field("num_nodes", &self.num_nodes())
            .field("num_edges", &self.num_edges())
            .finish()
    }
}

/// One line per node: `node 3: [4, 7]`.
impl fmt::Display for GraphTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.all_nodes() {
            write!(f, "node {node}: [")?;
            for (i, edge) in self.edges(node).enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", self.edge_dest(edge))?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
