//! Memoisation of derived topologies.
//!
//! The cache owns three append-only arenas plus the (single) edge type map.
//! Lookups walk an arena for a valid entry whose layout state satisfies the
//! request; a miss builds the topology, appends it and returns its handle.
//! Entries are never removed, only invalidated, so handles stay usable for
//! the life of the cache.
//!
//! Building takes `&mut self`, reading views takes `&self`: the borrow checker
//! guarantees no view outlives or observes a concurrent build.

use std::sync::Arc;

use rayon::ThreadPool;
use tracing::{debug, trace};

use crate::config::ViewCacheConfig;
use crate::error::Result;
use crate::graph::GraphSource;
use crate::topology::{
    CondensedTypeIDMap, EdgeShuffleTopology, EdgeTypeAwareTopology, GraphTopology,
    ShuffleTopology, ShuffledEdges, Topology,
};
use crate::types::{EdgeSortKind, NodeSortKind, TransposeKind};
use crate::view::ViewKind;

/// Position of an [`EdgeShuffleTopology`] in a [`PGViewCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeShuffleHandle(usize);

/// Position of a [`ShuffleTopology`] in a [`PGViewCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShuffleHandle(usize);

/// Position of an [`EdgeTypeAwareTopology`] in a [`PGViewCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeTypeAwareHandle(usize);

/// Builds derived topologies of one graph on demand and keeps them for reuse.
///
/// A cache belongs to a single graph; pass the same graph to every call.
#[derive(Debug, Default)]
pub struct PGViewCache {
    edge_shuff_topos: Vec<Arc<EdgeShuffleTopology>>,
    fully_shuff_topos: Vec<ShuffleTopology>,
    edge_type_aware_topos: Vec<EdgeTypeAwareTopology>,
    edge_type_id_map: Option<Arc<CondensedTypeIDMap>>,
    pool: Option<ThreadPool>,
}

impl PGViewCache {
    /// Creates an empty cache building on rayon's global pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache configured by `config`.
    ///
    /// # Errors
    /// Returns [`TopologyError::ThreadPool`](crate::TopologyError::ThreadPool)
    /// if a dedicated pool was requested and could not be started.
    pub fn with_config(config: &ViewCacheConfig) -> Result<Self> {
        Ok(Self {
            pool: config.build_pool()?,
            ..Self::default()
        })
    }

    /// Builds (or reuses) the topologies behind view `V` and returns the view.
    ///
    /// # Errors
    /// Propagates errors from building the edge type map.
    pub fn build_view<'a, V: ViewKind, G: GraphSource>(
        &'a mut self,
        graph: &'a G,
    ) -> Result<V::View<'a, G>> {
        V::build(graph, self)
    }

    /// Returns view `V` if everything it needs is already cached.
    pub fn view<'a, V: ViewKind, G: GraphSource>(
        &'a self,
        graph: &'a G,
    ) -> Option<V::View<'a, G>> {
        V::lookup(graph, self)
    }

    /// The graph's own topology.
    pub fn original_topology<'g, G: GraphSource>(&self, graph: &'g G) -> &'g GraphTopology {
        graph.topology()
    }

    /// Returns the edge type map, building it on first use.
    ///
    /// # Errors
    /// Returns [`TopologyError::TooManyTypes`](crate::TopologyError::TooManyTypes)
    /// if the graph has more distinct edge types than can be indexed.
    pub fn build_or_get_edge_type_index<G: GraphSource>(
        &mut self,
        graph: &G,
    ) -> Result<Arc<CondensedTypeIDMap>> {
        if let Some(map) = self.edge_type_id_map.as_ref().filter(|m| m.is_valid()) {
            trace!("edge type map cache hit");
            return Ok(Arc::clone(map));
        }
        let map = Arc::new(self.run(|| CondensedTypeIDMap::make_from_edge_types(graph))?);
        debug!(types = map.num_unique_types(), "built edge type map");
        self.edge_type_id_map = Some(Arc::clone(&map));
        Ok(map)
    }

    /// Returns a valid edge shuffle with the requested layout, building it on
    /// a miss.
    ///
    /// # Panics
    /// Panics if `sort` is [`EdgeSortKind::ByNodeType`] and nothing is cached.
    pub fn build_or_get_edge_shuff_topo<G: GraphSource>(
        &mut self,
        graph: &G,
        transpose: TransposeKind,
        sort: EdgeSortKind,
    ) -> EdgeShuffleHandle {
        if let Some(handle) = self.find_edge_shuff_topo(transpose, sort) {
            trace!(%transpose, %sort, "edge-shuffled topology cache hit");
            return handle;
        }
        let topo = self.run(|| EdgeShuffleTopology::make(graph, transpose, sort));
        debug!(
            %transpose,
            %sort,
            nodes = topo.num_nodes(),
            edges = topo.num_edges(),
            "built edge-shuffled topology"
        );
        self.edge_shuff_topos.push(Arc::new(topo));
        EdgeShuffleHandle(self.edge_shuff_topos.len() - 1)
    }

    /// Returns a valid node-and-edge shuffle with the requested layout,
    /// building it (and its seed edge shuffle) on a miss.
    ///
    /// # Panics
    /// Panics if `edge_sort` is [`EdgeSortKind::ByNodeType`] and nothing is cached.
    pub fn build_or_get_shuff_topo<G: GraphSource>(
        &mut self,
        graph: &G,
        transpose: TransposeKind,
        node_sort: NodeSortKind,
        edge_sort: EdgeSortKind,
    ) -> ShuffleHandle {
        if let Some(handle) = self.find_shuff_topo(transpose, node_sort, edge_sort) {
            trace!(%transpose, %node_sort, %edge_sort, "shuffled topology cache hit");
            return handle;
        }
        let seed_handle = self.build_or_get_edge_shuff_topo(graph, transpose, edge_sort);
        let seed = Arc::clone(&self.edge_shuff_topos[seed_handle.0]);
        let topo =
            self.run(|| ShuffleTopology::make_from_topo(graph, &seed, node_sort, edge_sort));
        debug!(
            %transpose,
            %node_sort,
            %edge_sort,
            nodes = topo.num_nodes(),
            edges = topo.num_edges(),
            "built shuffled topology"
        );
        self.fully_shuff_topos.push(topo);
        ShuffleHandle(self.fully_shuff_topos.len() - 1)
    }

    /// Returns a valid edge type index with direction `transpose`, building
    /// the type map and a type-sorted edge shuffle as needed.
    ///
    /// # Errors
    /// Propagates errors from [`build_or_get_edge_type_index`](Self::build_or_get_edge_type_index).
    pub fn build_or_get_edge_type_aware_topo<G: GraphSource>(
        &mut self,
        graph: &G,
        transpose: TransposeKind,
    ) -> Result<EdgeTypeAwareHandle> {
        if let Some(handle) = self.find_edge_type_aware_topo(transpose) {
            trace!(%transpose, "edge type aware topology cache hit");
            return Ok(handle);
        }
        let type_map = self.build_or_get_edge_type_index(graph)?;
        let seed_handle =
            self.build_or_get_edge_shuff_topo(graph, transpose, EdgeSortKind::ByEdgeType);
        let seed = Arc::clone(&self.edge_shuff_topos[seed_handle.0]);
        let topo = self.run(|| EdgeTypeAwareTopology::make_from(graph, type_map, seed));
        debug!(
            %transpose,
            nodes = topo.num_nodes(),
            types = topo.distinct_edge_types().len(),
            "built edge type aware topology"
        );
        self.edge_type_aware_topos.push(topo);
        Ok(EdgeTypeAwareHandle(self.edge_type_aware_topos.len() - 1))
    }

    /// A cached, valid edge shuffle with direction `transpose` whose edges
    /// satisfy `sort`.
    pub fn find_edge_shuff_topo(
        &self,
        transpose: TransposeKind,
        sort: EdgeSortKind,
    ) -> Option<EdgeShuffleHandle> {
        self.edge_shuff_topos
            .iter()
            .position(|t| {
                t.is_valid() && t.has_transpose_state(transpose) && t.has_edges_sorted_by(sort)
            })
            .map(EdgeShuffleHandle)
    }

    /// A cached, valid shuffle with direction `transpose` whose nodes satisfy
    /// `node_sort` and whose edges satisfy `edge_sort`.
    pub fn find_shuff_topo(
        &self,
        transpose: TransposeKind,
        node_sort: NodeSortKind,
        edge_sort: EdgeSortKind,
    ) -> Option<ShuffleHandle> {
        self.fully_shuff_topos
            .iter()
            .position(|t| {
                t.is_valid()
                    && t.has_transpose_state(transpose)
                    && t.has_edges_sorted_by(edge_sort)
                    && t.has_nodes_sorted_by(node_sort)
            })
            .map(ShuffleHandle)
    }

    /// A cached, valid edge type index with direction `transpose`.
    pub fn find_edge_type_aware_topo(
        &self,
        transpose: TransposeKind,
    ) -> Option<EdgeTypeAwareHandle> {
        self.edge_type_aware_topos
            .iter()
            .position(|t| t.is_valid() && t.has_transpose_state(transpose))
            .map(EdgeTypeAwareHandle)
    }

    /// The edge shuffle behind `handle`.
    ///
    /// # Panics
    /// Panics if `handle` came from another cache with more entries.
    #[inline]
    pub fn edge_shuffle(&self, handle: EdgeShuffleHandle) -> &EdgeShuffleTopology {
        &self.edge_shuff_topos[handle.0]
    }

    /// The shuffle behind `handle`.
    ///
    /// # Panics
    /// Panics if `handle` came from another cache with more entries.
    #[inline]
    pub fn shuffle(&self, handle: ShuffleHandle) -> &ShuffleTopology {
        &self.fully_shuff_topos[handle.0]
    }

    /// The edge type index behind `handle`.
    ///
    /// # Panics
    /// Panics if `handle` came from another cache with more entries.
    #[inline]
    pub fn edge_type_aware(&self, handle: EdgeTypeAwareHandle) -> &EdgeTypeAwareTopology {
        &self.edge_type_aware_topos[handle.0]
    }

    /// The edge type map, if it has been built.
    pub fn edge_type_index(&self) -> Option<&CondensedTypeIDMap> {
        self.edge_type_id_map.as_deref()
    }

    /// Invalidates every cached topology and the type map; later requests
    /// rebuild them.
    pub fn invalidate_all(&mut self) {
        for topo in &self.edge_shuff_topos {
            topo.invalidate();
        }
        for topo in &self.fully_shuff_topos {
            topo.invalidate();
        }
        if let Some(map) = &self.edge_type_id_map {
            map.invalidate();
        }
        debug!(
            edge_shuffled = self.edge_shuff_topos.len(),
            shuffled = self.fully_shuff_topos.len(),
            edge_type_aware = self.edge_type_aware_topos.len(),
            "invalidated view cache"
        );
    }

    /// Number of edge shuffles held, valid or not.
    pub fn num_edge_shuff_topos(&self) -> usize {
        self.edge_shuff_topos.len()
    }

    /// Number of shuffles held, valid or not.
    pub fn num_shuff_topos(&self) -> usize {
        self.fully_shuff_topos.len()
    }

    /// Number of edge type indices held, valid or not.
    pub fn num_edge_type_aware_topos(&self) -> usize {
        self.edge_type_aware_topos.len()
    }

    /// Runs `build` on the dedicated pool if there is one.
    fn run<R, F>(&self, build: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(build),
            None => build(),
        }
    }
}
