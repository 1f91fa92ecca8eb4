//! Marker types naming the views a [`PGViewCache`] can produce.
//!
//! ```ignore
//! let view = cache.build_view::<EdgesSortedByDestID, _>(&graph)?;
//! let e = view.find_edge(src, dst);
//! ```

use crate::error::Result;
use crate::graph::GraphSource;
use crate::types::{EdgeSortKind, NodeSortKind, TransposeKind};
use crate::view::{
    BiDirTopology, EdgeTypeAwareBiDirTopology, EdgesSortedByDestTopology,
    NodesSortedByDegreeEdgesSortedByDestIDTopology, PGViewCache, PropertyGraphView,
    SimpleBiDirTopology, SortedTopology,
};

/// How to build and look up one kind of view.
pub trait ViewKind {
    /// The view borrowed from the cache.
    type View<'a, G: GraphSource + 'a>;

    /// Builds whatever the view needs that is not cached yet, then returns it.
    ///
    /// # Errors
    /// Propagates errors from building the edge type map.
    fn build<'a, G: GraphSource>(
        graph: &'a G,
        cache: &'a mut PGViewCache,
    ) -> Result<Self::View<'a, G>>;

    /// Returns the view if everything it needs is already cached.
    fn lookup<'a, G: GraphSource>(
        graph: &'a G,
        cache: &'a PGViewCache,
    ) -> Option<Self::View<'a, G>>;
}

/// Out-edges from the original topology, in-edges from a cached transpose.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiDirectional;

/// Original node ids with every node's edges sorted by destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgesSortedByDestID;

/// Per-type out- and in-edge ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTypeAwareBiDir;

/// Nodes renumbered by ascending degree, edges sorted by destination.
///
/// Built on the transposed edges, so a node's degree is its in-degree in the
/// original graph and its "edges" are its in-edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodesSortedByDegreeEdgesSortedByDestID;

/// View produced by [`BiDirectional`].
pub type BiDirectionalView<'a, G> = PropertyGraphView<'a, G, SimpleBiDirTopology<'a>>;

/// View produced by [`EdgesSortedByDestID`].
pub type EdgesSortedByDestIDView<'a, G> =
    PropertyGraphView<'a, G, EdgesSortedByDestTopology<'a>>;

/// View produced by [`EdgeTypeAwareBiDir`].
pub type EdgeTypeAwareBiDirView<'a, G> =
    PropertyGraphView<'a, G, EdgeTypeAwareBiDirTopology<'a>>;

/// View produced by [`NodesSortedByDegreeEdgesSortedByDestID`].
pub type NodesSortedByDegreeEdgesSortedByDestIDView<'a, G> =
    PropertyGraphView<'a, G, NodesSortedByDegreeEdgesSortedByDestIDTopology<'a>>;

const DEGREE_SORTED_TRANSPOSE: TransposeKind = TransposeKind::Yes;

impl ViewKind for BiDirectional {
    type View<'a, G: GraphSource + 'a> = BiDirectionalView<'a, G>;

    fn build<'a, G: GraphSource>(
        graph: &'a G,
        cache: &'a mut PGViewCache,
    ) -> Result<Self::View<'a, G>> {
        let handle =
            cache.build_or_get_edge_shuff_topo(graph, TransposeKind::Yes, EdgeSortKind::Any);
        let cache: &'a PGViewCache = cache;
        let topo = BiDirTopology::new(graph.topology(), cache.edge_shuffle(handle));
        Ok(PropertyGraphView::new(graph, topo))
    }

    fn lookup<'a, G: GraphSource>(
        graph: &'a G,
        cache: &'a PGViewCache,
    ) -> Option<Self::View<'a, G>> {
        let handle = cache.find_edge_shuff_topo(TransposeKind::Yes, EdgeSortKind::Any)?;
        let topo = BiDirTopology::new(graph.topology(), cache.edge_shuffle(handle));
        Some(PropertyGraphView::new(graph, topo))
    }
}

impl ViewKind for EdgesSortedByDestID {
    type View<'a, G: GraphSource + 'a> = EdgesSortedByDestIDView<'a, G>;

    fn build<'a, G: GraphSource>(
        graph: &'a G,
        cache: &'a mut PGViewCache,
    ) -> Result<Self::View<'a, G>> {
        let handle =
            cache.build_or_get_edge_shuff_topo(graph, TransposeKind::No, EdgeSortKind::ByDestID);
        let cache: &'a PGViewCache = cache;
        let topo = SortedTopology::new(cache.edge_shuffle(handle));
        Ok(PropertyGraphView::new(graph, topo))
    }

    fn lookup<'a, G: GraphSource>(
        graph: &'a G,
        cache: &'a PGViewCache,
    ) -> Option<Self::View<'a, G>> {
        let handle = cache.find_edge_shuff_topo(TransposeKind::No, EdgeSortKind::ByDestID)?;
        let topo = SortedTopology::new(cache.edge_shuffle(handle));
        Some(PropertyGraphView::new(graph, topo))
    }
}

impl ViewKind for EdgeTypeAwareBiDir {
    type View<'a, G: GraphSource + 'a> = EdgeTypeAwareBiDirView<'a, G>;

    fn build<'a, G: GraphSource>(
        graph: &'a G,
        cache: &'a mut PGViewCache,
    ) -> Result<Self::View<'a, G>> {
        let out_handle = cache.build_or_get_edge_type_aware_topo(graph, TransposeKind::No)?;
        let in_handle = cache.build_or_get_edge_type_aware_topo(graph, TransposeKind::Yes)?;
        let cache: &'a PGViewCache = cache;
        let topo = EdgeTypeAwareBiDirTopology::new(
            cache.edge_type_aware(out_handle),
            cache.edge_type_aware(in_handle),
        );
        Ok(PropertyGraphView::new(graph, topo))
    }

    fn lookup<'a, G: GraphSource>(
        graph: &'a G,
        cache: &'a PGViewCache,
    ) -> Option<Self::View<'a, G>> {
        let out_handle = cache.find_edge_type_aware_topo(TransposeKind::No)?;
        let in_handle = cache.find_edge_type_aware_topo(TransposeKind::Yes)?;
        let topo = EdgeTypeAwareBiDirTopology::new(
            cache.edge_type_aware(out_handle),
            cache.edge_type_aware(in_handle),
        );
        Some(PropertyGraphView::new(graph, topo))
    }
}

impl ViewKind for NodesSortedByDegreeEdgesSortedByDestID {
    type View<'a, G: GraphSource + 'a> = NodesSortedByDegreeEdgesSortedByDestIDView<'a, G>;

    fn build<'a, G: GraphSource>(
        graph: &'a G,
        cache: &'a mut PGViewCache,
    ) -> Result<Self::View<'a, G>> {
        let handle = cache.build_or_get_shuff_topo(
            graph,
            DEGREE_SORTED_TRANSPOSE,
            NodeSortKind::ByDegree,
            EdgeSortKind::ByDestID,
        );
        let cache: &'a PGViewCache = cache;
        Ok(PropertyGraphView::new(graph, SortedTopology::new(cache.shuffle(handle))))
    }

    fn lookup<'a, G: GraphSource>(
        graph: &'a G,
        cache: &'a PGViewCache,
    ) -> Option<Self::View<'a, G>> {
        let handle = cache.find_shuff_topo(
            DEGREE_SORTED_TRANSPOSE,
            NodeSortKind::ByDegree,
            EdgeSortKind::ByDestID,
        )?;
        Some(PropertyGraphView::new(graph, SortedTopology::new(cache.shuffle(handle))))
    }
}
