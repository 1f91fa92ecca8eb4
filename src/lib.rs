//! # `pgtopo` - Property Graph Topology Engine
//!
//! Immutable CSR topologies for property graphs, plus the derived layouts
//! graph algorithms ask for: transposed edges, edges sorted by destination or
//! type, nodes renumbered by degree or type, and O(1) per-edge-type ranges.
//! Derived layouts are built in parallel on demand and memoised in a
//! [`PGViewCache`].
//!
//! ## Architecture
//!
//! ### Core Abstractions
//!
//! 1. **Base topology** ([`GraphTopology`]):
//!    - `adj_ends[n]` is the exclusive end of node `n`'s edge range
//!    - `dests[e]` is the destination of edge `e`
//!    - Never mutated after construction
//!
//! 2. **Derived topologies** ([`topology`]):
//!    - [`EdgeShuffleTopology`]: edges transposed and/or sorted, with the
//!      original id of every edge
//!    - [`ShuffleTopology`]: nodes renumbered too, with the original id of
//!      every node
//!    - [`EdgeTypeAwareTopology`]: type-sorted edges plus a `node × type`
//!      range index over a [`CondensedTypeIDMap`]
//!
//! 3. **Views** ([`view`]):
//!    - Borrowed wrappers combining cached topologies (bidirectional, sorted,
//!      type-aware), selected by a [`ViewKind`] marker type
//!
//! ### Layout state
//!
//! Every derived topology records its [`TransposeKind`], [`EdgeSortKind`] and
//! (for node shuffles) [`NodeSortKind`]. The cache hands out an entry only if
//! its state satisfies the request; `Any` is satisfied by every state.
//!
//! ## Usage
//!
//! ```
//! use pgtopo::view::kinds::EdgesSortedByDestID;
//! use pgtopo::{PGViewCache, PropertyGraph, Topology};
//!
//! let graph = PropertyGraph::from_edge_list(3, &[(0, 2), (0, 1), (1, 2)]);
//! let mut cache = PGViewCache::new();
//! let view = cache.build_view::<EdgesSortedByDestID, _>(&graph)?;
//!
//! let e = view.find_edge(0, 2).unwrap();
//! assert_eq!(view.edge_dest(e), 2);
//! assert_eq!(view.edge_property_index(e), 0);
//! # Ok::<(), pgtopo::TopologyError>(())
//! ```
//!
//! ## Concurrency
//!
//! Builds run on rayon (a dedicated pool if [`ViewCacheConfig`] asks for one).
//! Finished topologies are immutable and `Sync`; only their validity flag is
//! atomic.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_panics_doc)]

pub mod algorithms;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod graph;
pub mod io;
pub mod topology;
pub mod types;
pub mod view;

pub use config::ViewCacheConfig;
pub use error::{Result, TopologyError};
pub use graph::{GraphSource, PropertyGraph};
pub use topology::{
    CondensedTypeIDMap, EdgeShuffleTopology, EdgeTypeAwareTopology, GraphTopology,
    ShuffleTopology, ShuffledEdges, Topology,
};
pub use types::{
    Edge, EdgeSortKind, EntityType, Node, NodeSortKind, PropertyIndex, TransposeKind, TypeIndex,
};
pub use view::{PGViewCache, PropertyGraphView, ViewKind};

/// Traits needed to traverse any topology or view.
pub mod prelude {
    pub use crate::graph::GraphSource;
    pub use crate::topology::{ShuffledEdges, Topology};
    pub use crate::view::ViewKind;
}

// Compile-time assertions for the on-disk and in-memory layout
const _: () = {
    use core::mem;

    // Blob words: edges are u64 offsets, destinations u32.
    assert!(mem::size_of::<Edge>() == 8);
    assert!(mem::size_of::<Node>() == 4);

    // One sentinel value must stay free for an unindexed type.
    assert!(mem::size_of::<TypeIndex>() == mem::size_of::<EntityType>());
    assert!(topology::type_map::MAX_UNIQUE_TYPES < (TypeIndex::MAX as usize) + 1);

    // Handles are plain indices.
    assert!(mem::size_of::<view::EdgeShuffleHandle>() == mem::size_of::<usize>());
};
