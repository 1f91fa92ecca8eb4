//! Recoverable errors.
//!
//! Only conditions a caller can act on live here. Broken CSR invariants and
//! calls that violate a layout precondition (e.g. binary search on unsorted
//! edges) are programming errors and panic instead.

use thiserror::Error;

/// Errors surfaced by topology construction, blob decoding and configuration.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// More distinct entity types than a [`TypeIndex`](crate::TypeIndex) can
    /// address (one value is reserved as a sentinel).
    #[error("found {found} distinct entity types, at most {max} can be indexed")]
    TooManyTypes {
        /// Number of distinct types observed.
        found: usize,
        /// Largest supported number of distinct types.
        max: usize,
    },

    /// The topology blob ended before the data its header declares.
    #[error("topology blob too short: {actual} bytes, expected at least {expected}")]
    Truncated {
        /// Bytes available.
        actual: usize,
        /// Bytes required.
        expected: usize,
    },

    /// The topology blob declares a format version this crate cannot read.
    #[error("unsupported topology blob version {0}")]
    UnsupportedVersion(u64),

    /// The adjacency arrays violate a CSR invariant.
    #[error("malformed topology: {0}")]
    Malformed(String),

    /// A per-entity column does not have one entry per node or edge.
    #[error("{what} column has {actual} entries, expected {expected}")]
    ColumnLength {
        /// Which column ("node type", "edge type").
        what: &'static str,
        /// Entries provided.
        actual: usize,
        /// Entries required.
        expected: usize,
    },

    /// The cache configuration could not be parsed.
    #[error("invalid view cache configuration")]
    Config(#[from] serde_json::Error),

    /// The dedicated worker pool could not be started.
    #[error("failed to build worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Writing a topology blob failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = TopologyError> = core::result::Result<T, E>;
