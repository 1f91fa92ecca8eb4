//! Binary topology blobs.
//!
//! Layout (native-endian words, 8-byte aligned):
//!
//! | Offset | Type | Content |
//! |--------|------|---------|
//! | 0 | `u64` | format version (`1`) |
//! | 8 | `u64` | size of per-edge data (written `0`, ignored on read) |
//! | 16 | `u64` | `num_nodes` |
//! | 24 | `u64` | `num_edges` |
//! | 32 | `u64[num_nodes]` | `adj_ends` |
//! | .. | `u32[num_edges]` | `dests` |
//! | .. | `u32` | zero padding, only if `num_edges` is odd |
//!
//! The trailing pad is written but not required when reading.

use std::io::Write;

use rayon::prelude::*;
use zerocopy::{AsBytes, FromBytes};

use crate::error::{Result, TopologyError};
use crate::topology::GraphTopology;
use crate::types::{Edge, Node};

/// Format version written and accepted by this module.
pub const TOPOLOGY_FORMAT_VERSION: u64 = 1;

const HEADER_LEN: usize = 4 * core::mem::size_of::<u64>();
const EDGE_WORD: usize = core::mem::size_of::<Edge>();
const NODE_WORD: usize = core::mem::size_of::<Node>();

/// Size of the blob for the given counts, including the trailing pad.
pub fn encoded_len(num_nodes: usize, num_edges: usize) -> usize {
    HEADER_LEN + num_nodes * EDGE_WORD + num_edges * NODE_WORD + (num_edges % 2) * NODE_WORD
}

/// Decodes a topology blob.
///
/// # Errors
/// - [`TopologyError::Truncated`] if `bytes` is shorter than its header declares
/// - [`TopologyError::UnsupportedVersion`] for any version other than `1`
/// - [`TopologyError::Malformed`] if the counts do not fit in memory or the
///   arrays violate a CSR invariant
pub fn read_topology(bytes: &[u8]) -> Result<GraphTopology> {
    let header = bytes.get(..HEADER_LEN).ok_or(TopologyError::Truncated {
        actual: bytes.len(),
        expected: HEADER_LEN,
    })?;
    let [version, _edge_data_size, num_nodes, num_edges] = read_header(header);

    if version != TOPOLOGY_FORMAT_VERSION {
        return Err(TopologyError::UnsupportedVersion(version));
    }
    let num_nodes = count(num_nodes, "node")?;
    let num_edges = count(num_edges, "edge")?;

    let adj_len = num_nodes
        .checked_mul(EDGE_WORD)
        .ok_or_else(|| TopologyError::Malformed(format!("{num_nodes} nodes overflow")))?;
    let dest_len = num_edges
        .checked_mul(NODE_WORD)
        .ok_or_else(|| TopologyError::Malformed(format!("{num_edges} edges overflow")))?;
    let expected = HEADER_LEN.saturating_add(adj_len).saturating_add(dest_len);
    if bytes.len() < expected {
        return Err(TopologyError::Truncated {
            actual: bytes.len(),
            expected,
        });
    }

    let adj_bytes = &bytes[HEADER_LEN..HEADER_LEN + adj_len];
    let dest_bytes = &bytes[HEADER_LEN + adj_len..expected];
    let adj_ends: Vec<Edge> = adj_bytes
        .par_chunks_exact(EDGE_WORD)
        .map(|word| Edge::read_from(word).unwrap_or_default())
        .collect();
    let dests: Vec<Node> = dest_bytes
        .par_chunks_exact(NODE_WORD)
        .map(|word| Node::read_from(word).unwrap_or_default())
        .collect();

    let topo = GraphTopology { adj_ends, dests };
    topo.check()?;
    Ok(topo)
}

/// Writes `topo` as a blob.
///
/// # Errors
/// Propagates any error from `writer`.
pub fn write_topology<W: Write>(topo: &GraphTopology, mut writer: W) -> Result<()> {
    writer.write_all(header_of(topo).as_bytes())?;
    writer.write_all(topo.adj_ends().as_bytes())?;
    writer.write_all(topo.dests().as_bytes())?;
    if topo.num_edges() % 2 == 1 {
        writer.write_all(&[0u8; NODE_WORD])?;
    }
    writer.flush()?;
    Ok(())
}

/// Encodes `topo` into a new buffer.
pub fn topology_to_bytes(topo: &GraphTopology) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(topo.num_nodes(), topo.num_edges()));
    buf.extend_from_slice(header_of(topo).as_bytes());
    buf.extend_from_slice(topo.adj_ends().as_bytes());
    buf.extend_from_slice(topo.dests().as_bytes());
    if topo.num_edges() % 2 == 1 {
        buf.extend_from_slice(&[0u8; NODE_WORD]);
    }
    buf
}

fn header_of(topo: &GraphTopology) -> [u64; 4] {
    [
        TOPOLOGY_FORMAT_VERSION,
        0,
        topo.num_nodes() as u64,
        topo.num_edges() as u64,
    ]
}

fn read_header(header: &[u8]) -> [u64; 4] {
    let mut words = [0u64; 4];
    for (word, chunk) in words.iter_mut().zip(header.chunks_exact(EDGE_WORD)) {
        *word = u64::read_from(chunk).unwrap_or_default();
    }
    words
}

fn count(value: u64, what: &str) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| TopologyError::Malformed(format!("{value} {what}s do not fit in memory")))
}
