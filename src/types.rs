//! Identifier types and the layout-state enums shared by every topology.
//!
//! Identifiers are plain integers rather than newtypes: topologies are indexed
//! in tight loops and the arrays are handed to the storage layer verbatim.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Dense node index in `[0, num_nodes)`.
pub type Node = u32;

/// Dense edge index in `[0, num_edges)`.
pub type Edge = u64;

/// Index of a node or edge in the (un-shuffled) property columns.
pub type PropertyIndex = u64;

/// Small type tag of a node or edge ("kind").
pub type EntityType = u8;

/// Dense index assigned to an [`EntityType`] by a
/// [`CondensedTypeIDMap`](crate::topology::CondensedTypeIDMap).
pub type TypeIndex = u8;

/// Direction of the edges stored in a topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransposeKind {
    /// Edges point in their original direction.
    #[default]
    No,
    /// Every edge is reversed.
    Yes,
}

/// Ordering guarantee on the edges within each node's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSortKind {
    /// No ordering guarantee (sorted or not).
    #[default]
    Any,
    /// Non-decreasing destination id.
    #[serde(rename = "by_dest_id")]
    ByDestID,
    /// Non-decreasing edge type, ties by destination id.
    ByEdgeType,
    /// Non-decreasing destination node type. Not implemented.
    ByNodeType,
}

/// Ordering guarantee on the node ids of a fully shuffled topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSortKind {
    /// Node order is unchanged.
    #[default]
    Any,
    /// Non-decreasing degree in the new id order.
    ByDegree,
    /// Non-decreasing node type, ties by original id.
    ByNodeType,
}

impl fmt::Display for TransposeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::No => "original",
            Self::Yes => "transposed",
        })
    }
}

impl fmt::Display for EdgeSortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Any => "any",
            Self::ByDestID => "by-dest-id",
            Self::ByEdgeType => "by-edge-type",
            Self::ByNodeType => "by-node-type",
        })
    }
}

impl fmt::Display for NodeSortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Any => "any",
            Self::ByDegree => "by-degree",
            Self::ByNodeType => "by-node-type",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_serialize_as_snake_case() {
        let json = serde_json::to_string(&EdgeSortKind::ByDestID).unwrap();
        assert_eq!(json, "\"by_dest_id\"");

        let kind: NodeSortKind = serde_json::from_str("\"by_degree\"").unwrap();
        assert_eq!(kind, NodeSortKind::ByDegree);

        let t: TransposeKind = serde_json::from_str("\"yes\"").unwrap();
        assert_eq!(t, TransposeKind::Yes);
    }

    #[test]
    fn test_kinds_default_to_unconstrained() {
        assert_eq!(TransposeKind::default(), TransposeKind::No);
        assert_eq!(EdgeSortKind::default(), EdgeSortKind::Any);
        assert_eq!(NodeSortKind::default(), NodeSortKind::Any);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TransposeKind::Yes.to_string(), "transposed");
        assert_eq!(EdgeSortKind::ByEdgeType.to_string(), "by-edge-type");
        assert_eq!(NodeSortKind::ByNodeType.to_string(), "by-node-type");
    }
}
