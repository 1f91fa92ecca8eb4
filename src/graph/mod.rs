//! The property graph seen by topology builders.
//!
//! Builders only need three things from a graph: its base topology and the
//! type tag of every node and edge. [`GraphSource`] captures exactly that, so
//! any storage layer can feed the builders; [`PropertyGraph`] is the in-memory
//! implementation with one type column per entity kind.

use crate::error::{Result, TopologyError};
use crate::topology::GraphTopology;
use crate::types::{EntityType, Node, PropertyIndex};

/// Read access to a graph's topology and entity types.
///
/// Edge types are indexed by *original* edge id (property index), so lookups
/// stay valid for every shuffled topology derived from this graph.
pub trait GraphSource: Sync {
    /// The base (un-shuffled) topology.
    fn topology(&self) -> &GraphTopology;

    /// Type tag of `node`.
    fn type_of_node(&self, node: Node) -> EntityType;

    /// Type tag of the edge with original id `edge`.
    fn type_of_edge(&self, edge: PropertyIndex) -> EntityType;
}

/// A topology with per-node and per-edge type columns.
///
/// New graphs give every entity type `0` until columns are attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyGraph {
    topology: GraphTopology,
    node_types: Vec<EntityType>,
    edge_types: Vec<EntityType>,
}

impl PropertyGraph {
    /// Wraps `topology`, typing every node and edge `0`.
    pub fn new(topology: GraphTopology) -> Self {
        let node_types = vec![0; topology.num_nodes()];
        let edge_types = vec![0; topology.num_edges()];
        Self {
            topology,
            node_types,
            edge_types,
        }
    }

    /// Builds a graph from `(src, dst)` pairs; see
    /// [`GraphTopology::from_edge_list`].
    pub fn from_edge_list(num_nodes: usize, edge_list: &[(Node, Node)]) -> Self {
        Self::new(GraphTopology::from_edge_list(num_nodes, edge_list))
    }

    /// Replaces the node type column.
    ///
    /// # Errors
    /// Returns [`TopologyError::ColumnLength`] unless there is one entry per node.
    pub fn with_node_types(mut self, node_types: Vec<EntityType>) -> Result<Self> {
        check_len("node type", node_types.len(), self.topology.num_nodes())?;
        self.node_types = node_types;
        Ok(self)
    }

    /// Replaces the edge type column.
    ///
    /// # Errors
    /// Returns [`TopologyError::ColumnLength`] unless there is one entry per edge.
    pub fn with_edge_types(mut self, edge_types: Vec<EntityType>) -> Result<Self> {
        check_len("edge type", edge_types.len(), self.topology.num_edges())?;
        self.edge_types = edge_types;
        Ok(self)
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.topology.num_nodes()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.topology.num_edges()
    }

    /// Node type column.
    pub fn node_types(&self) -> &[EntityType] {
        &self.node_types
    }

    /// Edge type column, indexed by original edge id.
    pub fn edge_types(&self) -> &[EntityType] {
        &self.edge_types
    }

    /// Returns `true` if both graphs have the same topology and type columns.
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Drops the type columns.
    pub fn into_topology(self) -> GraphTopology {
        self.topology
    }
}

impl GraphSource for PropertyGraph {
    #[inline]
    fn topology(&self) -> &GraphTopology {
        &self.topology
    }

    #[inline]
    fn type_of_node(&self, node: Node) -> EntityType {
        self.node_types[node as usize]
    }

    #[inline]
    fn type_of_edge(&self, edge: PropertyIndex) -> EntityType {
        self.edge_types[edge as usize]
    }
}

fn check_len(what: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(TopologyError::ColumnLength {
            what,
            actual,
            expected,
        })
    }
}
