//! Graph type definitions for address-graph exploration.
//!
//! Nodes and edges are stored in maps keyed by their identity so that union
//! by key is the only way a snapshot ever grows.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::constants::{DEFAULT_NODE_WEIGHT, INCOMING_COLOR, OUTGOING_COLOR};

// ============================================================================
// GraphNode
// ============================================================================

/// An address in the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// The address; identity key.
    pub id: String,
    /// Label shown by the renderer.
    pub display_name: String,
    /// Rendering size hint, always positive.
    pub weight: f64,
}

impl GraphNode {
    /// Create the default node for an address.
    #[must_use]
    pub fn address(id: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: id.to_string(),
            weight: DEFAULT_NODE_WEIGHT,
        }
    }
}

// ============================================================================
// DirectionColor
// ============================================================================

/// Direction of an edge relative to the address it was built for.
///
/// Serialized as the hex color the renderer draws it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionColor {
    /// Value leaving the expanded address.
    Outgoing,
    /// Value arriving at the expanded address.
    Incoming,
}

impl DirectionColor {
    /// Hex color for this direction.
    #[must_use]
    pub const fn hex(&self) -> &'static str {
        match self {
            Self::Outgoing => OUTGOING_COLOR,
            Self::Incoming => INCOMING_COLOR,
        }
    }
}

impl Serialize for DirectionColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}

// ============================================================================
// GraphEdge
// ============================================================================

/// Identity of an edge: one transaction between one ordered address pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub source: String,
    pub target: String,
    pub transaction_hash: String,
}

/// A directed value transfer observed in one transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    /// Sending address.
    pub source: String,
    /// Receiving address.
    pub target: String,
    /// Value in BTC.
    pub value: f64,
    /// Transaction that produced the edge.
    pub transaction_hash: String,
    /// Direction relative to the expanded address.
    pub direction_color: DirectionColor,
}

impl GraphEdge {
    /// The identity key of this edge.
    #[must_use]
    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            source: self.source.clone(),
            target: self.target.clone(),
            transaction_hash: self.transaction_hash.clone(),
        }
    }
}

// ============================================================================
// GraphSnapshot
// ============================================================================

/// Counts of what a merge actually added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub nodes_added: usize,
    pub edges_added: usize,
}

/// A set of nodes and edges where every edge endpoint is a node.
///
/// Insertion is first-wins for both nodes and edges: a later value with an
/// existing key is discarded, never merged into the stored one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSnapshot {
    nodes: BTreeMap<String, GraphNode>,
    edges: BTreeMap<EdgeKey, GraphEdge>,
}

impl GraphSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node unless one with the same id exists. Returns whether it
    /// was inserted.
    pub fn insert_node(&mut self, node: GraphNode) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        self.nodes.insert(node.id.clone(), node);
        true
    }

    /// Insert an edge unless one with the same key exists, adding default
    /// nodes for any missing endpoint. Returns whether the edge was inserted.
    pub fn insert_edge(&mut self, edge: GraphEdge) -> bool {
        let key = edge.key();
        if self.edges.contains_key(&key) {
            return false;
        }
        self.insert_node(GraphNode::address(&edge.source));
        self.insert_node(GraphNode::address(&edge.target));
        self.edges.insert(key, edge);
        true
    }

    /// Fold `incoming` into this snapshot by key union.
    ///
    /// Nodes go first so an incoming node's attributes win over the default
    /// node an edge would otherwise create for its endpoint.
    pub fn merge_from(&mut self, incoming: GraphSnapshot) -> MergeStats {
        let mut stats = MergeStats::default();

        for node in incoming.nodes.into_values() {
            if self.insert_node(node) {
                stats.nodes_added += 1;
            }
        }
        for edge in incoming.edges.into_values() {
            if self.insert_edge(edge) {
                stats.edges_added += 1;
            }
        }

        stats
    }

    #[cfg(test)]
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    #[cfg(test)]
    #[must_use]
    pub fn contains_edge(&self, key: &EdgeKey) -> bool {
        self.edges.contains_key(key)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.values()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Renderer-facing shape: plain node and edge arrays.
#[derive(Serialize)]
struct RenderGraph<'a> {
    nodes: Vec<&'a GraphNode>,
    edges: Vec<&'a GraphEdge>,
}

impl Serialize for GraphSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RenderGraph {
            nodes: self.nodes().collect(),
            edges: self.edges().collect(),
        }
        .serialize(serializer)
    }
}

// ============================================================================
// Tests
// ============================================================================
