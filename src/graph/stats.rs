//! Read-only statistics derived from a snapshot.

use std::collections::BTreeSet;

use serde::Serialize;

use super::types::{GraphEdge, GraphSnapshot};

/// Per-node view used by the info panel when an address is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStats {
    pub total_edges: usize,
    pub neighbor_count: usize,
    pub incoming_count: usize,
    pub outgoing_count: usize,
    /// Distinct addresses connected to the node, sorted.
    pub neighbors: Vec<String>,
    /// Every edge touching the node.
    pub connected_edges: Vec<GraphEdge>,
}

/// Whole-graph counts shown when no address is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub expanded_count: usize,
}

/// Scan `snapshot`'s edges for those touching `address`.
#[must_use]
pub fn node_stats(snapshot: &GraphSnapshot, address: &str) -> NodeStats {
    let connected_edges: Vec<GraphEdge> = snapshot
        .edges()
        .filter(|e| e.source == address || e.target == address)
        .cloned()
        .collect();

    let mut neighbors = BTreeSet::new();
    let mut incoming_count = 0;
    let mut outgoing_count = 0;

    for edge in &connected_edges {
        if edge.source == address {
            outgoing_count += 1;
            neighbors.insert(edge.target.clone());
        }
        if edge.target == address {
            incoming_count += 1;
            neighbors.insert(edge.source.clone());
        }
    }

    NodeStats {
        total_edges: connected_edges.len(),
        neighbor_count: neighbors.len(),
        incoming_count,
        outgoing_count,
        neighbors: neighbors.into_iter().collect(),
        connected_edges,
    }
}
