//! Cumulative graph and per-address expansion state.

use std::collections::{HashMap, HashSet};

use super::types::{GraphSnapshot, MergeStats};

// ============================================================================
// ExpansionState
// ============================================================================

/// Which addresses have had their first page fetched, and where the next
/// page of each starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
    next_offset: HashMap<String, usize>,
}

impl ExpansionState {
    /// Record that `address`'s first page was fetched.
    pub fn mark_expanded(&mut self, address: &str) {
        self.expanded.insert(address.to_string());
    }

    /// Move `address`'s next page offset forward by one page.
    pub fn advance_offset(&mut self, address: &str, page_size: usize) {
        *self.next_offset.entry(address.to_string()).or_insert(0) += page_size;
    }

    #[must_use]
    pub fn has_been_expanded(&self, address: &str) -> bool {
        self.expanded.contains(address)
    }

    /// Offset of the next page to request for `address` (0 if never fetched).
    #[must_use]
    pub fn next_offset(&self, address: &str) -> usize {
        self.next_offset.get(address).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Expanded addresses in sorted order.
    #[must_use]
    pub fn expanded_addresses(&self) -> Vec<&str> {
        let mut addresses: Vec<&str> = self.expanded.iter().map(String::as_str).collect();
        addresses.sort_unstable();
        addresses
    }
}

// ============================================================================
// GraphStore
// ============================================================================

/// Sole owner of the running graph and the expansion state.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    snapshot: GraphSnapshot,
    expansion: ExpansionState,
}

impl GraphStore {
    /// Drop all nodes, edges and expansion state (new root address).
    pub fn reset(&mut self) {
        self.snapshot = GraphSnapshot::new();
        self.expansion = ExpansionState::default();
    }

    /// Fold a freshly built fragment into the running graph.
    pub fn merge(&mut self, fragment: GraphSnapshot) -> MergeStats {
        self.snapshot.merge_from(fragment)
    }

    /// Record a successful fetch of `address` at `offset`.
    ///
    /// Only offset-zero fetches mark the address expanded; every fetch
    /// advances its offset by `page_size`.
    pub fn record_fetch(&mut self, address: &str, offset: usize, page_size: usize) {
        if offset == 0 {
            self.expansion.mark_expanded(address);
        }
        self.expansion.advance_offset(address, page_size);
    }

    #[must_use]
    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    #[must_use]
    pub fn has_been_expanded(&self, address: &str) -> bool {
        self.expansion.has_been_expanded(address)
    }

    #[must_use]
    pub fn next_offset(&self, address: &str) -> usize {
        self.expansion.next_offset(address)
    }
}

// ============================================================================
// Tests
// ============================================================================
