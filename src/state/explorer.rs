//! Exploration controller: fetch → build → merge per address.
//!
//! [`ExplorationController`] owns the [`GraphStore`] and the per-address
//! lifecycle. Pipelines for different addresses may run concurrently; each
//! one claims its address under the write lock before awaiting the ledger, so
//! a second request for an address that is already loading is a no-op.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::client::LedgerSource;
use crate::domain::{ExplorerError, validate_address};
use crate::graph::{self, GraphSnapshot, GraphStore, GraphSummary, NodeStats};

// ============================================================================
// Types
// ============================================================================

/// Lifecycle of one address within the current root's exploration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AddressState {
    /// Never requested.
    #[default]
    Unseen,
    /// A fetch for the page at `offset` is in flight.
    Loading { offset: usize },
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed; [`ExplorationController::retry`] re-requests
    /// the same `offset`.
    Errored { offset: usize, message: String },
}

impl AddressState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// What a controller operation ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page was fetched and merged into the graph.
    Merged {
        address: String,
        offset: usize,
        transactions: usize,
        nodes_added: usize,
        edges_added: usize,
    },
    /// Nothing to do for the address in its current state.
    Skipped,
    /// The fetch finished after the root changed; its result was dropped.
    Discarded,
}

/// Which page an operation asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageRequest {
    First,
    Next,
    Retry,
}

#[derive(Debug, Default)]
struct Inner {
    store: GraphStore,
    states: HashMap<String, AddressState>,
    root: Option<String>,
    /// Bumped on every root change; fetches tagged with an older value are
    /// dropped on completion.
    generation: u64,
}

impl Inner {
    fn state(&self, address: &str) -> AddressState {
        self.states.get(address).cloned().unwrap_or_default()
    }

    /// Decide the offset for `request`, or `None` if the request is a no-op.
    fn offset_for(&self, address: &str, request: PageRequest) -> Option<usize> {
        let state = self.state(address);
        if state.is_loading() {
            return None;
        }

        match request {
            PageRequest::First => (!self.store.has_been_expanded(address)).then_some(0),
            PageRequest::Next => self
                .store
                .has_been_expanded(address)
                .then(|| self.store.next_offset(address)),
            PageRequest::Retry => match state {
                AddressState::Errored { offset, .. } => Some(offset),
                _ => None,
            },
        }
    }
}

// ============================================================================
// ExplorationController
// ============================================================================

/// Drives incremental exploration of one root address at a time.
#[derive(Debug)]
pub struct ExplorationController<S> {
    source: S,
    inner: RwLock<Inner>,
}

impl<S: LedgerSource + Sync> ExplorationController<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            inner: RwLock::new(Inner::default()),
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Start over from `input`: validate, clear the graph, fetch page 0.
    ///
    /// # Errors
    ///
    /// Returns `ExplorerError::InvalidAddress` without touching the graph or
    /// the network when the address fails the format check, and the fetch
    /// error when the first page cannot be loaded.
    pub async fn set_root_address(&self, input: &str) -> Result<FetchOutcome, ExplorerError> {
        let address = validate_address(input)?.to_string();

        {
            let mut inner = self.inner.write().await;
            inner.store.reset();
            inner.states.clear();
            inner.root = Some(address.clone());
            inner.generation += 1;
        }
        tracing::info!(%address, "New root address");

        self.run(&address, PageRequest::First).await
    }

    /// Fetch the first page of `address` unless it is loading or already
    /// expanded.
    ///
    /// # Errors
    ///
    /// Returns the ledger error if the fetch fails.
    pub async fn expand_node(&self, address: &str) -> Result<FetchOutcome, ExplorerError> {
        self.run(address, PageRequest::First).await
    }

    /// Fetch the next page of an expanded `address`.
    ///
    /// # Errors
    ///
    /// Returns the ledger error if the fetch fails.
    pub async fn load_more(&self, address: &str) -> Result<FetchOutcome, ExplorerError> {
        self.run(address, PageRequest::Next).await
    }

    /// Re-request the page whose fetch failed for `address`.
    ///
    /// # Errors
    ///
    /// Returns the ledger error if the fetch fails again.
    pub async fn retry(&self, address: &str) -> Result<FetchOutcome, ExplorerError> {
        self.run(address, PageRequest::Retry).await
    }

    /// Retry every address whose last fetch failed, in address order.
    ///
    /// Each address is retried once; a second failure leaves it `Errored`
    /// for a later call.
    pub async fn retry_failed(&self) -> Vec<(String, Result<FetchOutcome, ExplorerError>)> {
        let mut failed: Vec<String> = {
            let inner = self.inner.read().await;
            inner
                .states
                .iter()
                .filter(|(_, state)| matches!(state, AddressState::Errored { .. }))
                .map(|(address, _)| address.clone())
                .collect()
        };
        failed.sort_unstable();

        let mut results = Vec::with_capacity(failed.len());
        for address in failed {
            let result = self.retry(&address).await;
            results.push((address, result));
        }
        results
    }

    async fn run(
        &self,
        address: &str,
        request: PageRequest,
    ) -> Result<FetchOutcome, ExplorerError> {
        let (offset, generation) = {
            let mut inner = self.inner.write().await;
            let Some(offset) = inner.offset_for(address, request) else {
                tracing::debug!(address, ?request, state = ?inner.state(address), "Nothing to fetch");
                return Ok(FetchOutcome::Skipped);
            };
            inner
                .states
                .insert(address.to_string(), AddressState::Loading { offset });
            (offset, inner.generation)
        };

        let result = self.source.fetch_address_summary(address, offset).await;

        let summary = match result {
            Ok(summary) => summary,
            Err(err) => {
                let mut inner = self.inner.write().await;
                if inner.generation != generation {
                    return Ok(FetchOutcome::Discarded);
                }
                tracing::warn!(address, offset, error = %err, "Fetch failed");
                inner.states.insert(
                    address.to_string(),
                    AddressState::Errored {
                        offset,
                        message: err.to_string(),
                    },
                );
                return Err(err);
            }
        };

        let fragment = graph::build(address, &summary.transactions);

        let mut inner = self.inner.write().await;
        if inner.generation != generation {
            tracing::debug!(address, offset, "Discarding fetch for a previous root");
            return Ok(FetchOutcome::Discarded);
        }

        let stats = inner.store.merge(fragment);
        inner
            .store
            .record_fetch(address, offset, self.source.page_size());
        inner
            .states
            .insert(address.to_string(), AddressState::Loaded);

        tracing::info!(
            address,
            offset,
            transactions = summary.transactions.len(),
            nodes_added = stats.nodes_added,
            edges_added = stats.edges_added,
            "Merged address page"
        );

        Ok(FetchOutcome::Merged {
            address: address.to_string(),
            offset,
            transactions: summary.transactions.len(),
            nodes_added: stats.nodes_added,
            edges_added: stats.edges_added,
        })
    }

    // ========================================================================
    // Read Views
    // ========================================================================

    /// Copy of the current graph.
    pub async fn snapshot(&self) -> GraphSnapshot {
        self.inner.read().await.store.snapshot().clone()
    }

    /// Statistics for `address`, or `None` if it is not in the graph.
    pub async fn node_stats(&self, address: &str) -> Option<NodeStats> {
        let inner = self.inner.read().await;
        let snapshot = inner.store.snapshot();
        snapshot
            .contains_node(address)
            .then(|| graph::node_stats(snapshot, address))
    }

    /// Whole-graph counts.
    pub async fn summary(&self) -> GraphSummary {
        let inner = self.inner.read().await;
        GraphSummary {
            node_count: inner.store.snapshot().node_count(),
            edge_count: inner.store.snapshot().edge_count(),
            expanded_count: inner.store.expansion().expanded_count(),
        }
    }

    #[cfg(test)]
    pub async fn address_state(&self, address: &str) -> AddressState {
        self.inner.read().await.state(address)
    }

    pub async fn root(&self) -> Option<String> {
        self.inner.read().await.root.clone()
    }

    /// Addresses whose first page has been fetched, sorted.
    pub async fn expanded_addresses(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        inner
            .store
            .expansion()
            .expanded_addresses()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[cfg(test)]
    pub async fn has_been_expanded(&self, address: &str) -> bool {
        self.inner.read().await.store.has_been_expanded(address)
    }

    #[cfg(test)]
    pub async fn next_offset(&self, address: &str) -> usize {
        self.inner.read().await.store.next_offset(address)
    }
}
