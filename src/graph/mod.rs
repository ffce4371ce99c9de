//! Address graph construction and storage.
//!
//! - [`builders`] - transactions of one address → graph fragment
//! - [`store`] - keyed merge into the running graph, expansion state
//! - [`stats`] - per-node and whole-graph read views
//! - [`types`] - nodes, edges and snapshots

pub mod builders;
pub mod stats;
pub mod store;
pub mod types;

pub use builders::build;
pub use stats::{GraphSummary, NodeStats, node_stats};
pub use store::GraphStore;
pub use types::GraphSnapshot;
