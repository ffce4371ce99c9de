//! Exploration state and persisted settings.
//!
//! - [`ExplorationController`] - per-address fetch lifecycle over the graph store
//! - [`AppConfig`] - persistent configuration with load/save capabilities

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod explorer;


// ============================================================================
// Re-exports
// ============================================================================

pub use config::AppConfig;
pub use explorer::{ExplorationController, FetchOutcome};
