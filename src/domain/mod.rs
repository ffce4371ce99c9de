//! Domain types for the btcgraph explorer.
//!
//! # Module Organization
//!
//! - [`error`] - Error taxonomy for validation and ledger failures
//! - [`address`] - Basic address format check for user input
//! - [`provider`] - Supported ledger APIs
//! - [`transaction`] - Canonical transaction and address-summary records

// ============================================================================
// Module Declarations
// ============================================================================

pub mod address;
pub mod error;
pub mod provider;
pub mod transaction;

// ============================================================================
// Re-exports
// ============================================================================

pub use address::validate_address;
pub use error::ExplorerError;
pub use provider::Provider;
pub use transaction::{
    AddressSummary, Transaction, TransactionInput, TransactionOutput, net_result_for,
};
