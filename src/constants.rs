//! Application constants for the btcgraph explorer.
//!
//! Centralizes the timing, paging and display values shared between the
//! ledger client, the graph builder and the exploration controller.

use std::time::Duration;

// ============================================================================
// Ledger API Limits
// ============================================================================

/// Minimum spacing between two outbound ledger calls.
///
/// Measured from the moment the previous call was permitted to the moment the
/// next one is. Public ledger APIs throttle anonymous clients aggressively.
pub const MIN_CALL_INTERVAL: Duration = Duration::from_secs(12);

/// Upper bound on a single ledger request before it is reported as timed out.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Transactions per page requested from BlockCypher.
pub const BLOCKCYPHER_PAGE_SIZE: usize = 5;

/// Transactions per page requested from Blockchain.info.
pub const BLOCKCHAIN_INFO_PAGE_SIZE: usize = 10;

// ============================================================================
// Units
// ============================================================================

/// Number of satoshis in one BTC.
pub const SATOSHIS_PER_BTC: f64 = 100_000_000.0;

/// Converts an integer satoshi amount to a BTC decimal.
#[must_use]
pub fn satoshis_to_btc(satoshis: u64) -> f64 {
    satoshis as f64 / SATOSHIS_PER_BTC
}

// ============================================================================
// Rendering Hints
// ============================================================================

/// Weight given to every node produced by the graph builder.
pub const DEFAULT_NODE_WEIGHT: f64 = 3.0;

/// Hex color of an edge leaving the expanded address.
pub const OUTGOING_COLOR: &str = "#ff6666";

/// Hex color of an edge arriving at the expanded address.
pub const INCOMING_COLOR: &str = "#00ff88";
