//! HTTP clients for public Bitcoin ledger APIs.
//!
//! This module provides:
//! - [`RateLimiter`] - process-wide spacing of outbound calls
//! - [`LedgerClient`] - fetch + normalize one page of an address's history
//! - provider adapters for BlockCypher and Blockchain.info
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use crate::client::{HttpConfig, LedgerClient, LedgerSource, RateLimiter};
//! use crate::constants::MIN_CALL_INTERVAL;
//! use crate::domain::Provider;
//!
//! let provider = Provider::BlockCypher;
//! let limiter = Arc::new(RateLimiter::new(MIN_CALL_INTERVAL));
//! let client =
//!     LedgerClient::with_base_url(provider, provider.base_url(), limiter, HttpConfig::default())?;
//! let page = client.fetch_address_summary("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", 0).await?;
//! ```

mod blockchain_info;
mod blockcypher;
pub mod http;
pub mod ledger;
pub mod rate_limit;


// ============================================================================
// Re-exports
// ============================================================================

pub use http::HttpConfig;
pub use ledger::{LedgerClient, LedgerSource};
pub use rate_limit::RateLimiter;
