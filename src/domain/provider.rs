//! Ledger API providers.
//!
//! Each provider is a public Bitcoin block explorer API with its own URL
//! layout, page size and pagination scheme.

use serde::{Deserialize, Serialize};

use crate::constants::{BLOCKCHAIN_INFO_PAGE_SIZE, BLOCKCYPHER_PAGE_SIZE};

// ============================================================================
// Provider
// ============================================================================

/// Upstream ledger API variants.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Provider {
    /// BlockCypher `addrs/{address}/full` endpoint.
    #[default]
    BlockCypher,
    /// Blockchain.info `rawaddr/{address}` endpoint.
    BlockchainInfo,
}

impl Provider {
    /// Returns the human-readable name of the provider.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BlockCypher => "BlockCypher",
            Self::BlockchainInfo => "Blockchain.info",
        }
    }

    /// Returns the public base URL for this provider.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::BlockCypher => "https://api.blockcypher.com",
            Self::BlockchainInfo => "https://blockchain.info",
        }
    }

    /// Number of transactions requested per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        match self {
            Self::BlockCypher => BLOCKCYPHER_PAGE_SIZE,
            Self::BlockchainInfo => BLOCKCHAIN_INFO_PAGE_SIZE,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_as_str() {
        assert_eq!(Provider::BlockCypher.as_str(), "BlockCypher");
        assert_eq!(Provider::BlockchainInfo.as_str(), "Blockchain.info");
    }

    #[test]
    fn test_provider_page_sizes() {
        assert_eq!(Provider::BlockCypher.page_size(), 5);
        assert_eq!(Provider::BlockchainInfo.page_size(), 10);
    }

    #[test]
    fn test_provider_default() {
        assert_eq!(Provider::default(), Provider::BlockCypher);
    }

    #[test]
    fn test_provider_serialization() {
        let serialized = serde_json::to_string(&Provider::BlockchainInfo).unwrap();
        assert_eq!(serialized, "\"BlockchainInfo\"");
        let deserialized: Provider = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, Provider::BlockchainInfo);
    }
}
