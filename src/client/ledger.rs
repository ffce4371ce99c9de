//! Rate-limited ledger client.
//!
//! [`LedgerClient`] is the only component that talks to the network. It claims
//! a slot from the shared [`RateLimiter`], requests one page of an address's
//! history, and hands the body to the provider adapter for normalization.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::http::{HttpClient, HttpConfig};
use super::rate_limit::RateLimiter;
use super::{blockchain_info, blockcypher};
use crate::domain::{AddressSummary, ExplorerError, Provider};

// ============================================================================
// LedgerSource
// ============================================================================

/// Anything that can produce one page of an address's history.
///
/// The exploration controller is generic over this trait so it can be driven
/// by an in-memory source in tests.
pub trait LedgerSource {
    /// Number of transactions one page covers; the controller advances its
    /// per-address offset by this much after each successful fetch.
    fn page_size(&self) -> usize;

    /// Fetch the page of `address`'s history starting at `page_offset`.
    fn fetch_address_summary(
        &self,
        address: &str,
        page_offset: usize,
    ) -> impl Future<Output = Result<AddressSummary, ExplorerError>> + Send;
}

// ============================================================================
// LedgerClient
// ============================================================================

/// HTTP ledger client for a single provider.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    provider: Provider,
    base_url: String,
    http: HttpClient,
    limiter: Arc<RateLimiter>,
}

impl LedgerClient {
    /// Create a client against `base_url` (the provider's public API or a
    /// mirror).
    ///
    /// # Errors
    ///
    /// Returns `ExplorerError::Upstream` if the HTTP client fails to initialize.
    pub fn with_base_url(
        provider: Provider,
        base_url: impl Into<String>,
        limiter: Arc<RateLimiter>,
        http_config: HttpConfig,
    ) -> Result<Self, ExplorerError> {
        Ok(Self {
            provider,
            base_url: base_url.into(),
            http: HttpClient::with_config(http_config)?,
            limiter,
        })
    }

    #[must_use]
    pub fn provider(&self) -> Provider {
        self.provider
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn summary_url(&self, address: &str, page_offset: usize) -> String {
        match self.provider {
            Provider::BlockCypher => blockcypher::summary_url(&self.base_url, address, page_offset),
            Provider::BlockchainInfo => {
                blockchain_info::summary_url(&self.base_url, address, page_offset)
            }
        }
    }

    fn timeout(&self) -> Duration {
        self.http.config().timeout
    }

    /// GET `url` and return the body of a 2xx response.
    async fn fetch_body(&self, url: &str) -> Result<String, ExplorerError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ExplorerError::upstream(format!(
                "{} request failed with status {}: {}",
                self.provider, status, error_text
            )));
        }

        response.text().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, err: reqwest::Error) -> ExplorerError {
        if err.is_timeout() {
            ExplorerError::timeout(self.timeout().as_secs())
        } else {
            ExplorerError::upstream(format!("{} request failed: {err}", self.provider))
        }
    }
}

impl LedgerSource for LedgerClient {
    fn page_size(&self) -> usize {
        self.provider.page_size()
    }

    /// Fetch and normalize one page of `address`'s history.
    ///
    /// Always waits on the shared rate limiter first. The request as a whole
    /// (connect, headers, body) is bounded by the configured timeout.
    async fn fetch_address_summary(
        &self,
        address: &str,
        page_offset: usize,
    ) -> Result<AddressSummary, ExplorerError> {
        self.limiter.acquire().await;

        let url = self.summary_url(address, page_offset);
        tracing::debug!(%url, provider = %self.provider, "Fetching address page");

        let body = tokio::time::timeout(self.timeout(), self.fetch_body(&url))
            .await
            .map_err(|_| ExplorerError::timeout(self.timeout().as_secs()))??;

        let summary = match self.provider {
            Provider::BlockCypher => blockcypher::normalize(&body, address, page_offset)?,
            Provider::BlockchainInfo => blockchain_info::normalize(&body, address)?,
        };

        tracing::debug!(
            address,
            page_offset,
            transactions = summary.transactions.len(),
            "Normalized address page"
        );
        Ok(summary)
    }
}
