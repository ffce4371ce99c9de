//! HTTP client abstraction for ledger API requests.

use reqwest::Client;
use std::time::Duration;

use crate::constants::REQUEST_TIMEOUT;
use crate::domain::ExplorerError;

// ============================================================================
// Constants
// ============================================================================

/// How long an idle pooled connection is kept around.
pub const POOL_IDLE_TIMEOUT_SECS: u64 = 30;

/// Maximum idle connections kept per host.
pub const POOL_MAX_IDLE_PER_HOST: usize = 2;

// ============================================================================
// Configuration
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Idle connection lifetime
    pub pool_idle_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: REQUEST_TIMEOUT,
            pool_idle_timeout: Duration::from_secs(POOL_IDLE_TIMEOUT_SECS),
        }
    }
}

impl HttpConfig {
    /// Create config with custom timeout
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

// ============================================================================
// HTTP Client
// ============================================================================

/// Base HTTP client wrapper
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `ExplorerError::Upstream` if the TLS backend cannot be
    /// initialized.
    pub fn with_config(config: HttpConfig) -> Result<Self, ExplorerError> {
        let inner = Client::builder()
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(config.pool_idle_timeout)
            .build()
            .map_err(|e| ExplorerError::upstream(format!("HTTP client init failed: {e}")))?;

        Ok(Self { inner, config })
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Build a GET request with standard headers
    pub fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.inner
            .get(url)
            .header("accept", "application/json")
            .timeout(self.config.timeout)
    }
}
