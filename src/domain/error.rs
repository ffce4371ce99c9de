//! Error types for address-graph exploration.
//!
//! Validation failures never leave the process; upstream and timeout
//! failures come from the ledger API and can be retried by the user.

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Error type shared by the ledger client and the exploration controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplorerError {
    /// The user-supplied address failed the local format check.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The ledger API failed, answered with a non-2xx status, or returned a
    /// body that could not be normalized.
    #[error("Upstream error: {message}")]
    Upstream {
        /// Description of what went wrong upstream.
        message: String,
    },

    /// The ledger API did not answer in time.
    #[error("Ledger request timed out after {seconds}s")]
    Timeout {
        /// The timeout that elapsed, in seconds.
        seconds: u64,
    },
}

impl ExplorerError {
    /// Create a new upstream error with the given message.
    #[must_use]
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new invalid address error.
    #[must_use]
    pub fn invalid_address(message: impl Into<String>) -> Self {
        Self::InvalidAddress(message.into())
    }

    /// Create a new timeout error.
    #[must_use]
    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// Whether an explicit user retry can succeed.
    ///
    /// Validation errors are deterministic; everything that came back from the
    /// network may go away on a second attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidAddress(_))
    }

    /// Convert to a `color_eyre::Report` for the binary's error path.
    #[must_use = "this converts the error into a Report for display"]
    pub fn into_report(self) -> color_eyre::Report {
        color_eyre::eyre::eyre!("{}", self)
    }
}

// ============================================================================
// Tests
// ============================================================================
