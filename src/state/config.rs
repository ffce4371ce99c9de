//! Application configuration with persistence.
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/btcgraph/config.json`
//! - macOS: `~/Library/Application Support/btcgraph/config.json`
//! - Windows: `%APPDATA%/btcgraph/config.json`
//!
//! Command-line flags override these values for a single run.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use color_eyre::Result;
use serde::{Deserialize, Serialize};

use crate::constants::{MIN_CALL_INTERVAL, REQUEST_TIMEOUT};
use crate::domain::Provider;

// ============================================================================
// Constants
// ============================================================================

/// Application name used for configuration directory.
const APP_NAME: &str = "btcgraph";

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

// ============================================================================
// AppConfig
// ============================================================================

/// Persisted explorer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Ledger API to query.
    #[serde(default)]
    pub provider: Provider,
    /// Override for the provider's base URL (mirrors, self-hosted proxies).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Minimum spacing between ledger calls, in seconds.
    #[serde(default = "default_min_interval_secs")]
    pub min_interval_secs: u64,
    /// Per-request timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_min_interval_secs() -> u64 {
    MIN_CALL_INTERVAL.as_secs()
}

fn default_request_timeout_secs() -> u64 {
    REQUEST_TIMEOUT.as_secs()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            base_url: None,
            min_interval_secs: default_min_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Returns the path to the configuration file, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or created.
    pub fn config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            color_eyre::eyre::eyre!(
                "Could not determine config directory. Expected XDG_CONFIG_HOME or ~/.config on Linux, ~/Library/Application Support on macOS, %APPDATA% on Windows"
            )
        })?;
        path.push(APP_NAME);
        fs::create_dir_all(&path)?;
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Loads the configuration from disk, falling back to defaults.
    #[must_use]
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(%err, "Config load failed, using defaults");
                Self::default()
            }
        }
    }

    /// Attempts to load the configuration from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined, the file cannot be
    /// read, or its JSON cannot be parsed.
    pub fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        let content = fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined or the file cannot
    /// be written.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    #[must_use]
    pub fn min_interval(&self) -> Duration {
        Duration::from_secs(self.min_interval_secs)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL to use: the override if set, else the provider's public API.
    #[must_use]
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.base_url())
    }
}

// ============================================================================
// Tests
// ============================================================================
