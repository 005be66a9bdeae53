//! Client configuration
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. defaults ([`ClientConfig::default`])
//! 2. an optional TOML file
//! 3. `LARDER_*` environment variables
//!
//! The CLI applies its own flags on top of the result.

use larder_core::{SyncError, SyncResult};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

/// Default API root
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/";

/// Default page size for list views
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 20;

/// Environment variable overriding `api_url`
pub const ENV_API_URL: &str = "LARDER_API_URL";

/// Environment variable overriding `token`
pub const ENV_TOKEN: &str = "LARDER_TOKEN";

/// Environment variable overriding `timeout_secs`
pub const ENV_TIMEOUT_SECS: &str = "LARDER_TIMEOUT_SECS";

// ============================================================================
// ClientConfig
// ============================================================================

/// Connection settings for the REST API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root URL the `api/...` paths are resolved against
    pub api_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Request timeout; `None` means requests never time out
    pub timeout_secs: Option<u64>,

    /// Page size used by list views
    pub items_per_page: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout_secs: None,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl ClientConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> SyncResult<Self> {
        toml::from_str(content).map_err(|e| SyncError::config(e.to_string()))
    }

    /// Read a TOML file
    pub fn from_file(path: &Path) -> SyncResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncError::config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Defaults, then the file (if any), then the process environment
    pub fn load(path: Option<&Path>) -> SyncResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `LARDER_*` overrides read through `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> SyncResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            let secs = timeout.trim().parse::<u64>().map_err(|_| {
                SyncError::config(format!("{} must be a number of seconds", ENV_TIMEOUT_SECS))
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(self)
    }

    /// Set the API root
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Check the settings without touching the network
    pub fn validate(&self) -> SyncResult<()> {
        self.base_url()?;
        if self.items_per_page == 0 {
            return Err(SyncError::config("items_per_page must be at least 1"));
        }
        Ok(())
    }

    /// The API root as a URL that always ends in `/`
    ///
    /// Relative resource paths are joined onto it, so a root such as
    /// `http://host/app` must become `http://host/app/` or the last segment
    /// would be replaced.
    pub fn base_url(&self) -> SyncResult<Url> {
        let mut raw = self.api_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw)
            .map_err(|e| SyncError::config(format!("invalid api_url '{}': {}", self.api_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(SyncError::config(format!(
                "api_url '{}' cannot be used as a base URL",
                self.api_url
            )));
        }
        Ok(url)
    }

    /// Configured timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// ============================================================================
// Tests
// ============================================================================
